use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use penport_core::{generate, source::record_kind, OutputFile, Tokens};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::{args::ExportArgs, config::PenportConfig, fetch::fetch_file};

pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

/// Where the tokens are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A saved `get-file` response.
    Document(PathBuf),
    /// A directory holding an unpacked `.penpot` package.
    Package(PathBuf),
    /// A packed `.penpot` file.
    Archive(PathBuf),
    Remote { file_id: String },
}

impl Source {
    pub fn resolve(args: &ExportArgs, config: &PenportConfig) -> Result<Self> {
        if let Some(input) = &args.input {
            return Ok(if input.is_dir() {
                Source::Package(input.clone())
            } else if is_archive(input) {
                Source::Archive(input.clone())
            } else {
                Source::Document(input.clone())
            });
        }
        match args.file_id.as_ref().or(config.file_id.as_ref()) {
            Some(file_id) => Ok(Source::Remote {
                file_id: file_id.clone(),
            }),
            None => bail!(
                "No input given and no fileId configured - pass --input or add fileId to {}",
                args.config.display()
            ),
        }
    }

    pub fn load(&self) -> Result<Tokens> {
        match self {
            Source::Document(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(Tokens::from_document(&text)?)
            }
            Source::Package(dir) => read_package(dir),
            Source::Archive(path) => read_archive(path),
            Source::Remote { file_id } => {
                let token = std::env::var(ACCESS_TOKEN_VAR).with_context(|| {
                    format!("{ACCESS_TOKEN_VAR} is not set - add it to .penport-secret file")
                })?;
                info!("Fetching themes from Penpot...");
                Ok(Tokens::from_document(&fetch_file(file_id, &token)?)?)
            }
        }
    }
}

/// Feeds every `*.json` below `dir` to the package reader, named by its
/// path relative to `dir`.
pub fn read_package(dir: &Path) -> Result<Tokens> {
    let pattern = format!(
        "{}/**/*.json",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let mut records = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid package directory")? {
        let path = entry?;
        let name = path
            .strip_prefix(dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        records.push((name, contents));
    }
    Ok(Tokens::from_records(records)?)
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            extension.eq_ignore_ascii_case("penpot") || extension.eq_ignore_ascii_case("zip")
        })
}

/// Feeds the entries of a packed `.penpot` file to the package reader.
/// Only token records are decompressed; media entries are passed by name.
pub fn read_archive(path: &Path) -> Result<Tokens> {
    let file =
        fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("{} is not a Penpot archive", path.display()))?;

    let mut records = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut contents = String::new();
        if record_kind(&name).is_some() {
            entry
                .read_to_string(&mut contents)
                .with_context(|| format!("Failed to read {name} from {}", path.display()))?;
        }
        records.push((name, contents));
    }
    debug!(entries = records.len(), archive = %path.display(), "read archive");
    Ok(Tokens::from_records(records)?)
}

pub fn write_files(files: &[OutputFile]) -> Result<()> {
    for file in files {
        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&file.path, &file.contents)
            .with_context(|| format!("Failed to write {}", file.path.display()))?;
        info!("Generated: {}", file.path.display());
    }
    Ok(())
}

/// The `export` command: load, render, write.
pub fn run(args: &ExportArgs) -> Result<Vec<PathBuf>> {
    info!("Validating configuration...");
    let config = PenportConfig::load(&args.config)?;
    let options = config.generator_options(args);
    let source = Source::resolve(args, &config)?;

    let tokens = source.load()?;
    info!(
        "Found {} typographies and {} colors",
        tokens.typographies.len(),
        tokens.colors.len()
    );

    info!("Generating {} output...", options.mode());
    let files = generate(&tokens, &options)?;
    write_files(&files)?;
    info!("Export completed successfully!");
    Ok(files.into_iter().map(|file| file.path).collect())
}
