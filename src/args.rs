use std::path::PathBuf;

use clap::{Parser, Subcommand};
use penport_core::OutputMode;

/// Export colors and typographies from a Penpot file as CSS or Tailwind
#[derive(Parser, Debug)]
#[command(name = "penport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export all themes from Penpot
    Export(ExportArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// A saved `get-file` response (.json), a .penpot file or an unpacked
    /// .penpot directory. Without it the file is fetched from Penpot.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output format: css, pure-css or tailwind
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    pub format: Option<OutputMode>,

    /// Output path for the CSS file
    #[arg(long = "css-output", value_name = "PATH")]
    pub css_output: Option<PathBuf>,

    /// Output path for the Tailwind config (tailwind format only)
    #[arg(long = "config-output", value_name = "PATH")]
    pub config_output: Option<PathBuf>,

    /// Do not append `sans-serif` to font-family variables (css format only)
    #[arg(long = "no-fallback")]
    pub no_fallback: bool,

    /// Project configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        default_value = "penport.config.json"
    )]
    pub config: PathBuf,

    /// Penpot file to fetch; overrides `fileId` from the configuration file
    #[arg(long = "file-id", value_name = "UUID", env = "PENPOT_FILE_ID")]
    pub file_id: Option<String>,
}
