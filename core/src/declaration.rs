//! A minimal CSS object model: declarations grouped into blocks, plus the
//! selector-based merge the renderers use to consolidate their output.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;

use crate::{Result, TokenError};

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `name: value;` with an optional trailing comment.
    Property {
        name: String,
        value: String,
        comment: Option<String>,
    },
    /// A custom property; rendered as `--name: value;`.
    Variable { name: String, value: String },
    /// A blank separator line, or a standalone comment.
    Empty { comment: Option<String> },
}

impl Declaration {
    pub fn property(name: impl Into<String>, value: impl ToString) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        Ok(Declaration::Property {
            name,
            value: value.to_string(),
            comment: None,
        })
    }

    pub fn variable(name: impl Into<String>, value: impl ToString) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        Ok(Declaration::Variable {
            name,
            value: value.to_string(),
        })
    }

    pub fn empty() -> Self {
        Declaration::Empty { comment: None }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Declaration::Empty {
            comment: Some(text.into()),
        }
    }

    /// Attaches a comment. Variables never carry one.
    pub fn with_comment(self, text: impl Into<String>) -> Self {
        match self {
            Declaration::Property { name, value, .. } => Declaration::Property {
                name,
                value,
                comment: Some(text.into()),
            },
            Declaration::Empty { .. } => Declaration::comment(text),
            variable @ Declaration::Variable { .. } => variable,
        }
    }

    /// The name as it appears in the stylesheet.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Declaration::Property { name, .. } => Cow::Borrowed(name),
            Declaration::Variable { name, .. } => Cow::Owned(format!("--{name}")),
            Declaration::Empty { .. } => Cow::Borrowed(""),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Declaration::Property { value, .. } | Declaration::Variable { value, .. } => value,
            Declaration::Empty { .. } => "",
        }
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TokenError::assertion("CSS declaration name cannot be empty"));
    }
    if name.contains(' ') {
        return Err(TokenError::assertion(format!(
            "CSS declaration name cannot contain spaces, name: {name}"
        )));
    }
    if name.contains('.') {
        return Err(TokenError::assertion(format!(
            "CSS declaration name cannot contain dots, name: {name}"
        )));
    }
    if name != name.to_lowercase() {
        return Err(TokenError::assertion(format!(
            "CSS declaration name must be lowercase, name: {name}"
        )));
    }
    Ok(())
}

// No trailing space after `;`, unlike the design tool's own exporter.
impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Property {
                comment: Some(comment),
                ..
            } => write!(f, "{}: {}; /* {comment} */", self.name(), self.value()),
            Declaration::Property { .. } | Declaration::Variable { .. } => {
                write!(f, "{}: {};", self.name(), self.value())
            }
            Declaration::Empty {
                comment: Some(comment),
            } => write!(f, "/* {comment} */"),
            Declaration::Empty { comment: None } => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Declarations under `:root`.
    Root { declarations: Vec<Declaration> },
    /// Declarations under `.name`.
    Class {
        name: String,
        declarations: Vec<Declaration>,
    },
}

impl Block {
    pub fn root(declarations: Vec<Declaration>) -> Self {
        Block::Root { declarations }
    }

    pub fn class(name: impl Into<String>, declarations: Vec<Declaration>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TokenError::assertion("CSS class name cannot be empty"));
        }
        if name.contains(' ') {
            return Err(TokenError::assertion(format!(
                "CSS class name cannot contain spaces, name: {name}"
            )));
        }
        if name.contains('.') {
            return Err(TokenError::assertion(format!(
                "CSS class name cannot contain dots, name: {name}"
            )));
        }
        Ok(Block::Class { name, declarations })
    }

    pub fn selector(&self) -> Cow<'_, str> {
        match self {
            Block::Root { .. } => Cow::Borrowed(":root"),
            Block::Class { name, .. } => Cow::Owned(format!(".{name}")),
        }
    }

    pub fn declarations(&self) -> &[Declaration] {
        match self {
            Block::Root { declarations } | Block::Class { declarations, .. } => declarations,
        }
    }

    fn declarations_mut(&mut self) -> &mut Vec<Declaration> {
        match self {
            Block::Root { declarations } | Block::Class { declarations, .. } => declarations,
        }
    }

    fn into_declarations(self) -> Vec<Declaration> {
        match self {
            Block::Root { declarations } | Block::Class { declarations, .. } => declarations,
        }
    }

    /// Groups blocks by selector, in order of first appearance, and folds
    /// each group into one block. Runs coming from different source blocks
    /// are separated by a blank declaration.
    pub fn merge(blocks: impl IntoIterator<Item = Block>) -> Result<Vec<Block>> {
        let mut by_selector: IndexMap<String, Vec<Block>> = IndexMap::new();
        for block in blocks {
            by_selector
                .entry(block.selector().into_owned())
                .or_default()
                .push(block);
        }
        if by_selector.is_empty() {
            return Err(TokenError::assertion("Cannot merge empty blocks"));
        }
        by_selector
            .into_iter()
            .map(|(_, group)| Block::merge_same_selector(group))
            .collect()
    }

    fn merge_same_selector(blocks: Vec<Block>) -> Result<Block> {
        let mut blocks = blocks.into_iter();
        let Some(mut merged) = blocks.next() else {
            return Err(TokenError::assertion("Cannot merge empty blocks"));
        };
        for block in blocks {
            if block.selector() != merged.selector() {
                return Err(TokenError::assertion(format!(
                    "Cannot merge blocks with different selectors. Selectors: {}, {}",
                    merged.selector(),
                    block.selector()
                )));
            }
            let declarations = merged.declarations_mut();
            if !declarations.is_empty() {
                declarations.push(Declaration::empty());
            }
            declarations.extend(block.into_declarations());
        }
        Ok(merged)
    }
}

// Separator lines are left blank rather than indented.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector())?;
        for declaration in self.declarations() {
            let line = declaration.to_string();
            if line.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, "  {line}")?;
            }
        }
        write!(f, "}}")
    }
}
