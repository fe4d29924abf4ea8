//! Two-stage shader resource files.
//!
//! A resource holds both stages of a program, each introduced by a directive
//! line:
//!
//! ```text
//! #shader vertex
//! ...vertex source...
//! #shader fragment
//! ...fragment source...
//! ```
//!
//! Directive lines are stripped; every other line is copied verbatim, with a
//! trailing newline, into the section that is currently open. Sections may
//! come in either order and either may be empty. A leading byte-order mark
//! and blank lines ahead of the first directive are ignored.

use std::fs;
use std::path::Path;

use super::device::ShaderStage;
use crate::utils::error::{RenderError, Result};

pub const DIRECTIVE: &str = "#shader";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderProgramSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RenderError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Parsing shader resource {:?}", path);
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut source = Self::default();
        let mut section = Section::None;

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            if let Some(stage) = parse_directive(line, line_number)? {
                section = Section::Open(stage);
                continue;
            }

            let target = match section {
                Section::None if line.trim().is_empty() => continue,
                Section::None => {
                    return Err(RenderError::Parse {
                        line: line_number,
                        message: format!("'{}' before any {} directive", line, DIRECTIVE),
                    })
                }
                Section::Open(ShaderStage::Vertex) => &mut source.vertex,
                Section::Open(ShaderStage::Fragment) => &mut source.fragment,
            };
            target.push_str(line);
            target.push('\n');
        }

        Ok(source)
    }

    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    /// Writes both stages back out in resource file form.
    pub fn to_resource_string(&self) -> String {
        let mut out = String::with_capacity(self.vertex.len() + self.fragment.len() + 32);
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            out.push_str(DIRECTIVE);
            out.push(' ');
            out.push_str(&stage.to_string());
            out.push('\n');
            out.push_str(self.stage(stage));
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
enum Section {
    None,
    Open(ShaderStage),
}

/// `Ok(None)` for body lines. A line is a directive only when its first
/// whitespace-separated token is exactly `#shader`.
fn parse_directive(line: &str, line_number: usize) -> Result<Option<ShaderStage>> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(DIRECTIVE) {
        return Ok(None);
    }

    let stage = match tokens.next() {
        Some("vertex") => ShaderStage::Vertex,
        Some("fragment") => ShaderStage::Fragment,
        Some(other) => {
            return Err(RenderError::Parse {
                line: line_number,
                message: format!("unknown shader stage '{}'", other),
            })
        }
        None => {
            return Err(RenderError::Parse {
                line: line_number,
                message: format!("{} directive without a stage", DIRECTIVE),
            })
        }
    };

    if let Some(extra) = tokens.next() {
        return Err(RenderError::Parse {
            line: line_number,
            message: format!("unexpected '{}' after shader stage", extra),
        });
    }

    Ok(Some(stage))
}
