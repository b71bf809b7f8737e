//! Loading and writing pipeline config documents
//!
//! Documents are written back with a fixed block style: nested mappings are
//! indented by `mapping` columns, and sequence entries keep their dash at the
//! parent's column with content `sequence` columns in.
//!
//! ```yaml
//! properties:
//! -   name: apikey
//!     value: '{vault::sm.apikey}'
//! ```

use anyhow::{bail, Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Indentation used when writing a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentStyle {
    pub mapping: usize,
    pub sequence: usize,
}

impl IndentStyle {
    /// Layout of the files generated by toolchain export
    pub const TOOLCHAIN: IndentStyle = IndentStyle {
        mapping: 6,
        sequence: 4,
    };
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::TOOLCHAIN
    }
}

/// Parse a document; the root must be a mapping
pub fn parse_document(yaml: &str) -> Result<Value> {
    let document: Value = serde_yaml::from_str(yaml)?;
    if !document.is_mapping() {
        bail!("Expected a mapping at the document root");
    }
    Ok(document)
}

/// Load a document from a YAML file
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_document(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Render a document with the given indentation
pub fn render_document(document: &Value, style: &IndentStyle) -> Result<String> {
    let mut emitter = Emitter {
        out: String::new(),
        style: *style,
    };
    match document {
        Value::Mapping(map) if !map.is_empty() => emitter.mapping(map, 0, false)?,
        Value::Sequence(seq) if !seq.is_empty() => emitter.sequence(seq, 0, false)?,
        other => {
            emitter.out.push_str(&scalar(other)?);
            emitter.out.push('\n');
        }
    }
    Ok(emitter.out)
}

/// Render and write a document
pub fn write_document<P: AsRef<Path>>(path: P, document: &Value, style: &IndentStyle) -> Result<()> {
    let path = path.as_ref();
    let rendered = render_document(document, style)?;
    std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))
}

struct Emitter {
    out: String,
    style: IndentStyle,
}

impl Emitter {
    fn pad(&mut self, width: usize) {
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn sequence_step(&self) -> usize {
        // room for "- "
        self.style.sequence.max(2)
    }

    fn mapping(&mut self, map: &Mapping, indent: usize, inline_first: bool) -> Result<()> {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(indent);
            }
            self.out.push_str(&key_scalar(key)?);
            self.out.push(':');
            self.value(value, indent + self.style.mapping, indent)?;
        }
        Ok(())
    }

    fn sequence(&mut self, seq: &[Value], indent: usize, inline_first: bool) -> Result<()> {
        let step = self.sequence_step();
        for (i, item) in seq.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(indent);
            }
            self.out.push('-');
            match item {
                Value::Mapping(map) if !map.is_empty() => {
                    self.pad(step - 1);
                    self.mapping(map, indent + step, true)?;
                }
                Value::Sequence(inner) if !inner.is_empty() => {
                    self.pad(step - 1);
                    self.sequence(inner, indent + step, true)?;
                }
                Value::Tagged(_) => self.value(item, indent + step, indent + step)?,
                other => {
                    let rendered = scalar(other)?;
                    if !rendered.is_empty() {
                        self.pad(step - 1);
                        self.out.push_str(&rendered);
                    }
                    self.out.push('\n');
                }
            }
        }
        Ok(())
    }

    /// Emit what follows `key:` (or a tag), ending the line
    fn value(&mut self, value: &Value, mapping_indent: usize, sequence_indent: usize) -> Result<()> {
        match value {
            Value::Mapping(map) if !map.is_empty() => {
                self.out.push('\n');
                self.mapping(map, mapping_indent, false)
            }
            Value::Sequence(seq) if !seq.is_empty() => {
                self.out.push('\n');
                self.sequence(seq, sequence_indent, false)
            }
            Value::Tagged(tagged) => {
                self.out.push(' ');
                self.out.push_str(&tagged.tag.to_string());
                self.value(&tagged.value, mapping_indent, sequence_indent)
            }
            other => {
                let rendered = scalar(other)?;
                if !rendered.is_empty() {
                    self.out.push(' ');
                    self.out.push_str(&rendered);
                }
                self.out.push('\n');
                Ok(())
            }
        }
    }
}

fn scalar(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // A JSON string literal is a valid double-quoted YAML scalar
        Value::String(s) if s.contains('\n') => serde_json::to_string(s)?,
        Value::String(s) => serde_yaml::to_string(s)?.trim_end_matches('\n').to_string(),
        Value::Sequence(seq) if seq.is_empty() => "[]".to_string(),
        Value::Mapping(map) if map.is_empty() => "{}".to_string(),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, scalar(&tagged.value)?),
        _ => bail!("Unexpected collection in scalar position"),
    })
}

fn key_scalar(key: &Value) -> Result<String> {
    match key {
        Value::Null => Ok("null".to_string()),
        Value::Mapping(_) | Value::Sequence(_) => bail!("Complex mapping keys are not supported"),
        other => scalar(other),
    }
}
