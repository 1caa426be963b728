//! Virtual-node name synthesis.
//!
//! A pattern is a string with two placeholders: `{name}` (the real node's
//! name) and `{index}` (the replica index, starting at 0). `{{` and `}}`
//! produce literal braces.

use std::fmt::Write;

use crate::error::{Result, RingError};

/// Longest synthesized virtual-node name, in bytes.
pub const MAX_VIRTUAL_NAME_LEN: usize = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Index,
}

/// A parsed virtual-node naming pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNamePattern {
    source: String,
    segments: Vec<Segment>,
}

impl VirtualNamePattern {
    /// Parse a pattern.
    ///
    /// Fails if the pattern is empty, contains an unknown or unclosed
    /// placeholder, or has no `{index}` (every replica would share one name).
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(RingError::InvalidArgument(
                "virtual node pattern is empty".into(),
            ));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut placeholder = String::new();
                    let mut closed = false;
                    for p in chars.by_ref() {
                        if p == '}' {
                            closed = true;
                            break;
                        }
                        placeholder.push(p);
                    }
                    if !closed {
                        return Err(RingError::InvalidArgument(format!(
                            "unclosed placeholder in pattern {pattern:?}"
                        )));
                    }
                    let segment = match placeholder.as_str() {
                        "name" => Segment::Name,
                        "index" => Segment::Index,
                        other => {
                            return Err(RingError::InvalidArgument(format!(
                                "unknown placeholder {{{other}}} in pattern {pattern:?}"
                            )));
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if !segments.contains(&Segment::Index) {
            return Err(RingError::InvalidArgument(format!(
                "pattern {pattern:?} has no {{index}} placeholder"
            )));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as originally written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render the name of replica `index` of real node `name`.
    pub fn render(&self, name: &str, index: u32) -> String {
        let mut out = String::with_capacity(self.source.len() + name.len() + 10);
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Name => out.push_str(name),
                Segment::Index => {
                    // Writing to a String cannot fail.
                    let _ = write!(out, "{index}");
                }
            }
        }
        out
    }

    /// Render and enforce [`MAX_VIRTUAL_NAME_LEN`].
    ///
    /// Names are never truncated: a truncated name could collide with
    /// another replica's identity.
    pub fn render_checked(&self, name: &str, index: u32) -> Result<String> {
        let rendered = self.render(name, index);
        if rendered.len() > MAX_VIRTUAL_NAME_LEN {
            return Err(RingError::NameTooLong {
                name: name.to_string(),
                len: rendered.len(),
                max: MAX_VIRTUAL_NAME_LEN,
            });
        }
        Ok(rendered)
    }
}
