// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Template parsing and marker substitution.
//!
//! A template is parsed once into literal and marker segments by a single
//! left-to-right scan. A marker is the opening delimiter, an identifier
//! (`[A-Za-z_][A-Za-z0-9_]*`, optionally padded with spaces or tabs) and the
//! closing delimiter:
//!
//! ```text
//! static const int layer_types[{{numberOfLayers}}] = { {{layerTypes}} };
//! ```
//!
//! A marker is only recognised once its closing delimiter is seen, so one
//! marker name can never partially match another and the result does not
//! depend on the order in which names were added to the table. Delimiter
//! runs that do not enclose an identifier, such as C's nested initializer
//! `{{1, 2}, {3, 4}}`, are kept as literal text.

use crate::{CodegenError, MarkerTable};
use std::collections::BTreeSet;

/// Opening and closing marker delimiters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MarkerSyntax {
    pub open: String,
    pub close: String,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

impl MarkerSyntax {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// `###name###` delimiters. Marker names are the same vocabulary as with
    /// the default syntax (`###numberOfLayers###`).
    pub fn hashes() -> Self {
        Self::new("###", "###")
    }

    /// Returns `name` wrapped in the delimiters.
    pub fn wrap(&self, name: &str) -> String {
        format!("{}{name}{}", self.open, self.close)
    }

    fn validate(&self) -> Result<(), CodegenError> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(CodegenError::ConfigError(
                "marker delimiters must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Marker(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `text`, recognising markers written in `syntax`.
    pub fn parse(text: &str, syntax: &MarkerSyntax) -> Result<Self, CodegenError> {
        syntax.validate()?;
        let open = syntax.open.as_str();
        let close = syntax.close.as_str();
        // Advancing by one character after a non-marker delimiter lets an
        // overlapping delimiter (e.g. `{{{name}}`) still be found.
        let step = open.chars().next().map_or(1, char::len_utf8);

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(idx) = rest.find(open) {
            let after = &rest[idx + open.len()..];
            match scan_marker(after, close) {
                Some((name, consumed)) => {
                    literal.push_str(&rest[..idx]);
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Marker(name.to_string()));
                    rest = &after[consumed..];
                }
                None => {
                    literal.push_str(&rest[..idx + step]);
                    rest = &rest[idx + step..];
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Names of all markers the template references.
    pub fn markers(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Marker(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Returns `true` if the template contains no markers.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Replaces every marker occurrence with its table value.
    ///
    /// # Errors
    /// [`CodegenError::UndefinedMarker`] for the first marker that is not in
    /// `table`. Nothing is returned in that case, so an unresolved marker can
    /// never leak into generated code.
    pub fn render(&self, table: &MarkerTable) -> Result<String, CodegenError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Marker(name) => {
                    let value = table.get(name).ok_or_else(|| CodegenError::UndefinedMarker {
                        marker: name.clone(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Table entries that the template never consumes.
    pub fn unused_markers(&self, table: &MarkerTable) -> Vec<String> {
        let used = self.markers();
        table
            .names()
            .filter(|name| !used.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Fails unless every table entry is consumed by the template.
    pub fn check_vocabulary(&self, table: &MarkerTable) -> Result<(), CodegenError> {
        let unused = self.unused_markers(table);
        if unused.is_empty() {
            Ok(())
        } else {
            Err(CodegenError::UnusedMarkers(unused))
        }
    }
}

/// Scans `[ \t]* ident [ \t]* close` at the start of `s`.
/// Returns the identifier and the number of bytes consumed.
fn scan_marker<'a>(s: &'a str, close: &str) -> Option<(&'a str, usize)> {
    let is_pad = |c: char| c == ' ' || c == '\t';
    let lead = s.len() - s.trim_start_matches(is_pad).len();
    let body = &s[lead..];

    let mut chars = body.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return None,
    }
    let end = chars
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
        .map_or(body.len(), |(i, _)| i);
    let name = &body[..end];

    let tail = &body[end..];
    let trail = tail.len() - tail.trim_start_matches(is_pad).len();
    if tail[trail..].starts_with(close) {
        Some((name, lead + end + trail + close.len()))
    } else {
        None
    }
}

/// Parses `text` with the default `{{name}}` syntax and renders it.
pub fn render(text: &str, table: &MarkerTable) -> Result<String, CodegenError> {
    Template::parse(text, &MarkerSyntax::default())?.render(table)
}
