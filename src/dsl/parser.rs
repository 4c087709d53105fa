// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line scanner for the markdown layout format.

use super::errors::{DslError, Result};
use super::{ConstraintSpec, LayoutSpec, TileSpec};
use crate::constraints::ConstraintTag;
use crate::geometry::{Direction, Tile};
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Components,
    Constraints,
    Tiles,
}

/// An open fenced tile block.
struct OpenTile {
    name: String,
    line: usize,
    rows: Vec<String>,
}

pub(super) fn parse(text: &str) -> Result<LayoutSpec> {
    let mut spec = LayoutSpec::default();
    let mut section = Section::Preamble;
    let mut pending_name: Option<String> = None;
    let mut open: Option<OpenTile> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let raw = raw.trim_end_matches('\r');
        let line = raw.trim();

        if let Some(mut tile) = open.take() {
            if line.starts_with("```") {
                spec.tiles.push(close_tile(tile)?);
            } else {
                tile.rows.push(raw.to_string());
                open = Some(tile);
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }
        if let Some(next) = section_header(line) {
            trace!(line = line_no, section = ?next, "section");
            section = next;
            pending_name = None;
            continue;
        }

        match section {
            Section::Preamble => {}
            Section::Components => {
                if let Some(name) = component_name(line) {
                    spec.declared.push(name);
                }
            }
            Section::Constraints => {
                if looks_like_constraint(line) {
                    spec.constraints.push(parse_constraint(line, line_no)?);
                }
            }
            Section::Tiles => {
                if line.starts_with("```") {
                    let name = pending_name
                        .take()
                        .ok_or(DslError::TileWithoutName { line: line_no })?;
                    open = Some(OpenTile {
                        name,
                        line: line_no,
                        rows: Vec::new(),
                    });
                } else if let Some(name) = tile_name(line) {
                    pending_name = Some(name);
                }
            }
        }
    }

    if let Some(tile) = open {
        return Err(DslError::UnterminatedTile {
            line: tile.line,
            name: tile.name,
        });
    }
    Ok(spec)
}

fn close_tile(tile: OpenTile) -> Result<TileSpec> {
    let art = tile.rows.join("\n");
    match Tile::from_ascii(&art) {
        Some(parsed) if parsed.filled_count() > 0 => Ok(TileSpec {
            name: tile.name,
            tile: parsed,
            line: tile.line,
        }),
        _ => Err(DslError::EmptyTile {
            line: tile.line,
            name: tile.name,
        }),
    }
}

/// `## Component Tiles`, `Constraints:`, `**Components**` and so on.
fn section_header(line: &str) -> Option<Section> {
    let heading = line.starts_with('#');
    let text = line
        .trim_start_matches('#')
        .trim()
        .trim_matches('*')
        .trim_end_matches(':')
        .trim()
        .to_ascii_lowercase();
    let is = |word: &str| if heading { text.contains(word) } else { text == word };
    if is("component tiles") {
        Some(Section::Tiles)
    } else if is("constraints") {
        Some(Section::Constraints)
    } else if is("components") {
        Some(Section::Components)
    } else {
        None
    }
}

/// Drop a leading `-`, `*` or `1.` list marker.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return rest.trim_start();
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            return rest.trim_start();
        }
    }
    line
}

/// `**Name**` anywhere in the line, colon stripped.
fn bold_name(line: &str) -> Option<String> {
    let start = line.find("**")? + 2;
    let len = line[start..].find("**")?;
    let name = line[start..start + len].trim().trim_end_matches(':').trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// `- **Keep** - central tower`, `1. Keep - central tower`, `- Keep`.
fn component_name(line: &str) -> Option<String> {
    let item = strip_list_marker(line);
    if let Some(name) = bold_name(item) {
        return Some(name);
    }
    let name = item
        .split(" - ")
        .next()
        .unwrap_or(item)
        .split(':')
        .next()
        .unwrap_or(item)
        .trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// `**Keep:**`, `**Keep**` or `Keep:` introduces the next fenced block.
fn tile_name(line: &str) -> Option<String> {
    if let Some(name) = bold_name(line) {
        return Some(name);
    }
    let name = line.strip_suffix(':')?.trim();
    (!name.is_empty() && !name.contains(char::is_whitespace)).then(|| name.to_string())
}

/// `KIND(` after an optional list marker. Prose is skipped, even when it
/// contains parentheses.
fn looks_like_constraint(line: &str) -> bool {
    let item = strip_list_marker(line);
    let ident = item
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(item.len());
    ident > 0 && item[ident..].trim_start().starts_with('(')
}

/// `- ADJACENT(Gate, Keep, s)`
fn parse_constraint(line: &str, line_no: usize) -> Result<ConstraintSpec> {
    let malformed = || DslError::MalformedConstraint {
        line: line_no,
        text: line.to_string(),
    };
    let item = strip_list_marker(line);
    let open = item.find('(').ok_or_else(malformed)?;
    let close = item.rfind(')').filter(|&c| c > open).ok_or_else(malformed)?;

    let kind = item[..open].trim();
    let args: Vec<&str> = item[open + 1..close].split(',').map(str::trim).collect();
    let [a, b, direction] = args.as_slice() else {
        return Err(malformed());
    };
    if kind.is_empty() || a.is_empty() || b.is_empty() {
        return Err(malformed());
    }

    let tag = ConstraintTag::from_str(kind).map_err(|_| DslError::UnknownKind {
        line: line_no,
        kind: kind.to_string(),
    })?;
    let direction = Direction::from_str(direction).map_err(|source| DslError::BadDirection {
        line: line_no,
        source,
    })?;
    Ok(ConstraintSpec {
        tag,
        a: a.to_string(),
        b: b.to_string(),
        direction,
        line: line_no,
    })
}
