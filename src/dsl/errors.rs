// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use crate::error::LayoutError;
use crate::geometry::ParseDirectionError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading a layout description. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum DslError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: malformed constraint '{text}', expected KIND(a, b, direction)")]
    MalformedConstraint { line: usize, text: String },

    #[error("line {line}: unknown constraint kind '{kind}'")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: {source}")]
    BadDirection {
        line: usize,
        #[source]
        source: ParseDirectionError,
    },

    #[error("line {line}: tile block has no component name before it")]
    TileWithoutName { line: usize },

    #[error("line {line}: tile block for '{name}' is never closed")]
    UnterminatedTile { line: usize, name: String },

    #[error("line {line}: tile for '{name}' is empty")]
    EmptyTile { line: usize, name: String },

    #[error("line {line}: constraint references '{name}', which has no tile")]
    UnknownComponent { line: usize, name: String },

    #[error("line {line}: {source}")]
    Layout {
        line: usize,
        #[source]
        source: LayoutError,
    },
}

impl DslError {
    /// The offending line, when the error has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            DslError::Io { .. } => None,
            DslError::MalformedConstraint { line, .. }
            | DslError::UnknownKind { line, .. }
            | DslError::BadDirection { line, .. }
            | DslError::TileWithoutName { line }
            | DslError::UnterminatedTile { line, .. }
            | DslError::EmptyTile { line, .. }
            | DslError::UnknownComponent { line, .. }
            | DslError::Layout { line, .. } => Some(*line),
        }
    }
}

pub type Result<T> = std::result::Result<T, DslError>;
