// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Errors raised while building a layout problem.
//!
//! These are caller mistakes (bad names, malformed tiles), reported before any
//! search starts. Search outcomes live in [`crate::engine::SolveFailure`].

use thiserror::Error;

/// Errors from the programmatic layout API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("component '{0}' is already defined")]
    DuplicateComponent(String),

    #[error("constraint references unknown component '{0}'")]
    UnknownComponent(String),

    #[error("constraint relates component '{0}' to itself")]
    SelfConstraint(String),

    #[error("tile for '{name}' is empty")]
    EmptyTile { name: String },

    #[error("tile mask has {actual} cells but {width}x{height} needs {expected}")]
    MaskSizeMismatch {
        width: i32,
        height: i32,
        expected: usize,
        actual: usize,
    },

    #[error("tile dimensions {width}x{height} must both be positive")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Result type alias for layout construction.
pub type Result<T> = std::result::Result<T, LayoutError>;
