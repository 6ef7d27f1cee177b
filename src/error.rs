use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating parameters or producing terrain geometry.
#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("parameter `{name}` is not a finite number")]
    ArithmeticDegeneracy { name: &'static str },

    #[error("height field resolution {actual} does not match requested resolution {expected}")]
    ResolutionMismatch { expected: usize, actual: usize },

    #[error("config error in {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TerrainError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TerrainError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;
