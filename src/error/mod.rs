use thiserror::Error;

use crate::color::ColorError;
use crate::export::ExportError;
use crate::layout::LayoutError;
use crate::store::StoreError;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Top-level failure surfaced to the host for a single message. Derivation
/// errors abort before any store write; store/layout errors abort mid-write
/// with whatever was already written left in place.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("failed to serialize export document")]
    Serialize(#[from] serde_json::Error),
}
