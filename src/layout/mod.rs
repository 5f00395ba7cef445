pub mod base;
pub mod bridge;
pub mod corners;
pub mod theme;

use thiserror::Error;

use crate::color::ColorError;
use crate::store::StoreError;

pub use base::{build_base, BASE_COLLECTION, BASE_MODE};
pub use bridge::{build_bridge, BridgeOptions, BRIDGE_COLLECTION, BRIDGE_MODE};
pub use corners::{CornerDensity, DEFAULT_CORNER_LEVEL};
pub use theme::{build_theme, DARK_MODE, LIGHT_MODE, THEME_COLLECTION};

pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("alias target {path:?} missing from collection {collection:?}")]
    MissingBaseReference { collection: String, path: String },
}
