pub mod color;
pub mod engine;
pub mod error;
pub mod export;
pub mod fonts;
pub mod layout;
pub mod logging;
pub mod palette;
pub mod store;

pub use engine::{Engine, EngineConfig, Outcome, Request, Response};
pub use error::{EngineError, EngineResult};
