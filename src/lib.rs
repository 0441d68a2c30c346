pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod panel;
pub mod projection;
pub mod scene;
pub mod validate;
pub mod wasm;

pub use error::AutomationError;
