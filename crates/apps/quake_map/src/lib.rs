pub mod config;
pub mod error;
pub mod feeds;
pub mod loader;
pub mod pipeline;

pub use error::AppError;
