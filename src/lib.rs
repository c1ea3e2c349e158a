pub mod config;
pub mod error;
pub mod git_ops;
pub mod ui;
pub mod version;
pub mod workflow;

pub use error::{ReleaseError, Result};
