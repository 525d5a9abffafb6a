pub mod analysis;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod submitter;

pub use error::{Error, Result};
