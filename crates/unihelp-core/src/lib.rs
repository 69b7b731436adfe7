//! Unihelp Core - Records produced by the document processing pipeline.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;
