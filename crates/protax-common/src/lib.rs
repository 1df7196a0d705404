//! Protax Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the protax workspace members.
//!
//! # Overview
//!
//! - **Error Handling**: the [`ProtaxError`] type and [`Result`] alias
//! - **Logging**: fixed-file [`logging::LogConfig`] setup backed by `tracing`
//!
//! # Example
//!
//! ```no_run
//! use protax_common::logging::{init_logging, LogConfig};
//! use tracing::info;
//!
//! fn main() -> protax_common::Result<()> {
//!     let config = LogConfig::builder().log_file("protax.log").build();
//!     let _guard = init_logging(&config)?;
//!
//!     info!("Application started");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{ProtaxError, Result};
