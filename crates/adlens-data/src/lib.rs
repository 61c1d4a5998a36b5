//! Dataset loading for the AdLens advertising analytics pipeline.
//!
//! Reads the cross-platform advertising dataset (one CSV row per
//! date/platform pair) into typed [`AdRecord`] values. The loader validates
//! the header and aborts on missing files or absent columns; row values are
//! taken as-is with no range enforcement.

#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod record;

pub use error::{DataError, Result};
pub use loader::{REQUIRED_COLUMNS, load_records};
pub use record::AdRecord;
