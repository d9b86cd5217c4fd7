//! Metadata Codec
//!
//! Bidirectional mapping between [`crate::domain::Item`] and its on-disk
//! markdown document.

mod document;
pub mod header;

pub use document::{decode, encode};
