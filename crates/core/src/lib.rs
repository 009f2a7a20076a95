//! Core types for listing entity post-processing
//!
//! This crate provides the types shared by the other crates:
//! - Entity labels and character-offset spans
//! - Annotated corpus examples
//! - Normalized price values
//! - Error types

pub mod entity;
pub mod error;
pub mod price;

pub use entity::{char_len, char_slice, AnnotatedExample, EntityLabel, EntitySpan};
pub use error::{Error, Result};
pub use price::NormalizedPrice;
