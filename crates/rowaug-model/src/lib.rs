//! Core data model for the row augmentation toolkit.
//!
//! This crate defines the types shared by every other crate in the
//! workspace: the error taxonomy, the dynamically typed [`Value`], the
//! insertion-ordered [`FieldMap`] that augmentation rules produce, and
//! helpers for addressing fields of a raw record.

pub mod error;
pub mod fields;
pub mod record;
pub mod value;

pub use error::{AugmentError, Result};
pub use fields::FieldMap;
pub use record::{get_by_column, get_by_index, spreadsheet_column, to_named};
pub use value::Value;
