//! Rule-based row augmentation.
//!
//! An [`Augmentor`] runs a configurable, ordered set of named rules over
//! one record at a time. Rules share an [`AugmentationContext`] holding
//! registered services (token issuer, quota cell, uniqueness checker,
//! column mapper) and ad hoc named values, and each rule contributes a map
//! of new fields to the record's augmented result.
//!
//! ```
//! use rowaug_core::Augmentor;
//! use rowaug_model::FieldMap;
//!
//! let mut augmentor = Augmentor::new();
//! augmentor
//!     .add_rule("upper", |_ctx, record: &[String]| {
//!         let mut fields = FieldMap::new();
//!         fields.insert("upper", record[0].to_uppercase());
//!         Ok(fields)
//!     })
//!     .unwrap();
//!
//! let result = augmentor.augment(&["hello".to_string()]).unwrap();
//! assert_eq!(result.get("upper").unwrap().as_str(), Some("HELLO"));
//! ```

pub mod context;
pub mod pipeline;

pub use context::AugmentationContext;
pub use pipeline::{Augmentor, RuleFn};
