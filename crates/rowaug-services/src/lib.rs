//! Stateful services used by augmentation rules.
//!
//! Each service is an independent, single-threaded component a pipeline
//! registers once and rules call into while records are processed: unique
//! token issuance, per-cell quota admission, cross-record uniqueness
//! checking, column-name lookup, and email syntax validation.

pub mod email;
pub mod mapper;
pub mod quota;
pub mod token;
pub mod unique;

pub use email::is_valid_email;
pub use mapper::ColumnNameIndexMapper;
pub use quota::{QuotaCell, QuotaNode};
pub use token::{DEFAULT_TOKEN_LENGTH, TokenCase, TokenIssuer};
pub use unique::UniquenessChecker;
