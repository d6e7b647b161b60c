//! SQL statement generation from delimited data files.
//!
//! Produces `DROP TABLE`, `CREATE TABLE`, and batch `INSERT` statements for
//! loading a delimited file into a database, much like a `mysqldump` output.
//! Identifier quoting uses backticks, so the output targets MySQL-family
//! databases.

pub mod generator;

pub use generator::{SqlCodeGenerator, SqlConfig, quote_value};
