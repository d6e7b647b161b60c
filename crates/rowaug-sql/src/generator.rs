//! The SQL code generator.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rowaug_ingest::{CsvReader, ReadMode};
use rowaug_model::{AugmentError, Result};

/// Configuration for SQL generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlConfig {
    /// Target table name.
    pub table: String,
    /// Column type used when no override matches.
    pub default_type: String,
    /// Named type aliases, e.g. `"int" -> "INT(11)"`.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
    /// Per-column overrides (keys compared lowercased): either the name of
    /// a type alias or a literal SQL type.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl SqlConfig {
    pub fn new(table: impl Into<String>, default_type: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            default_type: default_type.into(),
            types: BTreeMap::new(),
            columns: BTreeMap::new(),
        }
    }

    fn check(&self) -> Result<()> {
        if self.table.trim().is_empty() {
            return Err(AugmentError::Configuration(
                "configuration option 'table' is missing".to_string(),
            ));
        }
        if self.default_type.trim().is_empty() {
            return Err(AugmentError::Configuration(
                "configuration option 'default_type' is missing".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates SQL statements for one delimited input file with a header row.
pub struct SqlCodeGenerator {
    config: SqlConfig,
    header: Vec<String>,
    reader: CsvReader,
}

impl SqlCodeGenerator {
    pub fn from_csv(path: impl AsRef<Path>, delimiter: u8, config: SqlConfig) -> Result<Self> {
        config.check()?;
        let reader = CsvReader::open(path.as_ref(), delimiter)?;
        let header = reader
            .header()
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        if header.is_empty() {
            return Err(AugmentError::Configuration(format!(
                "input file '{}' has no header row",
                path.as_ref().display()
            )));
        }
        Ok(Self {
            config,
            header,
            reader,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn drop_table(&self) -> String {
        format!("DROP TABLE IF EXISTS `{}`;", self.config.table)
    }

    pub fn create_table(&self) -> String {
        let columns: Vec<String> = self
            .header
            .iter()
            .map(|name| format!("`{}` {}", name, self.column_type(name)))
            .collect();
        format!(
            "CREATE TABLE `{}` ({});",
            self.config.table,
            columns.join(",")
        )
    }

    /// Reads the remaining data records and renders them as one batch
    /// `INSERT` statement. Returns the empty string when the file holds no
    /// data records.
    ///
    /// Records shorter than the header are right-padded with NULL.
    pub fn insert_statements(&mut self) -> Result<String> {
        let mut rows = Vec::new();
        while let Some(record) = self.reader.next_record(ReadMode::SkipEmptyLines)? {
            let mut values: Vec<String> = record.iter().map(|field| quote_value(field)).collect();
            while values.len() < self.header.len() {
                values.push("NULL".to_string());
            }
            rows.push(format!("({})", values.join(",")));
        }
        debug!(table = %self.config.table, rows = rows.len(), "rendered insert rows");
        if rows.is_empty() {
            return Ok(String::new());
        }
        Ok(format!(
            "INSERT INTO `{}` VALUES {};",
            self.config.table,
            rows.join(",")
        ))
    }

    /// Resolves the SQL type for a column: a per-column override (possibly
    /// through a type alias), else the default type.
    fn column_type(&self, column: &str) -> &str {
        let key = column.to_lowercase();
        match self.config.columns.get(&key) {
            None => &self.config.default_type,
            Some(alias) => self.config.types.get(alias).unwrap_or(alias),
        }
    }
}

/// Quotes one value for use in a SQL statement: empty becomes NULL, numbers
/// stay bare, everything else is single-quoted with `''` escaping.
pub fn quote_value(value: &str) -> String {
    if value.is_empty() {
        return "NULL".to_string();
    }
    if value.parse::<f64>().is_ok() {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "''"))
}
