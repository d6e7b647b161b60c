//! Tests for SQL statement generation.

use std::io::Write;

use rowaug_model::AugmentError;
use rowaug_sql::{SqlCodeGenerator, SqlConfig, quote_value};

fn csv_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_quote_value() {
    assert_eq!(quote_value(""), "NULL");
    assert_eq!(quote_value("42"), "42");
    assert_eq!(quote_value("3.14"), "3.14");
    assert_eq!(quote_value("-1"), "-1");
    assert_eq!(quote_value("text"), "'text'");
    assert_eq!(quote_value("it's"), "'it''s'");
}

#[test]
fn test_drop_and_create_table() {
    let file = csv_file("id;name;age\n");
    let mut config = SqlConfig::new("people", "TEXT");
    config
        .types
        .insert("int".to_string(), "INT(11)".to_string());
    config.columns.insert("id".to_string(), "int".to_string());
    config
        .columns
        .insert("age".to_string(), "TINYINT".to_string());

    let generator = SqlCodeGenerator::from_csv(file.path(), b';', config).unwrap();

    assert_eq!(generator.drop_table(), "DROP TABLE IF EXISTS `people`;");
    assert_eq!(
        generator.create_table(),
        "CREATE TABLE `people` (`id` INT(11),`name` TEXT,`age` TINYINT);"
    );
}

#[test]
fn test_column_type_lookup_is_case_insensitive() {
    let file = csv_file("ID;Name\n");
    let mut config = SqlConfig::new("t", "TEXT");
    config.columns.insert("id".to_string(), "INT".to_string());

    let generator = SqlCodeGenerator::from_csv(file.path(), b';', config).unwrap();
    assert_eq!(
        generator.create_table(),
        "CREATE TABLE `t` (`ID` INT,`Name` TEXT);"
    );
}

#[test]
fn test_insert_statements() {
    let file = csv_file("id;name\n1;anna\n2;o'brien\n;\n3\n");
    let config = SqlConfig::new("people", "TEXT");
    let mut generator = SqlCodeGenerator::from_csv(file.path(), b';', config).unwrap();

    assert_eq!(
        generator.insert_statements().unwrap(),
        "INSERT INTO `people` VALUES (1,'anna'),(2,'o''brien'),(3,NULL);"
    );
}

#[test]
fn test_insert_statements_with_no_data() {
    let file = csv_file("id;name\n");
    let config = SqlConfig::new("people", "TEXT");
    let mut generator = SqlCodeGenerator::from_csv(file.path(), b';', config).unwrap();

    assert_eq!(generator.insert_statements().unwrap(), "");
}

#[test]
fn test_missing_table_name_is_rejected() {
    let file = csv_file("id\n1\n");
    let config = SqlConfig::new("  ", "TEXT");
    assert!(matches!(
        SqlCodeGenerator::from_csv(file.path(), b';', config),
        Err(AugmentError::Configuration(_))
    ));
}

#[test]
fn test_missing_default_type_is_rejected() {
    let file = csv_file("id\n1\n");
    let config = SqlConfig::new("people", "");
    assert!(matches!(
        SqlCodeGenerator::from_csv(file.path(), b';', config),
        Err(AugmentError::Configuration(_))
    ));
}

#[test]
fn test_config_deserializes_from_json() {
    let config: SqlConfig = serde_json::from_str(
        r#"{
            "table": "people",
            "default_type": "TEXT",
            "types": {"int": "INT(11)"},
            "columns": {"id": "int"}
        }"#,
    )
    .unwrap();
    assert_eq!(config.table, "people");
    assert_eq!(config.columns.get("id"), Some(&"int".to_string()));
}
