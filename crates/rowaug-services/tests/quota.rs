//! Tests for quota cells.

use rowaug_model::AugmentError;
use rowaug_services::{QuotaCell, QuotaNode};

fn flat_targets() -> QuotaNode {
    [
        ("x".to_string(), 10i64),
        ("y".to_string(), 20i64),
        ("z".to_string(), 30i64),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_counts_start_at_zero() {
    let cell = QuotaCell::new(flat_targets()).unwrap();
    assert_eq!(cell.count(&["x"], -1), 0);
    assert_eq!(cell.count(&["y"], -1), 0);
    assert_eq!(cell.count(&["z"], -1), 0);
}

#[test]
fn test_add_within_target() {
    let mut cell = QuotaCell::new(flat_targets()).unwrap();

    assert!(cell.add(5, &["x"], false));
    assert_eq!(cell.count(&["x"], 0), 5);
    assert!(!cell.is_full(&["x"]).unwrap());
}

#[test]
fn test_rejected_add_leaves_state_unchanged() {
    let mut cell = QuotaCell::new(flat_targets()).unwrap();
    cell.add(5, &["x"], false);

    assert!(!cell.add(50, &["x"], false));
    assert_eq!(cell.count(&["x"], 0), 5);
}

#[test]
fn test_add_to_undefined_key_is_rejected() {
    let mut cell = QuotaCell::new(flat_targets()).unwrap();
    assert!(!cell.add(5, &["a"], false));
    assert_eq!(cell.count(&["a"], -1), -1); // still undefined
}

#[test]
fn test_has_target() {
    let cell = QuotaCell::new(flat_targets()).unwrap();
    assert!(cell.has_target(&["x"]));
    assert!(cell.has_target(&["y"]));
    assert!(!cell.has_target(&["not in list"]));
}

#[test]
fn test_scalar_target_uses_empty_path() {
    let mut cell = QuotaCell::new(100i64).unwrap();

    assert!(cell.add(40, &[], false));
    assert_eq!(cell.count(&[], 0), 40);
    assert!(cell.can_add(60, &[]));
    assert!(!cell.can_add(61, &[]));
    assert!(!cell.is_full(&[]).unwrap());
}

#[test]
fn test_forced_add_may_exceed_target() {
    let mut cell = QuotaCell::new(100i64).unwrap();
    cell.add(40, &[], false);

    assert!(cell.add(100, &[], true));
    assert_eq!(cell.count(&[], 0), 140);
    assert!(cell.is_full(&[]).unwrap());
}

#[test]
fn test_counts_may_go_negative() {
    let mut cell = QuotaCell::new(100i64).unwrap();
    cell.add(140, &[], true);

    assert!(cell.add(-200, &[], true));
    assert_eq!(cell.count(&[], 0), -60);
    // only the upper bound is checked
    assert!(!cell.is_full(&[]).unwrap());
}

#[test]
fn test_is_full_on_undefined_key_fails() {
    let cell = QuotaCell::new(flat_targets()).unwrap();
    assert!(matches!(
        cell.is_full(&["a"]),
        Err(AugmentError::UndefinedKey(_))
    ));
}

#[test]
fn test_nested_targets() {
    let targets: QuotaNode = serde_json::from_str(
        r#"{
            "north": {"089": 2, "0871": 1},
            "south": {"0711": 3}
        }"#,
    )
    .unwrap();
    let mut cell = QuotaCell::new(targets).unwrap();

    assert_eq!(cell.target(&["north", "0871"], 0), 1);
    assert!(cell.has_target(&["north"]));
    assert!(cell.has_target(&["north", "089"]));

    assert!(cell.add(2, &["north", "089"], false));
    assert!(cell.is_full(&["north", "089"]).unwrap());
    assert!(!cell.add(1, &["north", "089"], false));

    assert!(cell.add(-1, &["north", "089"], false));
    assert_eq!(cell.count(&["north", "089"], 0), 1);
    assert!(!cell.is_full(&["north", "089"]).unwrap());
}

#[test]
fn test_subtree_path_is_not_a_leaf() {
    let targets: QuotaNode = serde_json::from_str(r#"{"a": {"b": 5}}"#).unwrap();
    let cell = QuotaCell::new(targets).unwrap();

    // a subtree has no integer target of its own
    assert_eq!(cell.target(&["a"], -1), -1);
    assert!(matches!(
        cell.is_full(&["a"]),
        Err(AugmentError::UndefinedKey(_))
    ));
}

#[test]
fn test_forced_add_materializes_undeclared_count() {
    let mut cell = QuotaCell::new(flat_targets()).unwrap();

    assert!(cell.add(3, &["extra"], true));
    assert_eq!(cell.count(&["extra"], 0), 3);
    // the target tree is untouched
    assert!(!cell.has_target(&["extra"]));
}

#[test]
fn test_empty_target_tree_is_rejected() {
    let targets = QuotaNode::Node(std::collections::BTreeMap::new());
    assert!(matches!(
        QuotaCell::new(targets),
        Err(AugmentError::Configuration(_))
    ));
}
