//! Tests for the shared augmentation context and registered services.

use rowaug_core::{AugmentationContext, Augmentor};
use rowaug_model::{FieldMap, Value};
use rowaug_services::{
    ColumnNameIndexMapper, QuotaCell, QuotaNode, TokenCase, TokenIssuer, UniquenessChecker,
};

#[test]
fn test_append_to_unset_key() {
    let mut ctx = AugmentationContext::new();
    ctx.append_to("foo", 1);
    assert_eq!(ctx.get("foo"), Some(&Value::from(vec![1])));
}

#[test]
fn test_append_to_unset_key_wraps_a_list_value() {
    // the first append always yields a one-element list, so a list value
    // is nested rather than taken over as-is
    let mut ctx = AugmentationContext::new();
    ctx.append_to("foo", vec!["a", "b"]);
    assert_eq!(
        ctx.get("foo"),
        Some(&Value::List(vec![Value::from(vec!["a", "b"])]))
    );

    // later appends extend the outer list
    ctx.append_to("foo", "c");
    assert_eq!(
        ctx.get("foo"),
        Some(&Value::List(vec![
            Value::from(vec!["a", "b"]),
            Value::from("c"),
        ]))
    );
}

#[test]
fn test_append_to_existing_list() {
    let mut ctx = AugmentationContext::new();
    ctx.set("foo", vec![1]);
    ctx.append_to("foo", 2);
    ctx.append_to("foo", "3");
    assert_eq!(
        ctx.get("foo"),
        Some(&Value::List(vec![
            Value::Int(1),
            Value::Int(2),
            Value::from("3"),
        ]))
    );
}

#[test]
fn test_append_to_scalar_coerces_to_list() {
    let mut ctx = AugmentationContext::new();
    ctx.set("foo", 1);
    ctx.append_to("foo", 2);
    assert_eq!(ctx.get("foo"), Some(&Value::from(vec![1, 2])));
}

#[test]
fn test_append_to_list_value_appends_elements() {
    let mut ctx = AugmentationContext::new();
    ctx.set("foo", vec![1, 2]);
    ctx.append_to("foo", vec![3, 4]);
    assert_eq!(ctx.get("foo"), Some(&Value::from(vec![1, 2, 3, 4])));
}

#[test]
fn test_append_to_map_merges_key_wise() {
    let mut ctx = AugmentationContext::new();
    let map = |pairs: &[(&str, &str)]| {
        Value::Map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::from(*v)))
                .collect(),
        )
    };

    ctx.set("foo", map(&[("a", "A"), ("b", "b")]));
    ctx.append_to("foo", map(&[("a", "a"), ("b", "b")]));
    assert_eq!(ctx.get("foo"), Some(&map(&[("a", "a"), ("b", "b")])));

    ctx.append_to("foo", map(&[("b", "B")]));
    assert_eq!(ctx.get("foo"), Some(&map(&[("a", "a"), ("b", "B")])));
}

#[test]
fn test_extensions_hold_globals_for_rules() {
    let ctx = {
        let mut ctx = AugmentationContext::new();
        ctx.set("study_id", 42);
        ctx
    };
    let mut augmentor = Augmentor::with_context(ctx);
    augmentor
        .add_rule("globals", |ctx, _record| {
            let mut out = FieldMap::new();
            out.insert("study_id", ctx.get("study_id").cloned().unwrap_or(Value::Null));
            Ok(out)
        })
        .unwrap();

    let result = augmentor.augment(&[]).unwrap();
    assert_eq!(result.get("study_id"), Some(&Value::Int(42)));
}

#[test]
fn test_token_rule_issues_unique_tokens() {
    let ctx =
        AugmentationContext::new().with_tokens(TokenIssuer::new(6, TokenCase::Upper).unwrap());
    let mut augmentor = Augmentor::with_context(ctx);
    augmentor
        .add_rule("token", |ctx, _record| {
            let token = ctx.tokens_mut()?.get_unique_token()?;
            let mut out = FieldMap::new();
            out.insert("token", token);
            Ok(out)
        })
        .unwrap();

    let first = augmentor.augment(&[]).unwrap();
    let second = augmentor.augment(&[]).unwrap();
    assert_ne!(first.get("token"), second.get("token"));
}

#[test]
fn test_quota_rule_draws_a_sample() {
    let targets: QuotaNode = [("0871".to_string(), 1i64)].into_iter().collect();
    let ctx = AugmentationContext::new().with_quota(QuotaCell::new(targets).unwrap());
    let mut augmentor = Augmentor::with_context(ctx);
    augmentor
        .add_rule("quota", |ctx, record: &[String]| {
            let area = record[0].clone();
            let admitted = ctx.quota_mut()?.add(1, &[area.as_str()], false);
            let mut out = FieldMap::new();
            out.insert("in_sample", admitted);
            Ok(out)
        })
        .unwrap();

    let rec = vec!["0871".to_string()];
    assert_eq!(
        augmentor.augment(&rec).unwrap().get("in_sample"),
        Some(&Value::Bool(true))
    );
    // quota of one is used up now
    assert_eq!(
        augmentor.augment(&rec).unwrap().get("in_sample"),
        Some(&Value::Bool(false))
    );
}

#[test]
fn test_uniqueness_rule_flags_repeats_across_records() {
    let ctx = AugmentationContext::new().with_unique(UniquenessChecker::new());
    let mut augmentor = Augmentor::with_context(ctx);
    augmentor
        .add_rule("unique email", |ctx, record: &[String]| {
            let is_new = ctx.unique_mut()?.is_new(&record[0], "email", false);
            let mut out = FieldMap::new();
            out.insert("is_unique_email", is_new);
            Ok(out)
        })
        .unwrap();

    let first = augmentor.augment(&["a@example.com".to_string()]).unwrap();
    let second = augmentor.augment(&["A@example.com".to_string()]).unwrap();
    assert_eq!(first.get("is_unique_email"), Some(&Value::Bool(true)));
    assert_eq!(second.get("is_unique_email"), Some(&Value::Bool(false)));
}

#[test]
fn test_mapper_addresses_record_fields_by_name() {
    let ctx = AugmentationContext::new()
        .with_mapper(ColumnNameIndexMapper::new(["id", "name", "email"]).unwrap());
    let mut augmentor = Augmentor::with_context(ctx);
    augmentor
        .add_rule("email", |ctx, record: &[String]| {
            let index = ctx.mapper()?.require_column_number("email")?;
            let mut out = FieldMap::new();
            out.insert("email", record[index].to_lowercase());
            Ok(out)
        })
        .unwrap();

    let rec = vec![
        "1".to_string(),
        "Anna".to_string(),
        "Anna@Example.COM".to_string(),
    ];
    let result = augmentor.augment(&rec).unwrap();
    assert_eq!(result.get("email"), Some(&Value::from("anna@example.com")));
}

#[test]
fn test_overwrite_augmented_adjusts_earlier_output() {
    let mut augmentor = Augmentor::new();
    augmentor
        .add_rule("emit", |_ctx, _record| {
            let mut out = FieldMap::new();
            out.insert("status", "preliminary");
            Ok(out)
        })
        .unwrap();
    augmentor
        .add_rule("fixup", |ctx, _record| {
            ctx.overwrite_augmented("status", "final");
            Ok(FieldMap::new())
        })
        .unwrap();

    let result = augmentor.augment(&[]).unwrap();
    assert_eq!(result.get("status"), Some(&Value::from("final")));
}
