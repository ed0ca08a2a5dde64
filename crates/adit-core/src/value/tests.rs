use crate::{
    types::Timestamp,
    value::{Value, order_cmp},
};
use std::cmp::Ordering;

#[test]
fn test_text_compares_case_folded() {
    let a = Value::text("Granite");
    let b = Value::text("granite");

    assert_eq!(order_cmp(&a, &b), Ordering::Equal);
}

#[test]
fn test_text_fold_orders_by_letter() {
    let a = Value::text("Basalt");
    let b = Value::text("copper");

    assert_eq!(order_cmp(&a, &b), Ordering::Less);
}

#[test]
fn test_timestamps_compare_numerically() {
    let early = Value::from(Timestamp::from_seconds(100));
    let late = Value::from(Timestamp::from_seconds(2_000));

    // A string comparison of "100" and "2000" would invert this.
    assert_eq!(order_cmp(&early, &late), Ordering::Less);
}

#[test]
fn test_rank_orders_by_intrinsic_rank() {
    // High(2) > Medium(1) > Low(0), not alphabetical.
    assert_eq!(order_cmp(&Value::Rank(0), &Value::Rank(2)), Ordering::Less);
    assert_eq!(
        order_cmp(&Value::Rank(2), &Value::Rank(1)),
        Ordering::Greater
    );
}

#[test]
fn test_null_sorts_last() {
    let present = Value::from(Timestamp::from_seconds(1));

    assert_eq!(order_cmp(&Value::Null, &present), Ordering::Greater);
    assert_eq!(order_cmp(&present, &Value::Null), Ordering::Less);
    assert_eq!(order_cmp(&Value::Null, &Value::Null), Ordering::Equal);
}

#[test]
fn test_mixed_variants_order_by_canonical_rank() {
    let text = Value::text("zzz");
    let ts = Value::from(Timestamp::MAX);

    assert_eq!(order_cmp(&ts, &text), Ordering::Less);
    assert_eq!(order_cmp(&text, &ts), Ordering::Greater);
}

#[test]
fn test_option_conversion() {
    let none: Option<Timestamp> = None;
    assert!(Value::from(none).is_null());

    let some = Some(Timestamp::from_seconds(7));
    assert_eq!(Value::from(some), Value::Timestamp(Timestamp::from_seconds(7)));
}

#[test]
fn test_search_text_only_for_text() {
    assert_eq!(Value::text("drill").as_search_text(), Some("drill"));
    assert_eq!(Value::Uint(5).as_search_text(), None);
    assert_eq!(Value::Null.as_search_text(), None);
}
