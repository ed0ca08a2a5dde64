use crate::value::Value;
use std::cmp::Ordering;

/// Total type-aware comparator used by the sort surface.
///
/// Ordering rules:
/// 1. Canonical variant rank (`Null` always last ascending)
/// 2. Variant-specific comparison for same-ranked values
///
/// Text compares case-folded; equal-folded strings report `Equal` so a stable
/// sort preserves their input order. Mixed-variant comparisons are rank-only
/// and must remain deterministic.
#[must_use]
pub fn order_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    order_cmp_same_rank(left, right)
}

fn order_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Rank(a), Value::Rank(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => fold_cmp(a, b),
        _ => Ordering::Equal,
    }
}

fn fold_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
