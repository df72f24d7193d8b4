//! List filtering, search and ordering over serialized records.
//!
//! Every resource declares which fields may be filtered on, searched and
//! ordered by. Records are compared in their JSON form, so decimals (which
//! serialize as strings) compare numerically and timestamps compare in time
//! order.

use rust_decimal::Decimal;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

pub const SEARCH_PARAM: &str = "search";
pub const ORDERING_PARAM: &str = "ordering";

#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    pub filters: &'static [&'static str],
    pub search: &'static [&'static str],
    pub ordering: &'static [&'static str],
    /// Used when `?ordering=` is absent or names no allowed field.
    pub default_ordering: &'static str,
}

/// Filters, searches and sorts `records` according to `params`.
///
/// Unknown parameters are ignored. The sort is stable, so records that tie
/// stay in id order.
pub fn apply(spec: &QuerySpec, params: &HashMap<String, String>, records: Vec<Value>) -> Vec<Value> {
    let filters: Vec<(&str, &str)> = spec
        .filters
        .iter()
        .filter_map(|field| params.get(*field).map(|v| (*field, v.as_str())))
        .collect();
    let terms: Vec<String> = params
        .get(SEARCH_PARAM)
        .map(|s| s.split_whitespace().map(str::to_lowercase).collect())
        .unwrap_or_default();

    let mut records: Vec<Value> = records
        .into_iter()
        .filter(|r| filters.iter().all(|(field, want)| field_equals(r.get(*field), want)))
        .filter(|r| terms.iter().all(|term| matches_term(spec.search, r, term)))
        .collect();

    let keys = ordering_keys(spec, params.get(ORDERING_PARAM).map(String::as_str));
    if !keys.is_empty() {
        records.sort_by(|a, b| {
            keys.iter()
                .map(|(field, descending)| {
                    let ord = compare(a.get(*field), b.get(*field));
                    if *descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
    records
}

fn parse_keys<'a>(spec: &QuerySpec, raw: &'a str) -> Vec<(&'a str, bool)> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| match key.strip_prefix('-') {
            Some(field) => (field, true),
            None => (key, false),
        })
        .filter(|(field, _)| spec.ordering.iter().any(|allowed| allowed == field))
        .collect()
}

fn ordering_keys<'a>(spec: &QuerySpec, requested: Option<&'a str>) -> Vec<(&'a str, bool)> {
    let keys = requested.map(|raw| parse_keys(spec, raw)).unwrap_or_default();
    if keys.is_empty() {
        parse_keys(spec, spec.default_ordering)
    } else {
        keys
    }
}

fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

fn field_equals(value: Option<&Value>, want: &str) -> bool {
    let Some(value) = value else {
        return false;
    };
    match value {
        Value::Null => want.is_empty() || want.eq_ignore_ascii_case("null"),
        Value::Bool(b) => match want.to_ascii_lowercase().as_str() {
            "true" | "1" => *b,
            "false" | "0" => !*b,
            _ => false,
        },
        Value::String(s) if s == want => true,
        // A date matches any timestamp on that day.
        Value::String(s) if want.len() == 10 && s.starts_with(want) && s.as_bytes().get(10) == Some(&b'T') => true,
        other => match (decimal(other), Decimal::from_str(want.trim())) {
            (Some(have), Ok(want)) => have == want,
            _ => false,
        },
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        Value::Null => String::new(),
        other => other.to_string().to_lowercase(),
    }
}

fn matches_term(fields: &[&str], record: &Value, term: &str) -> bool {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .any(|value| text(value).contains(term))
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        _ => 4,
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (decimal(a), decimal(b)) {
                return x.cmp(&y);
            }
            match (a, b) {
                (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                (Value::String(x), Value::String(y)) => x.cmp(y),
                _ => rank(a).cmp(&rank(b)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPEC: QuerySpec = QuerySpec {
        filters: &["restaurant_id", "availability", "price"],
        search: &["name"],
        ordering: &["price", "availability"],
        default_ordering: "-price",
    };

    fn records() -> Vec<Value> {
        vec![
            json!({"id": 1, "restaurant_id": 1, "name": "Burger", "price": "5.00", "availability": true}),
            json!({"id": 2, "restaurant_id": 1, "name": "Veggie Burger", "price": "12.50", "availability": false}),
            json!({"id": 3, "restaurant_id": 2, "name": "Fries", "price": "3.50", "availability": true}),
            json!({"id": 4, "restaurant_id": 2, "name": "Cheese Burger", "price": "5.00", "availability": true}),
        ]
    }

    fn ids(records: &[Value]) -> Vec<u64> {
        records.iter().map(|r| r["id"].as_u64().unwrap()).collect()
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_default_ordering_is_stable() {
        let out = apply(&SPEC, &params(&[]), records());
        assert_eq!(ids(&out), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_exact_filters() {
        let out = apply(&SPEC, &params(&[("restaurant_id", "2"), ("availability", "true")]), records());
        assert_eq!(ids(&out), vec![4, 3]);

        let out = apply(&SPEC, &params(&[("price", "5")]), records());
        assert_eq!(ids(&out), vec![1, 4]);
    }

    #[test]
    fn test_search_needs_every_term() {
        let out = apply(&SPEC, &params(&[("search", "BURGER cheese")]), records());
        assert_eq!(ids(&out), vec![4]);
    }

    #[test]
    fn test_explicit_and_unknown_ordering() {
        let out = apply(&SPEC, &params(&[("ordering", "price")]), records());
        assert_eq!(ids(&out), vec![3, 1, 4, 2]);

        let out = apply(&SPEC, &params(&[("ordering", "-availability,price")]), records());
        assert_eq!(ids(&out), vec![3, 1, 4, 2]);

        let out = apply(&SPEC, &params(&[("ordering", "name")]), records());
        assert_eq!(ids(&out), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_unknown_filters_are_ignored() {
        let out = apply(&SPEC, &params(&[("name", "Fries"), ("page", "2")]), records());
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_date_matches_timestamp_day() {
        assert!(field_equals(Some(&json!("2026-10-16T09:30:00Z")), "2026-10-16"));
        assert!(!field_equals(Some(&json!("2026-10-16T09:30:00Z")), "2026-10-17"));
    }
}
