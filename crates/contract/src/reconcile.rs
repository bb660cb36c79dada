//! Cross-source reconciliation.
//!
//! Reconciliation compares two representations of the same logical entity,
//! typically the view returned by the primary API and the row read from the
//! backing store, and reports every difference except at paths declared
//! server-generated. Ignore paths use a small expression syntax:
//!
//! - `field` - a root-level field
//! - `field.nested` - a nested field
//! - `addresses[*].id` - a field inside every element of an array
//! - `addresses[2].id` - a field inside one specific element
//!
//! [`TimeWindow`] complements the structural check for timestamp fields:
//! a server-assigned creation time cannot equal anything known in advance,
//! but it must fall strictly inside the window captured around the
//! mutating call. Timestamps are parsed as zoned RFC 3339 values and
//! normalized to UTC before comparison, so offset representation cannot
//! cause false mismatches.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{ContractError, ContractResult};
use crate::verify::type_name;

/// One segment of a reconciliation path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Seg {
    Field(String),
    Index(usize),
    AnyIndex,
}

/// A set of path expressions excluded from reconciliation.
#[derive(Debug, Clone, Default)]
pub struct IgnorePaths {
    patterns: Vec<Vec<Seg>>,
}

impl IgnorePaths {
    /// An empty set: every difference counts.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses a set of path expressions.
    pub fn parse(patterns: &[&str]) -> ContractResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| parse_pattern(p))
            .collect::<ContractResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    fn is_ignored(&self, path: &[Seg]) -> bool {
        self.patterns.iter().any(|pattern| {
            pattern.len() == path.len()
                && pattern.iter().zip(path).all(|(p, s)| match (p, s) {
                    (Seg::AnyIndex, Seg::Index(_)) => true,
                    (p, s) => p == s,
                })
        })
    }
}

fn parse_pattern(pattern: &str) -> ContractResult<Vec<Seg>> {
    let invalid = |reason: &str| {
        ContractError::construction(format!("invalid ignore path '{}': {}", pattern, reason))
    };

    if pattern.is_empty() {
        return Err(invalid("empty path"));
    }

    let mut segs = Vec::new();
    for part in pattern.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };
        if name.is_empty() {
            return Err(invalid("empty segment"));
        }
        segs.push(Seg::Field(name.to_string()));

        while !rest.is_empty() {
            let close = rest.find(']').ok_or_else(|| invalid("unclosed '['"))?;
            let inner = &rest[1..close];
            if inner == "*" {
                segs.push(Seg::AnyIndex);
            } else {
                let index: usize = inner
                    .parse()
                    .map_err(|_| invalid("index must be a number or '*'"))?;
                segs.push(Seg::Index(index));
            }
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(invalid("unexpected text after ']'"));
            }
        }
    }
    Ok(segs)
}

fn render_path(path: &[Seg]) -> String {
    if path.is_empty() {
        return "(root)".to_string();
    }
    let mut out = String::new();
    for seg in path {
        match seg {
            Seg::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            Seg::Index(i) => out.push_str(&format!("[{}]", i)),
            Seg::AnyIndex => out.push_str("[*]"),
        }
    }
    out
}

/// Compares two entity representations field for field.
///
/// Returns one message per difference: a value mismatch, a type mismatch,
/// or a field present on only one side. Paths covered by `ignore` are
/// skipped entirely, including their presence. Object key order never
/// matters; array elements compare index for index.
pub fn reconcile(actual: &Value, expected: &Value, ignore: &IgnorePaths) -> Vec<String> {
    let mut failures = Vec::new();
    let mut path = Vec::new();
    diff(actual, expected, ignore, &mut path, &mut failures);
    failures
}

fn diff(
    actual: &Value,
    expected: &Value,
    ignore: &IgnorePaths,
    path: &mut Vec<Seg>,
    failures: &mut Vec<String>,
) {
    if ignore.is_ignored(path) {
        return;
    }

    match (actual, expected) {
        (Value::Object(got), Value::Object(want)) => {
            for (key, wanted) in want {
                path.push(Seg::Field(key.clone()));
                match got.get(key) {
                    Some(value) => diff(value, wanted, ignore, path, failures),
                    None => {
                        if !ignore.is_ignored(path) {
                            failures.push(format!(
                                "missing field {}: expected {}",
                                render_path(path),
                                wanted
                            ));
                        }
                    }
                }
                path.pop();
            }
            for (key, value) in got {
                if want.contains_key(key) {
                    continue;
                }
                path.push(Seg::Field(key.clone()));
                if !ignore.is_ignored(path) {
                    failures.push(format!(
                        "unexpected field {} = {}",
                        render_path(path),
                        value
                    ));
                }
                path.pop();
            }
        }
        (Value::Array(got), Value::Array(want)) => {
            if got.len() != want.len() {
                failures.push(format!(
                    "array length mismatch at {}: expected {}, got {}",
                    render_path(path),
                    want.len(),
                    got.len()
                ));
            }
            for (i, (value, wanted)) in got.iter().zip(want).enumerate() {
                path.push(Seg::Index(i));
                diff(value, wanted, ignore, path, failures);
                path.pop();
            }
        }
        _ if std::mem::discriminant(actual) != std::mem::discriminant(expected) => {
            failures.push(format!(
                "type mismatch at {}: expected {} ({}), got {} ({})",
                render_path(path),
                type_name(expected),
                expected,
                type_name(actual),
                actual
            ));
        }
        _ => {
            if actual != expected {
                failures.push(format!(
                    "value mismatch at {}: expected {}, got {}",
                    render_path(path),
                    expected,
                    actual
                ));
            }
        }
    }
}

/// Gets a value using the same path notation as ignore paths, with
/// concrete indexes only.
///
/// Supports `field`, `field.nested`, and `field[0]`.
pub fn path_get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('.') {
        if let Some(bracket_pos) = part.find('[') {
            let field_name = &part[..bracket_pos];
            let index_str = &part[bracket_pos + 1..part.len() - 1];

            current = current.get(field_name)?;

            let index: usize = index_str.parse().ok()?;
            current = current.get(index)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current)
}

/// A half-open capture around a mutating call.
///
/// Call [`TimeWindow::open`] before the request and [`OpenWindow::close`]
/// after the response.
#[derive(Debug, Clone, Copy)]
pub struct OpenWindow {
    before: DateTime<Utc>,
}

impl OpenWindow {
    /// Closes the window at the current instant.
    pub fn close(self) -> TimeWindow {
        TimeWindow {
            before: self.before,
            after: Utc::now(),
        }
    }
}

/// A time interval that server-assigned timestamps must fall inside.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    /// Instant captured before the mutating call.
    pub before: DateTime<Utc>,
    /// Instant captured after the response arrived.
    pub after: DateTime<Utc>,
}

impl TimeWindow {
    /// Starts capturing: records "before" at the current instant.
    pub fn open() -> OpenWindow {
        OpenWindow {
            before: Utc::now(),
        }
    }

    /// Builds a window from explicit bounds.
    pub fn new(before: DateTime<Utc>, after: DateTime<Utc>) -> Self {
        Self { before, after }
    }

    /// Whether `t` lies strictly inside the window.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.before < t && t < self.after
    }

    /// Checks one timestamp field of an entity, returning a failure
    /// message when the field is missing, unparseable, or outside the
    /// window.
    pub fn check_field(&self, entity: &Value, path: &str) -> Option<String> {
        let raw = match path_get(entity, path) {
            None => return Some(format!("timestamp field '{}' is missing", path)),
            Some(Value::String(raw)) => raw,
            Some(other) => {
                return Some(format!(
                    "timestamp field '{}' is not a string: {}",
                    path, other
                ));
            }
        };

        let t = match DateTime::parse_from_rfc3339(raw) {
            Ok(t) => t.with_timezone(&Utc),
            Err(e) => {
                return Some(format!(
                    "timestamp field '{}' is not valid RFC 3339: '{}' ({})",
                    path, raw, e
                ));
            }
        };

        if self.contains(t) {
            None
        } else {
            Some(format!(
                "timestamp '{}' = {} outside window {} .. {}",
                path,
                t.to_rfc3339(),
                self.before.to_rfc3339(),
                self.after.to_rfc3339()
            ))
        }
    }

    /// Checks several timestamp fields at once.
    pub fn check_fields(&self, entity: &Value, paths: &[&str]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|path| self.check_field(entity, path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    // =========================================================================
    // Ignore path parsing and matching
    // =========================================================================

    #[test]
    fn test_parse_and_match_any_index() {
        let ignore = IgnorePaths::parse(&["addresses[*].id"]).unwrap();
        let hit = vec![
            Seg::Field("addresses".into()),
            Seg::Index(0),
            Seg::Field("id".into()),
        ];
        let other_index = vec![
            Seg::Field("addresses".into()),
            Seg::Index(7),
            Seg::Field("id".into()),
        ];
        let different_field = vec![
            Seg::Field("addresses".into()),
            Seg::Index(0),
            Seg::Field("street".into()),
        ];
        let shorter = vec![Seg::Field("addresses".into()), Seg::Index(0)];
        assert!(ignore.is_ignored(&hit));
        assert!(ignore.is_ignored(&other_index));
        assert!(!ignore.is_ignored(&different_field));
        assert!(!ignore.is_ignored(&shorter));
    }

    #[test]
    fn test_root_field_pattern_does_not_match_nested() {
        let ignore = IgnorePaths::parse(&["id"]).unwrap();
        assert!(ignore.is_ignored(&[Seg::Field("id".into())]));
        assert!(!ignore.is_ignored(&[
            Seg::Field("addresses".into()),
            Seg::Index(0),
            Seg::Field("id".into()),
        ]));
    }

    #[test]
    fn test_explicit_index_pattern() {
        let ignore = IgnorePaths::parse(&["addresses[1].id"]).unwrap();
        assert!(ignore.is_ignored(&[
            Seg::Field("addresses".into()),
            Seg::Index(1),
            Seg::Field("id".into()),
        ]));
        assert!(!ignore.is_ignored(&[
            Seg::Field("addresses".into()),
            Seg::Index(0),
            Seg::Field("id".into()),
        ]));
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        for bad in ["", "a..b", "addresses[", "addresses[x]", "addresses[0]x"] {
            let err = IgnorePaths::parse(&[bad]).unwrap_err();
            assert!(
                matches!(err, ContractError::Construction { .. }),
                "pattern '{}' must be rejected",
                bad
            );
        }
    }

    // =========================================================================
    // Structural reconciliation
    // =========================================================================

    #[test]
    fn test_identical_entities_reconcile_clean() {
        let entity = json!({"name": "Jos", "addresses": [{"city": "Thu Duc"}]});
        assert!(reconcile(&entity, &entity, &IgnorePaths::none()).is_empty());
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"a": 1, "b": 2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).unwrap();
        assert!(reconcile(&a, &b, &IgnorePaths::none()).is_empty());
    }

    #[test]
    fn test_value_mismatch_reported_with_path() {
        let actual = json!({"user": {"firstName": "Jos"}});
        let expected = json!({"user": {"firstName": "Jane"}});
        let failures = reconcile(&actual, &expected, &IgnorePaths::none());
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("user.firstName"));
        assert!(failures[0].contains("expected \"Jane\""));
    }

    #[test]
    fn test_missing_and_unexpected_fields() {
        let actual = json!({"a": 1, "extra": true});
        let expected = json!({"a": 1, "gone": "x"});
        let failures = reconcile(&actual, &expected, &IgnorePaths::none());
        assert_eq!(failures.len(), 2);
        let joined = failures.join("\n");
        assert!(joined.contains("missing field gone"));
        assert!(joined.contains("unexpected field extra"));
    }

    #[test]
    fn test_type_mismatch_reported() {
        let failures = reconcile(
            &json!({"zip": 70000}),
            &json!({"zip": "70000"}),
            &IgnorePaths::none(),
        );
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("type mismatch at zip"));
        assert!(failures[0].contains("expected a string"));
    }

    #[test]
    fn test_array_compares_index_wise() {
        let actual = json!({"tags": ["a", "b"]});
        let expected = json!({"tags": ["b", "a"]});
        let failures = reconcile(&actual, &expected, &IgnorePaths::none());
        assert_eq!(failures.len(), 2);
        assert!(failures[0].contains("tags[0]"));
    }

    #[test]
    fn test_array_length_mismatch() {
        let failures = reconcile(
            &json!({"tags": ["a"]}),
            &json!({"tags": ["a", "b"]}),
            &IgnorePaths::none(),
        );
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("array length mismatch at tags"));
    }

    #[test]
    fn test_server_generated_fields_ignored() {
        // The API view carries ids and timestamps the request never sent.
        let api_view = json!({
            "id": "u-1",
            "firstName": "Jos",
            "createdAt": "2026-08-23T05:00:00.000000Z",
            "updatedAt": "2026-08-23T05:00:00.000000Z",
            "addresses": [
                {"street": "Main St", "id": "a-1", "customerId": "u-1"},
                {"street": "Second St", "id": "a-2", "customerId": "u-1"}
            ]
        });
        let request = json!({
            "firstName": "Jos",
            "addresses": [
                {"street": "Main St"},
                {"street": "Second St"}
            ]
        });
        let ignore = IgnorePaths::parse(&[
            "id",
            "createdAt",
            "updatedAt",
            "addresses[*].id",
            "addresses[*].customerId",
        ])
        .unwrap();
        assert!(reconcile(&api_view, &request, &ignore).is_empty());

        // The same pair without ignores must report every extra field.
        let failures = reconcile(&api_view, &request, &IgnorePaths::none());
        assert_eq!(failures.len(), 7);
    }

    #[test]
    fn test_ignored_path_suppresses_missing_field_too() {
        let actual = json!({"name": "x"});
        let expected = json!({"name": "x", "updatedAt": "2026-01-01T00:00:00Z"});
        let ignore = IgnorePaths::parse(&["updatedAt"]).unwrap();
        assert!(reconcile(&actual, &expected, &ignore).is_empty());
    }

    // =========================================================================
    // Path lookup
    // =========================================================================

    #[test]
    fn test_path_get_simple() {
        let value = json!({"name": "John"});
        assert_eq!(path_get(&value, "name"), Some(&json!("John")));
    }

    #[test]
    fn test_path_get_nested_array() {
        let value = json!({"data": {"items": [{"id": 1}, {"id": 2}]}});
        assert_eq!(path_get(&value, "data.items[1].id"), Some(&json!(2)));
        assert_eq!(path_get(&value, "data.items[9].id"), None);
    }

    // =========================================================================
    // Time windows
    // =========================================================================

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_window_contains_strictly() {
        let window = TimeWindow::new(utc("2026-08-23T05:00:00Z"), utc("2026-08-23T05:00:10Z"));
        assert!(window.contains(utc("2026-08-23T05:00:05Z")));
        assert!(!window.contains(utc("2026-08-23T05:00:00Z")));
        assert!(!window.contains(utc("2026-08-23T05:00:10Z")));
        assert!(!window.contains(utc("2026-08-23T04:59:59Z")));
    }

    #[test]
    fn test_offset_timestamps_normalized_to_utc() {
        let window = TimeWindow::new(utc("2026-08-23T04:59:59Z"), utc("2026-08-23T05:00:01Z"));
        // 12:00:00 at +07:00 is 05:00:00 UTC.
        let entity = json!({"createdAt": "2026-08-23T12:00:00+07:00"});
        assert_eq!(window.check_field(&entity, "createdAt"), None);
    }

    #[test]
    fn test_out_of_window_reported() {
        let window = TimeWindow::new(utc("2026-08-23T05:00:00Z"), utc("2026-08-23T05:00:10Z"));
        let entity = json!({"createdAt": "2026-08-23T06:00:00Z"});
        let failure = window.check_field(&entity, "createdAt").unwrap();
        assert!(failure.contains("outside window"));
    }

    #[test]
    fn test_missing_and_malformed_timestamps_reported() {
        let window = TimeWindow::new(utc("2026-08-23T05:00:00Z"), utc("2026-08-23T05:00:10Z"));
        let entity = json!({"updatedAt": "yesterday", "counter": 5});

        let failures = window.check_fields(&entity, &["createdAt", "updatedAt", "counter"]);
        assert_eq!(failures.len(), 3);
        assert!(failures[0].contains("is missing"));
        assert!(failures[1].contains("not valid RFC 3339"));
        assert!(failures[2].contains("not a string"));
    }

    #[test]
    fn test_open_close_brackets_now() {
        let open = TimeWindow::open();
        let stamp = Utc::now();
        let window = open.close();
        assert!(window.before <= stamp && stamp <= window.after);
    }
}
