//! Input bounding and batching.
//!
//! Extraction output is untrusted: strings and arrays are truncated and nesting
//! is capped before any matching or diffing sees the data.

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Config;

/// Marker appended to truncated strings.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    pub max_string_length: usize,
    pub max_array_length: usize,
    pub max_depth: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Sanitizer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_string_length: config.max_string_length,
            max_array_length: config.max_array_length,
            max_depth: config.max_depth,
        }
    }

    /// Returns a bounded copy of `value`.
    ///
    /// Containers nested deeper than `max_depth` are removed from their parent
    /// (the object key or array slot disappears). A root that is itself too
    /// deep becomes `null`.
    pub fn sanitize(&self, value: Value) -> Value {
        let mut pruned = 0usize;
        let bounded = self.sanitize_at(value, 0, &mut pruned);
        if pruned > 0 {
            debug!(pruned, max_depth = self.max_depth, "pruned over-deep values");
        }
        bounded.unwrap_or(Value::Null)
    }

    fn sanitize_at(&self, value: Value, depth: usize, pruned: &mut usize) -> Option<Value> {
        match value {
            Value::String(s) => Some(Value::String(self.bound_string(s))),
            Value::Array(_) | Value::Object(_) if depth >= self.max_depth => {
                *pruned += 1;
                None
            }
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .take(self.max_array_length)
                    .filter_map(|item| self.sanitize_at(item, depth + 1, pruned))
                    .collect(),
            ),
            Value::Object(map) => {
                let bounded: Map<String, Value> = map
                    .into_iter()
                    .filter_map(|(key, item)| {
                        self.sanitize_at(item, depth + 1, pruned)
                            .map(|item| (key, item))
                    })
                    .collect();
                Some(Value::Object(bounded))
            }
            scalar => Some(scalar),
        }
    }

    pub fn bound_string(&self, value: String) -> String {
        truncate_string(value, self.max_string_length)
    }

    /// Flattens `children` arrays depth-first (pre-order) into a single list.
    ///
    /// Each emitted component has its `children` key removed. The result is
    /// capped at `max_array_length` entries and `max_depth` nesting levels.
    pub fn flatten_children(&self, components: Vec<Value>) -> Vec<Value> {
        let mut flat = Vec::new();
        let mut stack: Vec<(Value, usize)> =
            components.into_iter().rev().map(|c| (c, 0)).collect();

        while let Some((mut component, depth)) = stack.pop() {
            if flat.len() >= self.max_array_length {
                break;
            }
            let children = match component.as_object_mut() {
                Some(obj) => obj.remove("children"),
                None => None,
            };
            flat.push(component);

            if let Some(Value::Array(children)) = children {
                if depth + 1 >= self.max_depth {
                    continue;
                }
                stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
            }
        }

        flat
    }
}

/// Truncates to `max_length` chars, appending [`ELLIPSIS`] when shortened.
pub fn truncate_string(value: String, max_length: usize) -> String {
    let cut = value.char_indices().nth(max_length).map(|(idx, _)| idx);
    match cut {
        None => value,
        Some(cut) => {
            let mut truncated = value;
            truncated.truncate(cut);
            truncated.push_str(ELLIPSIS);
            truncated
        }
    }
}

/// Splits `items` into consecutive batches of at most `size` (minimum 1).
pub fn chunk<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn large_string_arrays_are_bounded() {
        let sanitizer = Sanitizer::default();
        let input = Value::Array(vec![Value::String("x".repeat(5000)); 5000]);

        let bounded = sanitizer.sanitize(input);
        let items = bounded.as_array().expect("array survives");

        assert!(items.len() <= 1000);
        for item in items {
            let s = item.as_str().expect("string survives");
            assert!(s.chars().count() <= sanitizer.max_string_length + ELLIPSIS.len());
            assert!(s.ends_with(ELLIPSIS));
        }
    }

    #[test]
    fn short_values_pass_through_unchanged() {
        let sanitizer = Sanitizer::default();
        let input = json!({"name": "Button", "size": 12, "tags": ["a", "b"], "ok": true});
        assert_eq!(sanitizer.sanitize(input.clone()), input);
    }

    #[test]
    fn nested_values_are_bounded_depth_first() {
        let sanitizer = Sanitizer {
            max_string_length: 3,
            max_array_length: 2,
            max_depth: 32,
        };
        let input = json!({"outer": {"list": ["abcdef", "gh", "ignored"]}});
        let bounded = sanitizer.sanitize(input);
        assert_eq!(bounded, json!({"outer": {"list": ["abc...", "gh"]}}));
    }

    #[test]
    fn deep_nesting_is_pruned_at_depth_cap() {
        let sanitizer = Sanitizer {
            max_string_length: 100,
            max_array_length: 100,
            max_depth: 3,
        };
        let input = json!({"a": {"b": {"c": {"d": 1}}, "leaf": "kept"}, "list": [[1], [[2]]]});
        let bounded = sanitizer.sanitize(input);
        assert_eq!(
            bounded,
            json!({"a": {"b": {}, "leaf": "kept"}, "list": [[1], []]})
        );
    }

    #[test]
    fn over_deep_root_becomes_null() {
        let sanitizer = Sanitizer {
            max_string_length: 100,
            max_array_length: 100,
            max_depth: 0,
        };
        assert_eq!(sanitizer.sanitize(json!({"a": 1})), Value::Null);
        assert_eq!(sanitizer.sanitize(json!("ok")), json!("ok"));
    }

    #[test]
    fn truncate_string_counts_chars_not_bytes() {
        let s = "é".repeat(10);
        let truncated = truncate_string(s, 4);
        assert_eq!(truncated, "éééé...");
        assert_eq!(truncate_string("abc".to_string(), 3), "abc");
    }

    #[test]
    fn chunk_splits_into_fixed_batches() {
        let items: Vec<u32> = (0..23).collect();
        let batches = chunk(&items, 10);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 10);
        assert_eq!(batches[2], &[20, 21, 22]);
        assert!(chunk::<u32>(&[], 10).is_empty());
        assert_eq!(chunk(&items, 0).len(), 23);
    }

    #[test]
    fn flatten_children_is_pre_order_and_strips_children() {
        let sanitizer = Sanitizer::default();
        let components = vec![
            json!({"id": "1", "children": [{"id": "1.1", "children": [{"id": "1.1.1"}]}, {"id": "1.2"}]}),
            json!({"id": "2"}),
        ];
        let flat = sanitizer.flatten_children(components);
        let ids: Vec<&str> = flat.iter().filter_map(|c| c["id"].as_str()).collect();
        assert_eq!(ids, vec!["1", "1.1", "1.1.1", "1.2", "2"]);
        assert!(flat.iter().all(|c| c.get("children").is_none()));
    }

    #[test]
    fn flatten_children_respects_array_cap() {
        let sanitizer = Sanitizer {
            max_string_length: 10,
            max_array_length: 3,
            max_depth: 8,
        };
        let components = vec![json!({"id": "1", "children": [{"id": "a"}, {"id": "b"}, {"id": "c"}]})];
        assert_eq!(sanitizer.flatten_children(components).len(), 3);
    }
}
