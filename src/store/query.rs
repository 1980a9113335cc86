//! Query - Equality filters and inclusion projections over serialized documents.
//!
//! Paths are dotted (`variants.color`). A path that crosses an array matches
//! when any element matches, and numeric segments index into arrays.

use serde_json::{Map, Value};

/// Conjunction of dotted-path equality clauses. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Match every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match documents where `path` equals `value`.
    pub fn eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(path, value)
    }

    /// Add another equality clause.
    pub fn and(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((path.into(), value.into()));
        self
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses.iter().all(|(path, expected)| {
            let segments: Vec<&str> = path.split('.').collect();
            path_matches(doc, &segments, expected)
        })
    }
}

fn path_matches(value: &Value, path: &[&str], expected: &Value) -> bool {
    let Some((head, rest)) = path.split_first() else {
        return values_equal(value, expected)
            || value
                .as_array()
                .is_some_and(|items| items.iter().any(|item| values_equal(item, expected)));
    };

    match value {
        Value::Object(map) => map
            .get(*head)
            .is_some_and(|child| path_matches(child, rest, expected)),
        Value::Array(items) => {
            let indexed = head
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .is_some_and(|item| path_matches(item, rest, expected));
            indexed || items.iter().any(|item| path_matches(item, path, expected))
        }
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Inclusion projection: keeps only the listed dotted paths.
///
/// The id field is kept unless `without_id` is set. Arrays of embedded
/// documents are projected element by element.
#[derive(Debug, Clone)]
pub struct Projection {
    include: Vec<String>,
    include_id: bool,
}

impl Projection {
    pub fn include<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: paths.into_iter().map(Into::into).collect(),
            include_id: true,
        }
    }

    pub fn without_id(mut self) -> Self {
        self.include_id = false;
        self
    }

    /// Project a serialized document whose identifier lives in `id_field`.
    pub fn apply(&self, doc: &Value, id_field: &str) -> Value {
        let Value::Object(map) = doc else {
            return Value::Object(Map::new());
        };

        let mut paths: Vec<Vec<&str>> = self
            .include
            .iter()
            .map(|p| p.split('.').collect())
            .collect();
        if self.include_id {
            paths.push(vec![id_field]);
        }

        let mut out = project_object(map, &paths);
        if !self.include_id {
            // an explicit `id` path must not bring it back
            out = out.into_iter().filter(|(k, _)| k != id_field).collect();
        }
        Value::Object(out)
    }
}

fn project_object(map: &Map<String, Value>, paths: &[Vec<&str>]) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in map {
        let matching: Vec<&[&str]> = paths
            .iter()
            .filter(|p| p.first() == Some(&key.as_str()))
            .map(|p| &p[1..])
            .collect();
        if matching.is_empty() {
            continue;
        }
        if matching.iter().any(|rest| rest.is_empty()) {
            out.insert(key.clone(), value.clone());
            continue;
        }

        let rest: Vec<Vec<&str>> = matching.iter().map(|r| r.to_vec()).collect();
        match value {
            Value::Object(child) => {
                out.insert(key.clone(), Value::Object(project_object(child, &rest)));
            }
            Value::Array(items) => {
                let projected = items
                    .iter()
                    .filter_map(|item| item.as_object())
                    .map(|child| Value::Object(project_object(child, &rest)))
                    .collect();
                out.insert(key.clone(), Value::Array(projected));
            }
            _ => {}
        }
    }
    out
}
