//! Serde helpers for `f64` fields that hold JSON numbers.
//!
//! JSON does not distinguish `25` from `25.0`, but `serde_json::Value` does.
//! Whole values are written back as integers so a submitted `25` reads back
//! as `25`, while `9.5` stays `9.5`.
//!
//! ```ignore
//! #[serde(with = "docgate::number")]
//! pub price: f64,
//! ```

use serde::{Deserialize, Deserializer, Serializer};

/// Largest magnitude below which every whole `f64` is an exact `i64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer)
}
