//! Student management: `studentDB.students`.

use serde::{Deserialize, Serialize};

use crate::Document;

/// Logical database holding the student collection.
pub const DATABASE: &str = "studentDB";

/// Youngest age a student record accepts.
///
/// `#[document(min = ..)]` only takes a literal, so the attribute on `age`
/// repeats this value; `schema_minimum_matches_constant` keeps them in step.
pub const MIN_AGE: i64 = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "students", name = "Student")]
pub struct Student {
    #[document(id)]
    pub id: String,
    pub name: String,
    #[document(min = 5)]
    pub age: i64,
    pub course: String,
}
