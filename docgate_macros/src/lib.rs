mod document;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Document)]
// ============================================================================

/// Derive macro that implements `Document` and `Schematic` for a struct.
///
/// The schema is built from the Rust field types, so the struct definition is
/// the single source of truth for the shape the validator enforces.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, Serialize, Deserialize, Document)]
/// #[document(collection = "students", name = "Student")]
/// struct Student {
///     #[document(id)]
///     pub id: String,
///     pub name: String,
///     #[document(min = 5)]
///     pub age: i64,
///     pub course: String,
/// }
/// ```
///
/// - `#[document(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[document(name = "...")]` sets the display name used in messages.
///   If omitted, defaults to the struct name.
/// - `#[document(id)]` marks the store-assigned identifier field.
///   If omitted, defaults to a field named `id`. It is never part of the schema.
/// - `#[document(min = N)]` sets an inclusive lower bound on a numeric field.
///
/// Type mapping: `String` is text, `f32`/`f64` are numbers, integer types are
/// integers, `bool` is boolean, `Option<T>` makes the field optional,
/// `Vec<T>` is an optional list of embedded `T` (pair it with `#[serde(default)]`),
/// and any other type is an embedded `T`.
/// Embedded types must implement `Schematic` (usually via its derive).
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}

// ============================================================================
// #[derive(Schematic)]
// ============================================================================

/// Derive macro for embedded shapes that have a schema but no identity of
/// their own, such as the variants nested inside a catalog product.
///
/// ```ignore
/// #[derive(Clone, Debug, Serialize, Deserialize, Schematic)]
/// struct Variant {
///     pub color: Option<String>,
///     pub stock: Option<i64>,
/// }
/// ```
#[proc_macro_derive(Schematic, attributes(document))]
pub fn derive_schematic(input: TokenStream) -> TokenStream {
    document::derive_schematic(input)
}
