use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    punctuated::Punctuated, token::Comma, Data, DeriveInput, Field, Fields, GenericArgument,
    Ident, Lit, LitStr, PathArguments, Type,
};

pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    expand_document(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

pub fn derive_schematic(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    expand_schematic(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_document(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let container = ContainerAttrs::parse(input)?;
    let collection = container
        .collection
        .unwrap_or_else(|| format!("{}s", to_snake_case(&name.to_string())));
    let display = container.name.unwrap_or_else(|| name.to_string());

    let fields = named_fields(input)?;
    let id_field = extract_id_field(input, fields)?;
    let id_name = id_field.to_string();
    let schema = schema_tokens(fields, Some(&id_field))?;

    Ok(quote! {
        impl docgate::Schematic for #name {
            fn schema() -> &'static docgate::Schema {
                static SCHEMA: docgate::Schema = #schema;
                &SCHEMA
            }
        }

        impl docgate::Document for #name {
            const COLLECTION: &'static str = #collection;
            const NAME: &'static str = #display;
            const ID_FIELD: &'static str = #id_name;

            fn id(&self) -> &str {
                &self.#id_field
            }
        }
    })
}

fn expand_schematic(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = named_fields(input)?;
    for field in fields {
        if FieldAttrs::parse(field)?.id {
            return Err(syn::Error::new_spanned(
                field,
                "Schematic derive: embedded shapes have no id; use #[derive(Document)] instead",
            ));
        }
    }
    let schema = schema_tokens(fields, None)?;

    Ok(quote! {
        impl docgate::Schematic for #name {
            fn schema() -> &'static docgate::Schema {
                static SCHEMA: docgate::Schema = #schema;
                &SCHEMA
            }
        }
    })
}

#[derive(Default)]
struct ContainerAttrs {
    collection: Option<String>,
    name: Option<String>,
}

impl ContainerAttrs {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = ContainerAttrs::default();
        for attr in &input.attrs {
            if !attr.path().is_ident("document") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("collection") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.collection = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `collection` or `name`"))
                }
            })?;
        }
        Ok(attrs)
    }
}

#[derive(Default)]
struct FieldAttrs {
    id: bool,
    min: Option<f64>,
}

impl FieldAttrs {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut attrs = FieldAttrs::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("document") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    attrs.id = true;
                    Ok(())
                } else if meta.path.is_ident("min") {
                    let lit: Lit = meta.value()?.parse()?;
                    let min = match &lit {
                        Lit::Int(int) => int.base10_parse::<f64>()?,
                        Lit::Float(float) => float.base10_parse::<f64>()?,
                        _ => return Err(syn::Error::new_spanned(&lit, "min must be a number")),
                    };
                    attrs.min = Some(min);
                    Ok(())
                } else {
                    Err(meta.error("expected `id` or `min = <number>`"))
                }
            })?;
        }
        Ok(attrs)
    }
}

fn named_fields(input: &DeriveInput) -> syn::Result<&Punctuated<Field, Comma>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(&fields.named);
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "document derives require a struct with named fields",
    ))
}

fn extract_id_field(input: &DeriveInput, fields: &Punctuated<Field, Comma>) -> syn::Result<Ident> {
    for field in fields {
        if FieldAttrs::parse(field)?.id {
            if let Some(ident) = &field.ident {
                return Ok(ident.clone());
            }
        }
    }

    // Default: look for a field named "id"
    for field in fields {
        if let Some(ident) = &field.ident {
            if ident == "id" {
                return Ok(ident.clone());
            }
        }
    }

    Err(syn::Error::new_spanned(
        &input.ident,
        "Document derive: no field marked with #[document(id)] and no field named `id`",
    ))
}

fn schema_tokens(
    fields: &Punctuated<Field, Comma>,
    id_field: Option<&Ident>,
) -> syn::Result<TokenStream2> {
    let mut entries = Vec::new();
    for field in fields {
        let Some(ident) = &field.ident else { continue };
        if Some(ident) == id_field {
            continue;
        }
        let attrs = FieldAttrs::parse(field)?;
        let name = ident.to_string();
        // lists default to empty, so only non-Option scalars and embeds are required
        let (ty, required) = match generic_inner(&field.ty, "Option") {
            Some(inner) => (inner, false),
            None => (&field.ty, generic_inner(&field.ty, "Vec").is_none()),
        };
        let kind = field_kind(ty);
        let min = match attrs.min {
            Some(min) => quote!(::core::option::Option::Some(#min)),
            None => quote!(::core::option::Option::None),
        };
        entries.push(quote! {
            docgate::Field {
                name: #name,
                kind: #kind,
                required: #required,
                min: #min,
            }
        });
    }

    Ok(quote! {
        docgate::Schema {
            fields: &[#(#entries),*],
        }
    })
}

fn field_kind(ty: &Type) -> TokenStream2 {
    if let Some(inner) = generic_inner(ty, "Vec") {
        return quote!(docgate::FieldKind::List(<#inner as docgate::Schematic>::schema));
    }
    match last_ident(ty).map(|ident| ident.to_string()).as_deref() {
        Some("String") | Some("str") => quote!(docgate::FieldKind::Text),
        Some("f32") | Some("f64") => quote!(docgate::FieldKind::Number),
        Some("i8") | Some("i16") | Some("i32") | Some("i64") | Some("isize") | Some("u8")
        | Some("u16") | Some("u32") | Some("u64") | Some("usize") => {
            quote!(docgate::FieldKind::Integer)
        }
        Some("bool") => quote!(docgate::FieldKind::Boolean),
        _ => quote!(docgate::FieldKind::Embedded(<#ty as docgate::Schematic>::schema)),
    }
}

fn last_ident(ty: &Type) -> Option<&Ident> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|segment| &segment.ident),
        Type::Reference(reference) => last_ident(&reference.elem),
        _ => None,
    }
}

/// Returns `T` when `ty` is `wrapper<T>` (matched on the last path segment).
fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
