//! Field tag parsing.
//!
//! A raw tag is the attribute text attached to a field, e.g.
//! `#[serde(rename = "id", default)] #[validate(length(min = 1))]`. Each
//! attribute becomes one [`TagEntry`] keyed by its path.

use quote::ToTokens;
use syn::parse::Parser;
use thiserror::Error;

/// Errors raised while parsing a raw tag.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("Malformed tag `{tag}`: {source}")]
    Malformed {
        tag: String,
        #[source]
        source: syn::Error,
    },
}

/// One attribute of a field tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// The attribute path, e.g. `serde`.
    pub key: String,
    /// The external name given by `rename = "..."` or
    /// `rename(serialize = "...")`, if any.
    pub name: Option<String>,
}

/// Parses a raw tag into its entries.
///
/// ## Errors
/// Returns [`TagError::Malformed`] when the text is not a sequence of outer
/// attributes or an attribute's argument list cannot be read.
pub fn parse_tag(raw: &str) -> Result<Vec<TagEntry>, TagError> {
    let malformed = |source| TagError::Malformed {
        tag: raw.to_string(),
        source,
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let attrs = syn::Attribute::parse_outer
        .parse_str(raw)
        .map_err(malformed)?;

    attrs
        .iter()
        .map(|attr| entry_for(attr).map_err(malformed))
        .collect()
}

/// Returns the external name the tag assigns under `key`, if any.
///
/// When several attributes share the key, the last one with a name wins.
///
/// ## Errors
/// Propagates [`parse_tag`] failures.
pub fn tag_name(raw: &str, key: &str) -> Result<Option<String>, TagError> {
    Ok(parse_tag(raw)?
        .into_iter()
        .filter(|entry| entry.key == key)
        .filter_map(|entry| entry.name)
        .last())
}

fn entry_for(attr: &syn::Attribute) -> syn::Result<TagEntry> {
    let key = attr
        .path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");

    let mut name = None;
    if let syn::Meta::List(_) = &attr.meta {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return skip_meta_value(&meta);
            }

            if meta.input.peek(syn::Token![=]) {
                let value: syn::LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                return Ok(());
            }

            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("serialize") {
                    let value: syn::LitStr = inner.value()?.parse()?;
                    name = Some(value.value());
                    Ok(())
                } else {
                    skip_meta_value(&inner)
                }
            })
        })?;
    }

    Ok(TagEntry { key, name })
}

/// Consumes `= value` or `( ... )` after a nested meta path so the
/// surrounding list keeps parsing.
pub(crate) fn skip_meta_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta_value(&inner))?;
    }
    Ok(())
}

/// Renders attributes back into raw tag text.
pub(crate) fn render_tag<'a, I>(attrs: I) -> String
where
    I: IntoIterator<Item = &'a syn::Attribute>,
{
    attrs
        .into_iter()
        .map(|attr| attr.to_token_stream().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
