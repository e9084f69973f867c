//! Declarative selectors for locating elements in a page
//!
//! A selector is a tag name plus a set of attribute/value pairs that must all be
//! present on the element. It is deliberately not a CSS selector language: the
//! matcher is a plain predicate over anything implementing [`Element`], so the
//! extraction logic does not depend on a particular HTML backend.
//!
//! # Example
//!
//! ```
//! use price_scout::selector::SelectorSpec;
//!
//! let price = SelectorSpec::new("span").with_attr("class", "a-offscreen");
//! assert_eq!(price.tag, "span");
//! assert_eq!(price.attrs.get("class").map(String::as_str), Some("a-offscreen"));
//! ```

mod matcher;

pub use matcher::Element;

use serde::Deserialize;
use std::collections::BTreeMap;

/// Field name of the product title leaf selector
pub const TITLE_FIELD: &str = "title";

/// Field name of the price leaf selector
pub const PRICE_FIELD: &str = "price";

/// Identifies an element by tag name and required attribute values
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorSpec {
    /// Tag name, compared case-insensitively
    pub tag: String,

    /// Attributes that must all be present with these exact values
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl SelectorSpec {
    /// Creates a selector matching any element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Adds a required attribute value
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// The selector schema for one site
///
/// `container` locates every repeated item block on a page. All other keys are
/// leaf fields, each resolved independently inside a container match. `title`
/// and `price` are the conventional leaves; any other key is carried through as
/// an extra column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorTree {
    /// Selector for each item block
    pub container: SelectorSpec,

    /// Leaf selectors keyed by field name
    #[serde(flatten)]
    pub fields: BTreeMap<String, SelectorSpec>,
}

impl SelectorTree {
    /// Creates a tree with a container selector and no leaf fields
    pub fn new(container: SelectorSpec) -> Self {
        Self {
            container,
            fields: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a leaf field selector
    pub fn with_field(mut self, name: impl Into<String>, spec: SelectorSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Returns the selector configured for a leaf field, if any
    pub fn field(&self, name: &str) -> Option<&SelectorSpec> {
        self.fields.get(name)
    }

    /// Leaf field names other than `title` and `price`, in key order
    pub fn extra_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|name| *name != TITLE_FIELD && *name != PRICE_FIELD)
    }
}
