use crate::selector::SelectorSpec;

/// Minimal view of an element needed to evaluate a [`SelectorSpec`]
///
/// Implemented for the `scraper` DOM; any other HTML backend only needs to
/// expose a tag name and attribute lookup.
pub trait Element {
    /// The element's tag name
    fn tag_name(&self) -> &str;

    /// The raw value of an attribute, if present
    fn attr_value(&self, name: &str) -> Option<&str>;
}

impl Element for scraper::node::Element {
    fn tag_name(&self) -> &str {
        self.name()
    }

    fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr(name)
    }
}

impl SelectorSpec {
    /// Checks whether an element satisfies this selector
    ///
    /// The tag must be equal (ASCII case-insensitive) and every required
    /// attribute must be present with the configured value.
    ///
    /// `class` is multi-valued in HTML, so a required class also matches when it
    /// is one of the whitespace-separated tokens of the element's class list.
    ///
    /// # Examples
    ///
    /// ```
    /// use price_scout::selector::{Element, SelectorSpec};
    ///
    /// struct Fake;
    ///
    /// impl Element for Fake {
    ///     fn tag_name(&self) -> &str {
    ///         "span"
    ///     }
    ///
    ///     fn attr_value(&self, name: &str) -> Option<&str> {
    ///         (name == "class").then_some("price a-offscreen")
    ///     }
    /// }
    ///
    /// assert!(SelectorSpec::new("span").matches(&Fake));
    /// assert!(SelectorSpec::new("SPAN").with_attr("class", "a-offscreen").matches(&Fake));
    /// assert!(!SelectorSpec::new("div").matches(&Fake));
    /// ```
    pub fn matches<E: Element + ?Sized>(&self, element: &E) -> bool {
        if !element.tag_name().eq_ignore_ascii_case(&self.tag) {
            return false;
        }

        self.attrs.iter().all(|(name, expected)| {
            element
                .attr_value(name)
                .is_some_and(|actual| attr_matches(name, expected, actual))
        })
    }
}

fn attr_matches(name: &str, expected: &str, actual: &str) -> bool {
    if actual == expected {
        return true;
    }

    name.eq_ignore_ascii_case("class") && actual.split_ascii_whitespace().any(|c| c == expected)
}
