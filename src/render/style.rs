use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarations of one selector, property name to value.
pub type StyleDeclarations = IndexMap<String, String>;

/// Selector to declarations, in insertion order.
pub type StyleRules = IndexMap<String, StyleDeclarations>;

/// Builds a rule set from `(selector, [(property, value)])` literals.
#[must_use]
pub fn rules_from(entries: &[(&str, &[(&str, &str)])]) -> StyleRules {
    entries
        .iter()
        .map(|(selector, declarations)| {
            let declarations = declarations
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect();
            ((*selector).to_owned(), declarations)
        })
        .collect()
}

/// Deep-merges `overlay` into `base`: selectors are unioned and, within a
/// selector, later properties win.
pub fn merge_rules(base: &mut StyleRules, overlay: &StyleRules) {
    for (selector, declarations) in overlay {
        let target = base.entry(selector.clone()).or_default();
        for (name, value) in declarations {
            target.insert(name.clone(), value.clone());
        }
    }
}

/// Style rules confined to one chart instance's wrapper class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleBlock {
    pub scope: String,
    pub rules: StyleRules,
}

impl StyleBlock {
    #[must_use]
    pub fn new(scope: impl Into<String>, rules: StyleRules) -> Self {
        Self {
            scope: scope.into(),
            rules,
        }
    }

    /// CSS text with every selector prefixed by the scope and property names
    /// converted from camelCase.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (selector, declarations) in &self.rules {
            if declarations.is_empty() {
                continue;
            }
            let scoped = selector
                .split(',')
                .map(|part| format!("{} {}", self.scope, part.trim()))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(css, "{scoped}{{");
            for (name, value) in declarations {
                let _ = write!(css, "{}:{value};", kebab_case(name));
            }
            css.push('}');
        }
        css
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
