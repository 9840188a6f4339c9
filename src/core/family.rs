//! Symbol family classification.
//!
//! The family picks the first root the dispatcher tries. Whether the
//! truncation fallback runs is a separate, looser question answered by
//! [`Namespace::has_own_marker`]: the bare root symbol is `Foreign` by family
//! but still belongs to the system.

use crate::core::namespace::{NS_SEPARATOR, Namespace, without_leading_separator};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Under `<Top>\<Plugins>`; searched in the plugins root first.
    Plugin,
    /// Under `<Top>\`; searched in the core root first.
    CoreNamespace,
    /// Anything else; searched once in the vendor root.
    Foreign,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Family::Plugin => "plugin",
            Family::CoreNamespace => "core",
            Family::Foreign => "foreign",
        };
        f.write_str(s)
    }
}

impl Namespace {
    pub fn classify(&self, name: &str) -> Family {
        let name = without_leading_separator(name);

        let plugin_prefix = format!("{}{}{}", self.top(), NS_SEPARATOR, self.plugins());
        if name.starts_with(&plugin_prefix) {
            return Family::Plugin;
        }

        let core_prefix = format!("{}{}", self.top(), NS_SEPARATOR);
        if name.starts_with(&core_prefix) {
            return Family::CoreNamespace;
        }

        Family::Foreign
    }

    /// True when the name starts with the top-level name, with or without a
    /// leading separator and without requiring one after it.
    pub fn has_own_marker(&self, name: &str) -> bool {
        without_leading_separator(name).starts_with(self.top())
    }
}
