use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Catalog key for a replaceable part: owning system plus component name.
///
/// Ordering is by system first, which keeps per-system reports grouped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentKey {
    pub system: String,
    pub component: String,
}

impl ComponentKey {
    /// Build a key, trimming surrounding whitespace from both parts.
    pub fn new(system: impl AsRef<str>, component: impl AsRef<str>) -> Self {
        Self {
            system: system.as_ref().trim().to_string(),
            component: component.as_ref().trim().to_string(),
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.system, self.component)
    }
}
