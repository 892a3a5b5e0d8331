//! Split script tags by whether they carry an `integrity` attribute.

use crate::tag::ScriptTag;

/// Tags with and without `integrity`, each in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub with_integrity: Vec<ScriptTag>,
    pub missing: Vec<ScriptTag>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.with_integrity.len() + self.missing.len()
    }
}

/// Presence is a key check only: `integrity=""` counts as present.
pub fn partition_by_integrity(tags: Vec<ScriptTag>) -> Partition {
    let (with_integrity, missing) = tags.into_iter().partition(ScriptTag::has_integrity);
    Partition {
        with_integrity,
        missing,
    }
}
