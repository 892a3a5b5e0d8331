//! Script tag records.
//!
//! A `ScriptTag` is just the ordered attribute list of one `<script>` element.
//! Order is the order the parser saw the attributes in, plus any attributes
//! appended later by the hash generator.

use std::fmt;

pub const ATTR_SRC: &str = "src";
pub const ATTR_INTEGRITY: &str = "integrity";
pub const ATTR_CROSSORIGIN: &str = "crossorigin";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptTag {
    attrs: Vec<(String, String)>,
}

impl ScriptTag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tag from `(name, value)` pairs. Later duplicates replace earlier values.
    pub fn from_attrs<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut tag = Self::new();
        for (k, v) in attrs {
            tag.set(k.into(), v.into());
        }
        tag
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn src(&self) -> Option<&str> {
        self.get(ATTR_SRC)
    }

    /// True when an `integrity` attribute exists, whatever its value (including `""`).
    pub fn has_integrity(&self) -> bool {
        self.has(ATTR_INTEGRITY)
    }

    /// Returns a copy with `name` set to `value`. An existing attribute keeps its position.
    pub fn with_attr(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut tag = self.clone();
        tag.set(name.into(), value.into());
        tag
    }

    fn set(&mut self, name: String, value: String) {
        match self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Markup form: `<script a="b" c=""></script>`.
    pub fn to_markup(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<script")?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape_attr(value))?;
        }
        f.write_str("></script>")
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
