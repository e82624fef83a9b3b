//! Capability names and paths.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single capability name, e.g. `google` or `maps`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Create a name, rejecting blank input.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered, non-empty sequence of capability names.
///
/// Order defines nesting: `[google, maps]` declares `maps` beneath `google`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Name>", into = "Vec<Name>")]
pub struct CapabilityPath(Vec<Name>);

impl CapabilityPath {
    /// Build a path from raw names.
    ///
    /// Fails with [`Error::EmptyPath`] when no names are given and with
    /// [`Error::EmptyName`] when any name is blank.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Name::new)
            .collect::<Result<Vec<_>>>()?;
        Self::from_names(names)
    }

    /// Build a path from already validated names.
    pub fn from_names(names: Vec<Name>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(Self(names))
    }

    /// Parse a dotted path such as `google.maps`.
    pub fn parse(dotted: &str) -> Result<Self> {
        Self::new(dotted.split('.'))
    }

    pub fn names(&self) -> &[Name] {
        &self.0
    }

    /// Every non-empty prefix of this path, shortest first.
    pub fn prefixes(&self) -> impl Iterator<Item = &[Name]> {
        (1..=self.0.len()).map(|end| &self.0[..end])
    }
}

impl TryFrom<Vec<Name>> for CapabilityPath {
    type Error = Error;

    fn try_from(names: Vec<Name>) -> Result<Self> {
        Self::from_names(names)
    }
}

impl From<CapabilityPath> for Vec<Name> {
    fn from(path: CapabilityPath) -> Self {
        path.0
    }
}

impl fmt::Display for CapabilityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(name.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_rejected() {
        let names: Vec<String> = Vec::new();
        assert_eq!(CapabilityPath::new(names), Err(Error::EmptyPath));
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(CapabilityPath::new(["google", "  "]), Err(Error::EmptyName));
        assert_eq!(CapabilityPath::parse("google..maps"), Err(Error::EmptyName));
        assert_eq!(CapabilityPath::parse(""), Err(Error::EmptyName));
    }

    #[test]
    fn test_parse_dotted() {
        let path = CapabilityPath::parse("google.maps").unwrap();
        let names: Vec<&str> = path.names().iter().map(Name::as_str).collect();
        assert_eq!(names, ["google", "maps"]);
        assert_eq!(path.to_string(), "google.maps");
    }

    #[test]
    fn test_prefixes() {
        let path = CapabilityPath::parse("yui.slider.range").unwrap();
        let lens: Vec<usize> = path.prefixes().map(<[Name]>::len).collect();
        assert_eq!(lens, [1, 2, 3]);
    }

    #[test]
    fn test_deserialize_from_list() {
        let path: CapabilityPath = serde_json::from_str(r#"["yui", "slider"]"#).unwrap();
        assert_eq!(path, CapabilityPath::new(["yui", "slider"]).unwrap());

        assert!(serde_json::from_str::<CapabilityPath>("[]").is_err());
        assert!(serde_json::from_str::<CapabilityPath>(r#"["yui", ""]"#).is_err());
    }
}
