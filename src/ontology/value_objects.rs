use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::{NamedNode, NamedNodeRef};
use thiserror::Error;

/// Value object ensuring that supplied text represents a valid IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    ///
    /// The constructor rejects malformed identifiers so that every individual,
    /// class and property in the store is keyed by a canonical identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the short name of the resource: the fragment after `#`, or the
    /// last path segment when the IRI has no fragment.
    #[must_use]
    pub fn local_name(&self) -> &str {
        let value = self.value.as_str();
        value
            .rsplit_once('#')
            .or_else(|| value.rsplit_once('/'))
            .map_or(value, |(_, tail)| tail)
    }

    /// Borrows the identifier as an RDF named node.
    #[must_use]
    pub fn as_named_node(&self) -> NamedNodeRef<'_> {
        NamedNodeRef::new_unchecked(&self.value)
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NamedNode> for Iri {
    fn from(node: NamedNode) -> Self {
        Self {
            value: node.into_string(),
        }
    }
}

impl From<NamedNodeRef<'_>> for Iri {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self {
            value: node.as_str().to_owned(),
        }
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}
