use std::fmt;

use crate::error::GraphError;

/// Number of leading identifier characters consumed by the shard layout.
pub const SHARD_PREFIX_LEN: usize = 8;

/// Width of one shard segment.
const SHARD_WIDTH: usize = 2;

/// Kind of object an external identifier points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Assertion,
    BadgeClass,
}

impl ObjectKind {
    /// Type name as it appears in the Open Badges vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Assertion => "Assertion",
            ObjectKind::BadgeClass => "BadgeClass",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an object lives in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryAddress {
    /// Fully-qualified object URI.
    Uri(String),
    /// Objects whose `schema:alternativeName` equals the slug.
    AlternativeName(String),
}

impl RepositoryAddress {
    /// SPARQL fragment binding `?uri` to this address.
    pub fn fragment(&self) -> String {
        match self {
            RepositoryAddress::Uri(uri) => format!("BIND (<{uri}> AS ?uri) ."),
            RepositoryAddress::AlternativeName(slug) => {
                format!("?uri schema:alternativeName \"{slug}\"^^xsd:string .")
            }
        }
    }
}

/// Maps external identifiers onto repository addresses.
///
/// Assertions are stored in a sharded layout:
/// `{root}/{id[0..2]}/{id[2..4]}/{id[4..6]}/{id[6..8]}/{id}`.
/// Badge classes have no direct URI and are matched by property instead.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    root: String,
}

impl AddressResolver {
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        while root.ends_with('/') {
            root.pop();
        }
        Self { root }
    }

    pub fn resolve(
        &self,
        kind: ObjectKind,
        identifier: &str,
    ) -> Result<RepositoryAddress, GraphError> {
        validate_identifier(identifier)?;
        match kind {
            ObjectKind::Assertion => self.shard_uri(identifier).map(RepositoryAddress::Uri),
            ObjectKind::BadgeClass => Ok(RepositoryAddress::AlternativeName(identifier.into())),
        }
    }

    /// Build the sharded object URI for an assertion identifier.
    pub fn shard_uri(&self, identifier: &str) -> Result<String, GraphError> {
        validate_identifier(identifier)?;
        if identifier.len() < SHARD_PREFIX_LEN {
            return Err(GraphError::InvalidIdentifier(format!(
                "expected at least {SHARD_PREFIX_LEN} characters, got {}",
                identifier.len()
            )));
        }

        let mut uri = self.root.clone();
        for start in (0..SHARD_PREFIX_LEN).step_by(SHARD_WIDTH) {
            uri.push('/');
            uri.push_str(&identifier[start..start + SHARD_WIDTH]);
        }
        uri.push('/');
        uri.push_str(identifier);
        Ok(uri)
    }
}

/// Identifiers are spliced into query text, so only `[A-Za-z0-9_-]` is allowed.
fn validate_identifier(identifier: &str) -> Result<(), GraphError> {
    if identifier.is_empty() {
        return Err(GraphError::InvalidIdentifier("identifier is empty".into()));
    }
    if !identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(GraphError::InvalidIdentifier(format!(
            "'{identifier}' contains characters outside [A-Za-z0-9_-]"
        )));
    }
    Ok(())
}
