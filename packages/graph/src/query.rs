//! SPARQL templates for the objects the service resolves.

use crate::address::{ObjectKind, RepositoryAddress};

/// Variable holding the stored JSON interior of an object.
pub const JSON_VAR: &str = "jsonString";
/// Variable holding the repository URI of an object.
pub const URI_VAR: &str = "uri";
/// Variable holding an image URL.
pub const IMAGE_VAR: &str = "image";
/// Variables projected by the badge-class listing.
pub const ALT_NAME_VAR: &str = "altName";
pub const NAME_VAR: &str = "name";

const PREFIXES: &str = "\
PREFIX openbadge: <https://w3id.org/openbadges#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX schema: <http://schema.org/>
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
";

/// Query families, one template each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Object(ObjectKind),
    Image,
}

impl From<ObjectKind> for QueryKind {
    fn from(kind: ObjectKind) -> Self {
        QueryKind::Object(kind)
    }
}

/// Build a complete query selecting the object at `address`.
pub fn build(kind: impl Into<QueryKind>, address: &RepositoryAddress) -> String {
    let fragment = address.fragment();
    match kind.into() {
        QueryKind::Object(object_kind) => format!(
            "{PREFIXES}\
SELECT DISTINCT ?{URI_VAR} ?{JSON_VAR}
WHERE {{
  {fragment}
  ?{URI_VAR} rdf:type openbadge:{object_kind} .
  ?{URI_VAR} openbadge:jsonString ?{JSON_VAR} .
}}"
        ),
        QueryKind::Image => format!(
            "{PREFIXES}\
SELECT DISTINCT ?{IMAGE_VAR}
WHERE {{
  {fragment}
  ?{URI_VAR} openbadge:image ?{IMAGE_VAR} .
}}"
        ),
    }
}

/// Query listing every badge class by slug and display name.
pub fn all_badge_classes() -> String {
    format!(
        "{PREFIXES}\
SELECT DISTINCT ?{ALT_NAME_VAR} ?{NAME_VAR}
WHERE {{
  ?class rdf:type openbadge:BadgeClass .
  ?class schema:alternativeName ?{ALT_NAME_VAR} .
  ?class schema:name ?{NAME_VAR} .
}}
ORDER BY ?{NAME_VAR}"
    )
}
