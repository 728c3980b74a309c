use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::address::{AddressResolver, ObjectKind, RepositoryAddress};
use crate::error::GraphError;
use crate::payload::{self, ParsedObject, binding_value};
use crate::query::{self, ALT_NAME_VAR, NAME_VAR, QueryKind};
use crate::repository::GraphRepository;

/// An object located in the repository together with its stored form.
#[derive(Debug, Clone)]
pub struct ResolvedObject {
    pub kind: ObjectKind,
    pub identifier: String,
    /// Repository URI of the object, when the query projected one.
    pub uri: Option<String>,
    pub object: Map<String, Value>,
}

/// Entry of the badge-class listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BadgeClassSummary {
    /// Slug the badge class is addressed by.
    #[schema(example = "CampBadge")]
    pub alt_name: String,
    /// Display name.
    #[schema(example = "Camp Badge")]
    pub name: String,
}

/// Runs the identifier → query → payload pipeline against a repository.
pub struct ObjectResolver {
    addresses: AddressResolver,
    repository: Arc<dyn GraphRepository>,
}

impl ObjectResolver {
    pub fn new(addresses: AddressResolver, repository: Arc<dyn GraphRepository>) -> Self {
        Self {
            addresses,
            repository,
        }
    }

    /// Resolve and parse a single object.
    #[instrument(skip(self))]
    pub async fn fetch(
        &self,
        kind: ObjectKind,
        identifier: &str,
    ) -> Result<ResolvedObject, GraphError> {
        let address = self.addresses.resolve(kind, identifier)?;
        let query = query::build(kind, &address);
        let result = self.repository.execute(&query).await?;

        let ParsedObject { object, uri } =
            payload::extract(&result, &format!("{kind} {identifier}"))?;
        let uri = uri.or(match address {
            RepositoryAddress::Uri(uri) => Some(uri),
            RepositoryAddress::AlternativeName(_) => None,
        });

        debug!(keys = object.len(), "Object resolved");
        Ok(ResolvedObject {
            kind,
            identifier: identifier.to_string(),
            uri,
            object,
        })
    }

    /// Look up the image URL recorded for an assertion.
    #[instrument(skip(self))]
    pub async fn assertion_image_url(&self, identifier: &str) -> Result<String, GraphError> {
        let address = self.addresses.resolve(ObjectKind::Assertion, identifier)?;
        let query = query::build(QueryKind::Image, &address);
        let result = self.repository.execute(&query).await?;

        let subject = format!("image of Assertion {identifier}");
        let binding = payload::single_binding(&result, &subject).map_err(|e| match e {
            GraphError::NotFound(subject) => GraphError::ImageNotFound(subject),
            other => other,
        })?;
        Ok(binding_value(binding, query::IMAGE_VAR)?.to_string())
    }

    /// List every badge class known to the repository.
    #[instrument(skip(self))]
    pub async fn badge_classes(&self) -> Result<Vec<BadgeClassSummary>, GraphError> {
        let result = self.repository.execute(&query::all_badge_classes()).await?;
        result
            .bindings()
            .iter()
            .map(|binding| {
                Ok(BadgeClassSummary {
                    alt_name: binding_value(binding, ALT_NAME_VAR)?.to_string(),
                    name: binding_value(binding, NAME_VAR)?.to_string(),
                })
            })
            .collect()
    }
}
