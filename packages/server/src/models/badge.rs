use serde::Serialize;

/// Criteria derived from a badge class.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaResponse {
    #[schema(example = "Criteria for Camp Badge")]
    pub name: String,
    /// Educational uses listed on the badge class.
    pub educational_use: Vec<String>,
}

/// The organization issuing badges from this service.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct IssuerResponse {
    #[schema(example = "Example Library")]
    pub name: String,
    #[schema(example = "http://library.example.org/")]
    pub url: String,
}
