use axum::Json;
use axum::extract::State;

use crate::models::badge::IssuerResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/Issuer",
    tag = "Issuer",
    operation_id = "getIssuer",
    summary = "Get the issuing organization",
    description = "Returns the issuer configured for this deployment. Never contacts the repository.",
    responses(
        (status = 200, description = "Issuer organization", body = IssuerResponse),
    ),
)]
pub async fn get_issuer(State(state): State<AppState>) -> Json<IssuerResponse> {
    let issuer = &state.config.issuer;
    Json(IssuerResponse {
        name: issuer.name.clone(),
        url: issuer.url.clone(),
    })
}
