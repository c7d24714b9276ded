use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::VehicleSpec;
use super::service::{AppraisalError, AppraisalService};
use crate::model::PriceModel;

/// Router builder exposing the appraisal endpoint.
pub fn appraisal_router<M>(service: Arc<AppraisalService<M>>) -> Router
where
    M: PriceModel + 'static,
{
    Router::new()
        .route("/api/v1/appraisals", post(appraise_handler::<M>))
        .with_state(service)
}

pub(crate) async fn appraise_handler<M>(
    State(service): State<Arc<AppraisalService<M>>>,
    axum::Json(spec): axum::Json<VehicleSpec>,
) -> Response
where
    M: PriceModel + 'static,
{
    match service.appraise(&spec) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AppraisalError::Invalid(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AppraisalError::Model(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
