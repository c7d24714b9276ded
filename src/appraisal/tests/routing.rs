use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use super::common::*;
use crate::appraisal::router::appraise_handler;
use crate::appraisal::AppraisalService;

#[tokio::test]
async fn appraise_handler_returns_the_report() {
    let service = Arc::new(AppraisalService::new(
        Arc::new(StubModel::with_canonical_schema(log_price_for_160m())),
        pricing(),
    ));

    let response =
        appraise_handler::<StubModel>(State(service), axum::Json(spec(2022))).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn appraise_handler_rejects_invalid_input() {
    let service = Arc::new(AppraisalService::new(
        Arc::new(StubModel::with_canonical_schema(log_price_for_160m())),
        pricing(),
    ));
    let mut vehicle = spec(2022);
    vehicle.engine_hp = 5000;

    let response = appraise_handler::<StubModel>(State(service), axum::Json(vehicle)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn appraise_handler_maps_model_failures_to_bad_gateway() {
    let service = Arc::new(AppraisalService::new(
        Arc::new(StubModel::with_canonical_schema(f64::NAN)),
        pricing(),
    ));

    let response =
        appraise_handler::<StubModel>(State(service), axum::Json(spec(2022))).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
