use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use carprice_ai::appraisal::{
    appraisal_router, AppraisalService, Make, MarketCategory, PricingConfig, VehicleSpec,
    VehicleStyle,
};
use carprice_ai::model::LinearLogPriceModel;
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_router() -> axum::Router {
    let model = Arc::new(LinearLogPriceModel::reference());
    let pricing = PricingConfig {
        reference_year: Some(2025),
        ..PricingConfig::default()
    };
    appraisal_router(Arc::new(AppraisalService::new(model, pricing)))
}

fn sample_spec() -> VehicleSpec {
    VehicleSpec {
        year: 2023,
        engine_hp: 200,
        engine_cylinders: 4,
        market_category: MarketCategory::Other,
        make: Make::Toyota,
        vehicle_style: VehicleStyle::Sedan,
        is_collector: false,
        asking_price: None,
    }
}

async fn post_appraisal(router: axum::Router, spec: &VehicleSpec) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/appraisals")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(spec).expect("serialize spec")))
        .expect("request");

    let response = router.oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&body).expect("json");
    (status, payload)
}

#[tokio::test]
async fn post_appraisal_returns_the_full_report() {
    let (status, payload) = post_appraisal(build_router(), &sample_spec()).await;

    assert_eq!(status, StatusCode::OK);

    assert_eq!(payload.get("vehicle_age_years"), Some(&json!(2)));
    assert_eq!(payload.get("degraded_estimate"), Some(&json!(false)));
    assert_eq!(payload.get("recommendation"), Some(&json!("buy")));
    assert_eq!(payload.get("price_comparison"), Some(&json!("unavailable")));

    let score = payload.get("score").expect("score present");
    assert_eq!(score.get("raw_total"), Some(&json!(90)));
    assert_eq!(score.get("max_total"), Some(&json!(110)));

    let normalized = score
        .get("normalized")
        .and_then(Value::as_f64)
        .expect("normalized score");
    assert!((normalized - 90.0 / 110.0 * 100.0).abs() < 1e-9);

    let msrp = payload
        .get("msrp_local")
        .and_then(Value::as_f64)
        .expect("msrp present");
    let final_price = payload
        .get("final_price_local")
        .and_then(Value::as_f64)
        .expect("final price present");
    assert!(msrp > 0.0);
    assert!((final_price - msrp * 0.9 * 0.9).abs() < 1.0);

    let series = payload
        .get("depreciation_series")
        .and_then(Value::as_array)
        .expect("series present");
    assert_eq!(series.len(), 6);
    assert_eq!(series[0].get("year_offset"), Some(&json!(0)));
}

#[tokio::test]
async fn asking_price_drives_the_comparison_verdict() {
    let router = build_router();

    let (_, baseline) = post_appraisal(router.clone(), &sample_spec()).await;
    let final_price = baseline
        .get("final_price_local")
        .and_then(Value::as_f64)
        .expect("final price present");

    let mut spec = sample_spec();
    spec.asking_price = Some(final_price * 0.8);
    let (status, payload) = post_appraisal(router, &spec).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.get("price_comparison"), Some(&json!("much_lower")));
    let findings = payload
        .get("findings")
        .and_then(Value::as_array)
        .expect("findings present");
    assert!(findings
        .iter()
        .any(|finding| finding.as_str().is_some_and(|f| f.contains("opportunity"))));
}

#[tokio::test]
async fn invalid_attributes_are_rejected_with_a_categorized_error() {
    let mut spec = sample_spec();
    spec.engine_cylinders = 1;

    let (status, payload) = post_appraisal(build_router(), &spec).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .is_some_and(|message| message.contains("cylinder")));
}
