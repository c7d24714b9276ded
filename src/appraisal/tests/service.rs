use super::common::*;
use crate::appraisal::{
    AppraisalError, InvalidInput, PriceAdjustment, PriceComparison, Recommendation, RiskLevel,
};
use crate::model::ModelError;

#[test]
fn appraise_produces_the_complete_bundle() {
    let service = service(StubModel::with_canonical_schema(log_price_for_160m()));

    let report = service.appraise(&spec(2022)).expect("valid spec");

    assert!((report.msrp_local - 160_000_000.0).abs() < 1.0);
    assert!((report.final_price_local - 116_640_000.0).abs() < 1.0);
    assert_eq!(report.vehicle_age_years, 3);
    assert_eq!(report.adjustment, PriceAdjustment::AnnualDepreciation);
    assert!(!report.degraded_estimate);
    assert_eq!(report.price_comparison, PriceComparison::Unavailable);
    assert_eq!(report.risk.level, RiskLevel::Low);
    assert_eq!(report.recommendation, Recommendation::Buy);
    assert_eq!(report.depreciation_series.len(), 6);
    assert_eq!(report.score.factors.len(), 7);
}

#[test]
fn schema_less_models_produce_degraded_estimates() {
    let service = service(StubModel::without_schema(log_price_for_160m()));

    let report = service.appraise(&spec(2022)).expect("fallback columns");

    assert!(report.degraded_estimate);
    assert!((report.final_price_local - 116_640_000.0).abs() < 1.0);
}

#[test]
fn out_of_range_year_is_rejected_before_the_model_runs() {
    let service = service(StubModel::with_canonical_schema(log_price_for_160m()));
    let mut vehicle = spec(2022);
    vehicle.year = 1980;

    let err = service.appraise(&vehicle).expect_err("year too old");

    match err {
        AppraisalError::Invalid(InvalidInput::YearOutOfRange(year)) => assert_eq!(year, 1980),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn negative_asking_price_is_rejected() {
    let service = service(StubModel::with_canonical_schema(log_price_for_160m()));
    let mut vehicle = spec(2022);
    vehicle.asking_price = Some(-1.0);

    let err = service.appraise(&vehicle).expect_err("negative price");
    assert!(matches!(
        err,
        AppraisalError::Invalid(InvalidInput::InvalidAskingPrice(_))
    ));
}

#[test]
fn model_failure_yields_no_partial_report() {
    let service = service(StubModel::with_canonical_schema(f64::INFINITY));

    let err = service.appraise(&spec(2022)).expect_err("non-finite");
    assert!(matches!(
        err,
        AppraisalError::Model(ModelError::NonFinite { .. })
    ));
}

#[test]
fn asking_price_feeds_the_comparison_verdict() {
    let service = service(StubModel::with_canonical_schema(log_price_for_160m()));
    let mut vehicle = spec(2022);
    vehicle.asking_price = Some(90_000_000.0);

    let report = service.appraise(&vehicle).expect("valid spec");

    assert_eq!(report.price_comparison, PriceComparison::MuchLower);
    assert!(report
        .findings
        .iter()
        .any(|finding| finding.contains("good buying opportunity")));
}
