use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use carprice_ai::appraisal::{
    appraisal_router, AppraisalError, AppraisalReport, AppraisalService, Make, MarketCategory,
    ScoreFactor, VehicleSpec, VehicleStyle,
};
use carprice_ai::config::AppConfig;
use carprice_ai::error::AppError;
use carprice_ai::listings;
use carprice_ai::model::LinearLogPriceModel;
use carprice_ai::telemetry;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Car Price Advisor",
    about = "Estimate used-car prices and run the purchase decision-support pipeline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Appraise a single vehicle and print the report
    Appraise(AppraiseArgs),
    /// Appraise every row of a CSV listing export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Path to a linear model artifact (JSON); bundled reference otherwise
    #[arg(long)]
    model: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AppraiseArgs {
    /// Model year (1990-2025)
    #[arg(long)]
    year: i32,
    /// Engine power in hp (50-1500)
    #[arg(long)]
    engine_hp: u32,
    /// Engine cylinder count (2-16)
    #[arg(long)]
    engine_cylinders: u8,
    /// Market category: Luxury, Crossover, Other, or Unknown
    #[arg(long, default_value = "Unknown", value_parser = parse_market_category)]
    market_category: MarketCategory,
    /// Make: BMW, Audi, Toyota, or Other
    #[arg(long, default_value = "Other", value_parser = parse_make)]
    make: Make,
    /// Vehicle style: Sedan, SUV, or Other
    #[arg(long, default_value = "Other", value_parser = parse_vehicle_style)]
    vehicle_style: VehicleStyle,
    /// Treat the vehicle as a collector/limited item
    #[arg(long)]
    collector: bool,
    /// Asking price in rupiah, for the price-comparison verdict
    #[arg(long)]
    asking_price: Option<f64>,
    /// Path to a linear model artifact (JSON); bundled reference otherwise
    #[arg(long)]
    model: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV listing export to appraise
    #[arg(long)]
    csv: PathBuf,
    /// Path to a linear model artifact (JSON); bundled reference otherwise
    #[arg(long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Appraise(args) => run_appraise(args),
        Command::Batch(args) => run_batch(args),
    }
}

fn load_model(path: Option<&PathBuf>) -> Result<LinearLogPriceModel, AppError> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            LinearLogPriceModel::from_json(file)
                .map_err(|err| AppError::Appraisal(AppraisalError::Model(err)))
        }
        None => Ok(LinearLogPriceModel::reference()),
    }
}

fn parse_market_category(raw: &str) -> Result<MarketCategory, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "luxury" => Ok(MarketCategory::Luxury),
        "crossover" => Ok(MarketCategory::Crossover),
        "other" => Ok(MarketCategory::Other),
        "unknown" => Ok(MarketCategory::Unknown),
        _ => Err(format!(
            "'{raw}' is not a market category (expected Luxury, Crossover, Other, or Unknown)"
        )),
    }
}

fn parse_make(raw: &str) -> Result<Make, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "bmw" => Ok(Make::Bmw),
        "audi" => Ok(Make::Audi),
        "toyota" => Ok(Make::Toyota),
        "other" => Ok(Make::Other),
        _ => Err(format!(
            "'{raw}' is not a supported make (expected BMW, Audi, Toyota, or Other)"
        )),
    }
}

fn parse_vehicle_style(raw: &str) -> Result<VehicleStyle, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "sedan" => Ok(VehicleStyle::Sedan),
        "suv" => Ok(VehicleStyle::Suv),
        "other" => Ok(VehicleStyle::Other),
        _ => Err(format!(
            "'{raw}' is not a supported style (expected Sedan, SUV, or Other)"
        )),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let model = Arc::new(load_model(args.model.as_ref())?);
    let service = Arc::new(AppraisalService::new(model, config.pricing.clone()));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(appraisal_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "car price advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_appraise(args: AppraiseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let model = Arc::new(load_model(args.model.as_ref())?);
    let service = AppraisalService::new(model, config.pricing);

    let spec = VehicleSpec {
        year: args.year,
        engine_hp: args.engine_hp,
        engine_cylinders: args.engine_cylinders,
        market_category: args.market_category,
        make: args.make,
        vehicle_style: args.vehicle_style,
        is_collector: args.collector,
        asking_price: args.asking_price,
    };

    let report = service.appraise(&spec)?;
    render_report(&report);
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let model = Arc::new(load_model(args.model.as_ref())?);
    let service = AppraisalService::new(model, config.pricing);

    let file = File::open(&args.csv)?;
    let specs = listings::parse_listings(file)?;

    println!("Batch appraisal: {} listing(s)", specs.len());
    for (index, spec) in specs.iter().enumerate() {
        match service.appraise(spec) {
            Ok(report) => println!(
                "- row {}: {} {} | final {} | score {:.1} | risk {} | {}",
                index + 1,
                spec.year,
                make_label(spec.make),
                format_rupiah(report.final_price_local),
                report.score.normalized,
                report.risk.level.label(),
                report.recommendation.label()
            ),
            Err(err) => println!("- row {}: failed ({err})", index + 1),
        }
    }

    Ok(())
}

fn render_report(report: &AppraisalReport) {
    println!("Car price appraisal");
    println!("Estimated MSRP:  {}", format_rupiah(report.msrp_local));
    println!(
        "Final price:     {} ({}, age {} year(s))",
        format_rupiah(report.final_price_local),
        report.adjustment.note(),
        report.vehicle_age_years
    );
    if report.degraded_estimate {
        println!("Note: model declared no feature schema; estimate is degraded");
    }

    if report.findings.is_empty() {
        println!("\nFindings: none");
    } else {
        println!("\nFindings");
        for finding in &report.findings {
            println!("- {finding}");
        }
    }

    println!(
        "\nComposite score: {}/{} ({:.1}/100)",
        report.score.raw_total, report.score.max_total, report.score.normalized
    );
    for factor in &report.score.factors {
        println!(
            "- {}: {}/{}",
            factor_label(factor.factor),
            factor.earned,
            factor.max
        );
    }

    if report.risk.flags.is_empty() {
        println!("\nRisk: {} (no flags)", report.risk.level.label());
    } else {
        println!(
            "\nRisk: {} ({})",
            report.risk.level.label(),
            report.risk.flags.join("; ")
        );
    }
    println!("Price comparison: {}", report.price_comparison.label());
    println!("Recommendation:   {}", report.recommendation.label());

    println!("\nProjected value by year");
    for point in &report.depreciation_series {
        println!(
            "- +{} year(s): {}",
            point.year_offset,
            format_rupiah(point.projected_price)
        );
    }
}

fn factor_label(factor: ScoreFactor) -> &'static str {
    match factor {
        ScoreFactor::Age => "age",
        ScoreFactor::EnginePower => "engine power",
        ScoreFactor::Cylinders => "cylinders",
        ScoreFactor::MarketCategory => "market category",
        ScoreFactor::VehicleStyle => "vehicle style",
        ScoreFactor::Collector => "collector status",
        ScoreFactor::PriceComparison => "price comparison",
    }
}

fn make_label(make: Make) -> &'static str {
    match make {
        Make::Bmw => "BMW",
        Make::Audi => "Audi",
        Make::Toyota => "Toyota",
        Make::Other => "Other",
    }
}

fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        grouped.push(digit);
        let remaining = digits.len() - index - 1;
        if remaining > 0 && remaining % 3 == 0 {
            grouped.push('.');
        }
    }

    if rounded < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_formatting_groups_thousands() {
        assert_eq!(format_rupiah(116_640_000.0), "Rp 116.640.000");
        assert_eq!(format_rupiah(950.0), "Rp 950");
        assert_eq!(format_rupiah(0.4), "Rp 0");
    }

    #[test]
    fn market_category_parsing_is_case_insensitive_but_strict() {
        assert_eq!(parse_market_category("luxury"), Ok(MarketCategory::Luxury));
        assert!(parse_market_category("performance").is_err());
    }

    #[test]
    fn make_parsing_rejects_unlisted_brands() {
        assert_eq!(parse_make("BMW"), Ok(Make::Bmw));
        assert!(parse_make("Honda").is_err());
    }
}
