mod payload;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::benefits::{BenefitInfo, BenefitKind};
use crate::core::catalog::{self, Occupation, Region};
use crate::core::limits::CURRENT_LIMITS;
use crate::core::{compute_benchmark, compute_estimate};

pub use payload::{
    BenchmarkQuery, EstimatePayload, InputError, apply_benefit, benchmark_inputs, build_inputs,
    parse_benefit_kind, parse_region, sanitize,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OccupationGroup {
    category: &'static str,
    occupations: Vec<&'static Occupation>,
}

#[derive(Debug, Serialize)]
struct RegionEntry {
    id: Region,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/occupations", get(occupations_handler))
        .route("/api/metros", get(metros_handler))
        .route("/api/regions", get(regions_handler))
        .route("/api/benefits", get(benefits_handler))
        .route("/api/limits", get(limits_handler))
        .route("/api/benchmark", get(benchmark_handler))
        .route("/api/estimate", post(estimate_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("totalcomp HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{}/api/occupations", addr.port());

    axum::serve(listener, router()).await
}

async fn occupations_handler() -> Response {
    let groups: Vec<OccupationGroup> = catalog::occupations_by_category()
        .into_iter()
        .map(|(category, occupations)| OccupationGroup {
            category,
            occupations,
        })
        .collect();
    json_response(StatusCode::OK, groups)
}

async fn metros_handler() -> Response {
    json_response(StatusCode::OK, catalog::list_metro_areas())
}

async fn regions_handler() -> Response {
    let regions: Vec<RegionEntry> = catalog::list_regions()
        .iter()
        .map(|region| RegionEntry {
            id: *region,
            name: region.display_name(),
        })
        .collect();
    json_response(StatusCode::OK, regions)
}

async fn benefits_handler() -> Response {
    let benefits: Vec<&'static BenefitInfo> =
        BenefitKind::selectable().map(BenefitKind::info).collect();
    json_response(StatusCode::OK, benefits)
}

async fn limits_handler() -> Response {
    json_response(StatusCode::OK, CURRENT_LIMITS)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn benchmark_handler(query: Result<Query<BenchmarkQuery>, QueryRejection>) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::warn!("rejected benchmark query: {}", rejection.body_text());
            return error_response(rejection.status(), &rejection.body_text());
        }
    };
    let inputs = match benchmark_inputs(query) {
        Ok(inputs) => inputs,
        Err(err) => return rejected(err),
    };
    match compute_benchmark(&inputs, inputs.cash_salary) {
        Some(benchmark) => json_response(StatusCode::OK, benchmark),
        None => error_response(StatusCode::NOT_FOUND, "Unknown or missing occupationId"),
    }
}

async fn estimate_handler(payload: Result<Json<EstimatePayload>, JsonRejection>) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!("rejected estimate payload: {}", rejection.body_text());
            return error_response(rejection.status(), &rejection.body_text());
        }
    };
    let inputs = match build_inputs(payload) {
        Ok(inputs) => inputs,
        Err(err) => return rejected(err),
    };

    let estimate = compute_estimate(&inputs);
    tracing::debug!(
        total = estimate.breakdown.total_compensation,
        benchmark = estimate.benchmark.is_some(),
        warnings = estimate.warnings.len(),
        "computed estimate"
    );
    json_response(StatusCode::OK, estimate)
}

fn rejected(err: InputError) -> Response {
    tracing::warn!("rejected request: {err}");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
