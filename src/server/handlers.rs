use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::locality::{LocalityRecord, ResolverError, Role};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// Map resolver failures onto HTTP statuses. A bad pincode is the caller's
/// fault; a missing dataset means the backing artifact is unreachable, so
/// the UI should show a retry affordance rather than "no results".
fn resolver_error(e: ResolverError) -> ApiError {
    let status = match e {
        ResolverError::InvalidPincode(_) => StatusCode::BAD_REQUEST,
        ResolverError::DatasetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    api_error(status, e.to_string())
}

// ─── GET /api/localities ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct LocalitiesQuery {
    pub pincode: Option<String>,
}

#[derive(Serialize)]
pub struct LocalitiesResponse {
    pub pincode: String,
    pub localities: Vec<String>,
}

pub async fn localities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocalitiesQuery>,
) -> Result<Json<LocalitiesResponse>, ApiError> {
    let start = Instant::now();

    let pincode = params.pincode.as_deref().unwrap_or("").trim().to_string();
    if pincode.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'pincode' parameter"));
    }

    let names = state
        .resolver
        .list_localities(&pincode)
        .map_err(resolver_error)?;

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] GET /api/localities?pincode={} -> {} localities ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        pincode,
        names.len(),
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Json(LocalitiesResponse {
        pincode,
        localities: names,
    }))
}

// ─── GET /api/representatives ────────────────────────────────────

#[derive(Deserialize)]
pub struct RepresentativesQuery {
    pub pincode: Option<String>,
    pub locality: Option<String>,
}

#[derive(Serialize)]
pub struct RepresentativesResponse {
    pub record: LocalityRecord,
    pub ward_summary: String,
    pub mla_summary: String,
    pub mp_summary: String,
}

pub async fn representatives(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RepresentativesQuery>,
) -> Result<Json<RepresentativesResponse>, ApiError> {
    let start = Instant::now();

    let pincode = params.pincode.as_deref().unwrap_or("").trim().to_string();
    let locality = params.locality.as_deref().unwrap_or("").trim().to_string();
    if pincode.is_empty() || locality.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Provide 'pincode' and 'locality' parameters",
        ));
    }

    let record = state
        .resolver
        .get_locality_details(&pincode, &locality)
        .map_err(resolver_error)?
        .ok_or_else(|| {
            api_error(
                StatusCode::NOT_FOUND,
                format!("No locality '{}' under pincode {}", locality, pincode),
            )
        })?;

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] GET /api/representatives?pincode={}&locality={} -> {} ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        pincode,
        locality,
        record.name,
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Json(RepresentativesResponse {
        ward_summary: record.representative_summary(Role::Ward),
        mla_summary: record.representative_summary(Role::Mla),
        mp_summary: record.representative_summary(Role::Mp),
        record,
    }))
}

// ─── GET /api/dataset ────────────────────────────────────────────

#[derive(Serialize)]
pub struct DatasetInfo {
    pub version: Option<String>,
    pub pincodes: usize,
    pub records: usize,
    pub skipped_rows: usize,
}

pub async fn dataset_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetInfo>, ApiError> {
    let dataset = state.resolver.load_dataset(false).map_err(resolver_error)?;
    Ok(Json(DatasetInfo {
        version: dataset.version.clone(),
        pincodes: dataset.pincode_count(),
        records: dataset.record_count,
        skipped_rows: dataset.skipped_rows,
    }))
}

// ─── POST /api/reload ────────────────────────────────────────────

pub async fn reload(State(state): State<Arc<AppState>>) -> Result<Json<DatasetInfo>, ApiError> {
    let start = Instant::now();

    state.resolver.invalidate();
    let dataset = state.resolver.load_dataset(true).map_err(resolver_error)?;

    let elapsed = start.elapsed();
    eprintln!(
        "[{}] POST /api/reload -> {} records, {} skipped ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        dataset.record_count,
        dataset.skipped_rows,
        elapsed.as_secs_f64() * 1000.0,
    );

    Ok(Json(DatasetInfo {
        version: dataset.version.clone(),
        pincodes: dataset.pincode_count(),
        records: dataset.record_count,
        skipped_rows: dataset.skipped_rows,
    }))
}
