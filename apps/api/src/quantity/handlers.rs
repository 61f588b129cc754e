//! Axum route handlers for the quantity engines.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::quantity::equipment::{estimate_equipment, EquipmentEstimate, EstimateRequest};
use crate::quantity::policy::QuantityPolicy;
use crate::quantity::spec::{compute_specs, ItemSpec, SpecInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SpecsRequest {
    pub guest_count: i64,
    #[serde(default)]
    pub items: Vec<SpecInput>,
}

#[derive(Debug, Serialize)]
pub struct SpecsResponse {
    pub specs: Vec<ItemSpec>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/specs
///
/// Computes the kitchen spec string for each item, in request order.
pub async fn handle_specs(
    State(state): State<AppState>,
    Json(request): Json<SpecsRequest>,
) -> Result<Json<SpecsResponse>, AppError> {
    let specs = compute_specs(&state.policy, request.guest_count, &request.items);
    Ok(Json(SpecsResponse { specs }))
}

/// POST /api/v1/equipment/estimate
///
/// Per-item pan/chafer counts, totals and a confidence score.
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EquipmentEstimate>, AppError> {
    Ok(Json(estimate_equipment(&state.policy, &request)))
}

/// GET /api/v1/policy
pub async fn handle_get_policy(State(state): State<AppState>) -> Json<QuantityPolicy> {
    Json(state.policy.as_ref().clone())
}
