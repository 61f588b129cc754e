//! Axum route handlers for pagination and checklist rendering.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::checklist::{render_checklist, ChecklistMode, ChecklistPage, ChecklistState};
use crate::layout::paginate::{layout_menu, LayoutConfig, Page};
use crate::models::MenuSectionInput;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Per-request budgets; any field left out falls back to the service config.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetOverrides {
    pub first_page_budget: Option<u32>,
    pub continuation_page_budget: Option<u32>,
    pub section_overhead_lines: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub sections: Vec<MenuSectionInput>,
    #[serde(flatten)]
    pub budgets: BudgetOverrides,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub page_count: usize,
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct ChecklistRequest {
    pub mode: ChecklistMode,
    pub guest_count: i64,
    #[serde(default)]
    pub sections: Vec<MenuSectionInput>,
    #[serde(default)]
    pub state: ChecklistState,
    #[serde(flatten)]
    pub budgets: BudgetOverrides,
}

#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    pub mode: ChecklistMode,
    pub pages: Vec<ChecklistPage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout/pages
///
/// Expands items into rows and partitions sections across printed pages.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let config = resolve_layout_config(&state.config.layout, &request.budgets)?;
    let pages = layout_menu(&request.sections, &config);
    Ok(Json(LayoutResponse {
        page_count: pages.len(),
        pages,
    }))
}

/// POST /api/v1/checklist
///
/// Lays out the menu, then resolves the mode-specific value for every row
/// against the caller's state snapshot.
pub async fn handle_checklist(
    State(state): State<AppState>,
    Json(request): Json<ChecklistRequest>,
) -> Result<Json<ChecklistResponse>, AppError> {
    let config = resolve_layout_config(&state.config.layout, &request.budgets)?;
    let pages = layout_menu(&request.sections, &config);
    let rendered = render_checklist(
        &pages,
        request.mode,
        &request.state,
        &state.policy,
        request.guest_count,
    );
    Ok(Json(ChecklistResponse {
        mode: request.mode,
        pages: rendered,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn resolve_layout_config(base: &LayoutConfig, overrides: &BudgetOverrides) -> Result<LayoutConfig, AppError> {
    let config = LayoutConfig {
        first_page_budget: overrides.first_page_budget.unwrap_or(base.first_page_budget),
        continuation_page_budget: overrides
            .continuation_page_budget
            .unwrap_or(base.continuation_page_budget),
        section_overhead_lines: overrides
            .section_overhead_lines
            .unwrap_or(base.section_overhead_lines),
    };

    config
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_fall_back_to_base() {
        let base = LayoutConfig::default();
        let overrides = BudgetOverrides {
            first_page_budget: Some(16),
            ..BudgetOverrides::default()
        };
        let config = resolve_layout_config(&base, &overrides).unwrap();
        assert_eq!(config.first_page_budget, 16);
        assert_eq!(config.continuation_page_budget, base.continuation_page_budget);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let overrides = BudgetOverrides {
            continuation_page_budget: Some(0),
            ..BudgetOverrides::default()
        };
        let result = resolve_layout_config(&LayoutConfig::default(), &overrides);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_oversized_overhead_rejected() {
        let overrides = BudgetOverrides {
            section_overhead_lines: Some(u32::MAX),
            ..BudgetOverrides::default()
        };
        match resolve_layout_config(&LayoutConfig::default(), &overrides) {
            Err(AppError::Validation(message)) => {
                assert!(message.contains("section_overhead_lines"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
