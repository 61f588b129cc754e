pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::layout::handlers as layout_handlers;
use crate::quantity::handlers as quantity_handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Quantity engines
        .route("/api/v1/policy", get(quantity_handlers::handle_get_policy))
        .route("/api/v1/specs", post(quantity_handlers::handle_specs))
        .route(
            "/api/v1/equipment/estimate",
            post(quantity_handlers::handle_estimate),
        )
        // Print layout
        .route("/api/v1/layout/pages", post(layout_handlers::handle_layout))
        .route("/api/v1/checklist", post(layout_handlers::handle_checklist))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::LayoutConfig;
    use crate::quantity::QuantityPolicy;

    fn make_router() -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            policy_path: None,
            layout: LayoutConfig {
                first_page_budget: 16,
                continuation_page_budget: 32,
                section_overhead_lines: 2,
            },
        };
        build_router(AppState::new(config, QuantityPolicy::default()))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = make_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = make_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "beo-api");
    }

    #[tokio::test]
    async fn test_policy_endpoint_returns_default_tables() {
        let (status, body) = get_json("/api/v1/policy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier_bands"].as_array().unwrap().len(), 6);
        assert_eq!(body["tier_base_portions"]["1"], 125);
    }

    #[tokio::test]
    async fn test_specs_endpoint() {
        let (status, body) = post_json(
            "/api/v1/specs",
            json!({
                "guest_count": 150,
                "items": [
                    {"item_id": "s1", "item_name": "Basil Cream Sauce", "section": "BUFFET"},
                    {"item_id": "p1", "item_name": "Crab Cakes", "section": "PASSED_APPS", "override": "400 pc"},
                    {"item_id": "b1", "item_name": "Lemonade", "section": "BEVERAGES"}
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["specs"][0]["spec"], "2-3 qt");
        assert_eq!(body["specs"][1]["spec"], "400 pc");
        assert_eq!(body["specs"][2]["spec"], "—");
    }

    #[tokio::test]
    async fn test_estimate_endpoint() {
        let (status, body) = post_json(
            "/api/v1/equipment/estimate",
            json!({
                "guest_count": 100,
                "event_type": "social",
                "service_style": "buffet",
                "items": [
                    {"id": "a", "name": "Short Rib", "category": "passed"},
                    {"id": "b", "name": "Salmon", "category": "plated"}
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["per_item"][1]["half_pan_count"], 0);
        assert_eq!(body["totals"]["half_pans_total"], 4);
        assert_eq!(body["metadata"]["service_style"], "buffet");
    }

    #[tokio::test]
    async fn test_estimate_rejects_unknown_category() {
        let response = make_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/equipment/estimate")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"guest_count": 10, "items": [{"id": "a", "name": "x", "category": "family"}]})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_layout_endpoint_uses_configured_budgets() {
        let sections: Vec<Value> = (0..3)
            .map(|i| {
                json!({
                    "section_id": format!("S{i}"),
                    "items": (0..8).map(|j| json!({"id": format!("{i}-{j}"), "name": "Dish"})).collect::<Vec<_>>()
                })
            })
            .collect();
        // 10 lines each: one section on page 1 (16), two on page 2 (32).
        let (status, body) = post_json("/api/v1/layout/pages", json!({ "sections": sections })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page_count"], 2);
        assert_eq!(body["pages"][1]["sections"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_layout_endpoint_empty_menu_one_page() {
        let (status, body) = post_json("/api/v1/layout/pages", json!({ "sections": [] })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page_count"], 1);
        assert_eq!(body["pages"][0]["page_number"], 1);
    }

    #[tokio::test]
    async fn test_layout_endpoint_zero_budget_is_validation_error() {
        let (status, body) = post_json(
            "/api/v1/layout/pages",
            json!({ "sections": [], "first_page_budget": 0 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_layout_endpoint_huge_overhead_is_validation_error() {
        let (status, body) = post_json(
            "/api/v1/layout/pages",
            json!({
                "sections": [{"section_id": "BUFFET", "items": [{"id": "a", "name": "Dish"}]}],
                "section_overhead_lines": 4294967295u64
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_checklist_endpoint_kitchen_mode() {
        let (status, body) = post_json(
            "/api/v1/checklist",
            json!({
                "mode": "kitchen",
                "guest_count": 40,
                "sections": [{
                    "section_id": "BUFFET",
                    "items": [{"id": "salad", "name": "Green Salad", "loaded": true}]
                }],
                "state": { "checks": { "server:BUFFET:salad:0": false } }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let slot = &body["pages"][0]["sections"][0]["items"][0]["rows"][0]["slot"];
        assert_eq!(slot["kind"], "checkbox");
        assert_eq!(slot["key"], "kitchen:BUFFET:salad:0");
        assert_eq!(slot["checked"], true);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get_json("/api/v1/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
