//! Equipment Estimator — turns a categorized menu into pan/chafer totals.
//!
//! Runs on a different axis than the spec calculator: items are classified by
//! `Category`, not by printed section, and the two engines are never cross-checked.
//!
//! Algorithm per item:
//! 1. tier = override, else base tier from category + event type
//! 2. portions per 100 guests = ceil(base portions × redundancy shift)
//! 3. total portions = ceil(portions per 100 × guests / 100)
//! 4. half pans = ceil(total / 25) (plated: 0), chafers = ceil(half pans / 2)
//! 5. confidence from tier, category and guest count, clamped to 50–100

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Category;
use crate::quantity::policy::QuantityPolicy;

pub const ENGINE_VERSION: &str = "equipment-v2";

const PORTIONS_PER_HALF_PAN: f64 = 25.0;
const HALF_PANS_PER_CHAFER: f64 = 2.0;
const ROUND_CHAFER_SHARE: f64 = 0.15;

const BASE_CONFIDENCE: i32 = 85;
const MIN_CONFIDENCE: i32 = 50;
const MAX_CONFIDENCE: i32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub tier_override: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub items: Vec<EstimateItem>,
    pub guest_count: i64,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub service_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEstimate {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub tier: i32,
    pub portions_per_100: i64,
    pub total_portions: i64,
    pub half_pan_count: i64,
    pub chafer_count: i64,
    pub confidence: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentTotals {
    pub chafers_total: i64,
    pub half_pans_total: i64,
    pub full_pans_total: i64,
    pub round_chafers_total: i64,
}

/// Informational only; never read by the calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateMetadata {
    pub guest_count: i64,
    pub service_style: String,
    pub event_type: String,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub policy_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentEstimate {
    pub per_item: Vec<ItemEstimate>,
    pub totals: EquipmentTotals,
    /// Rounded mean of per-item confidence; 0 for an empty menu.
    pub confidence: i32,
    pub metadata: EstimateMetadata,
}

// ────────────────────────────────────────────────────────────────────────────
// Core estimator
// ────────────────────────────────────────────────────────────────────────────

pub fn estimate_equipment(policy: &QuantityPolicy, request: &EstimateRequest) -> EquipmentEstimate {
    let per_item: Vec<ItemEstimate> = request
        .items
        .iter()
        .map(|item| {
            estimate_item(
                policy,
                item,
                request.guest_count,
                &request.event_type,
            )
        })
        .collect();

    let totals = aggregate_totals(&per_item);
    let confidence = overall_confidence(&per_item);

    debug!(
        items = per_item.len(),
        guest_count = request.guest_count,
        chafers = totals.chafers_total,
        half_pans = totals.half_pans_total,
        confidence,
        "Equipment estimate computed"
    );

    EquipmentEstimate {
        per_item,
        totals,
        confidence,
        metadata: EstimateMetadata {
            guest_count: request.guest_count,
            service_style: request.service_style.clone(),
            event_type: request.event_type.clone(),
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            policy_version: policy.version.clone(),
        },
    }
}

pub fn estimate_item(
    policy: &QuantityPolicy,
    item: &EstimateItem,
    guest_count: i64,
    event_type: &str,
) -> ItemEstimate {
    let tier = item
        .tier_override
        .unwrap_or_else(|| base_tier(item.category, event_type));

    let base_portions = policy.base_portions(tier) as f64;
    let portions_per_100 = (base_portions * policy.shift_for(item.category)).ceil() as i64;
    let total_portions = (portions_per_100 as f64 * guest_count as f64 / 100.0).ceil() as i64;

    let half_pan_count = if item.category == Category::Plated {
        0
    } else {
        (total_portions as f64 / PORTIONS_PER_HALF_PAN).ceil() as i64
    };
    let chafer_count = (half_pan_count as f64 / HALF_PANS_PER_CHAFER).ceil() as i64;

    ItemEstimate {
        id: item.id.clone(),
        name: item.name.clone(),
        category: item.category,
        tier,
        portions_per_100,
        total_portions,
        half_pan_count,
        chafer_count,
        confidence: item_confidence(tier, item.category, guest_count),
    }
}

/// Service tier implied by category and event type. Event type is case-sensitive.
pub fn base_tier(category: Category, event_type: &str) -> i32 {
    match category {
        Category::Passed if event_type == "wedding" => 2,
        Category::Passed => 3,
        Category::Buffet if event_type == "corporate" => 3,
        Category::Buffet => 2,
        Category::Plated => 1,
        Category::Stationed => 3,
        Category::Dessert => 4,
        Category::Presented => 3,
    }
}

fn item_confidence(tier: i32, category: Category, guest_count: i64) -> i32 {
    let mut confidence = BASE_CONFIDENCE;

    match tier {
        1 => confidence += 10,
        2 => confidence += 5,
        t if t >= 4 => confidence -= 5,
        _ => {}
    }
    if category == Category::Plated {
        confidence += 10;
    }
    if category == Category::Passed && guest_count > 200 {
        confidence -= 5;
    }
    if guest_count < 20 {
        confidence -= 10;
    }
    if guest_count > 500 {
        confidence -= 5;
    }

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

fn aggregate_totals(per_item: &[ItemEstimate]) -> EquipmentTotals {
    let chafers_total: i64 = per_item.iter().map(|e| e.chafer_count).sum();
    let half_pans_total: i64 = per_item.iter().map(|e| e.half_pan_count).sum();

    EquipmentTotals {
        chafers_total,
        half_pans_total,
        full_pans_total: (half_pans_total as f64 / 2.0).floor() as i64,
        round_chafers_total: (chafers_total as f64 * ROUND_CHAFER_SHARE).ceil() as i64,
    }
}

fn overall_confidence(per_item: &[ItemEstimate]) -> i32 {
    if per_item.is_empty() {
        return 0;
    }
    let sum: i32 = per_item.iter().map(|e| e.confidence).sum();
    (sum as f64 / per_item.len() as f64).round() as i32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
