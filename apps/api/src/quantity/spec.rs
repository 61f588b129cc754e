//! Spec Calculator — kitchen-facing quantity strings for a menu item.
//!
//! Total over its inputs: unknown sections yield `"—"`, odd guest counts just run
//! through the formulas. A non-empty manual override always wins.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::quantity::policy::QuantityPolicy;
use crate::quantity::rules::{is_sauce_name, route_section, vessel_for, SpecRule};

/// Returned for sections without a quantity rule.
pub const NO_SPEC: &str = "—";

const PIECES_PER_GUEST: i64 = 5;
const PIECES_PER_TRAY: i64 = 12;

/// One spec request as sent by a caller. `item_id` is opaque to the calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecInput {
    pub item_id: String,
    pub item_name: String,
    pub section: String,
    #[serde(default, rename = "override")]
    pub override_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub item_id: String,
    pub spec: String,
}

/// Computes the display spec using the house policy tables.
pub fn compute_spec(
    section: &str,
    item_name: &str,
    guest_count: i64,
    override_text: Option<&str>,
) -> String {
    compute_spec_with_policy(
        &QuantityPolicy::default(),
        section,
        item_name,
        guest_count,
        override_text,
    )
}

pub fn compute_spec_with_policy(
    policy: &QuantityPolicy,
    section: &str,
    item_name: &str,
    guest_count: i64,
    override_text: Option<&str>,
) -> String {
    if let Some(text) = override_text.filter(|t| !t.is_empty()) {
        return text.to_string();
    }

    match route_section(section) {
        Some(SpecRule::PassedApp) => passed_spec(guest_count),
        Some(SpecRule::PresentedApp) => presented_spec(guest_count).to_string(),
        Some(SpecRule::TierBand) => tier_band_spec(policy, item_name, guest_count),
        None => NO_SPEC.to_string(),
    }
}

/// Batch form used by the HTTP surface.
pub fn compute_specs(policy: &QuantityPolicy, guest_count: i64, inputs: &[SpecInput]) -> Vec<ItemSpec> {
    if guest_count < 0 {
        warn!(guest_count, "Spec requested for negative guest count");
    }
    inputs
        .iter()
        .map(|input| ItemSpec {
            item_id: input.item_id.clone(),
            spec: compute_spec_with_policy(
                policy,
                &input.section,
                &input.item_name,
                guest_count,
                input.override_text.as_deref(),
            ),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

/// Five pieces per guest, rounded up to a full tray of 12.
fn passed_spec(guest_count: i64) -> String {
    let pieces = guest_count * PIECES_PER_GUEST;
    format!("{} pc", round_up_to_multiple(pieces, PIECES_PER_TRAY))
}

fn presented_spec(guest_count: i64) -> &'static str {
    if guest_count < 75 {
        "1 full"
    } else if guest_count <= 100 {
        "1-2 full"
    } else {
        "2 full"
    }
}

fn tier_band_spec(policy: &QuantityPolicy, item_name: &str, guest_count: i64) -> String {
    let band = policy.active_band(guest_count);
    if is_sauce_name(item_name) {
        return band.sauce_qty;
    }
    format!("{} {}", band.side_qty, vessel_for(item_name))
}

/// Ceiling to a multiple of `step`, correct for negative values.
fn round_up_to_multiple(value: i64, step: i64) -> i64 {
    -((-value).div_euclid(step)) * step
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
