//! Quantity Policy — versioned menu-planning tables shared by both calculators.
//!
//! The tier bands (spec strings) and base portions (equipment numbers) change with
//! catering policy, not with code. `QuantityPolicy::default()` carries the house
//! tables; a JSON file can replace them at startup via `POLICY_PATH`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Category;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A guest-count bracket and its serving descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBand {
    pub max_guests: i64,
    pub protein_qty: String,
    pub side_qty: String,
    pub sauce_qty: String,
}

impl TierBand {
    fn new(max_guests: i64, protein: &str, side: &str, sauce: &str) -> Self {
        TierBand {
            max_guests,
            protein_qty: protein.to_string(),
            side_qty: side.to_string(),
            sauce_qty: sauce.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityPolicy {
    pub version: String,
    /// Ordered by ascending `max_guests`; the last band is open-ended.
    pub tier_bands: Vec<TierBand>,
    /// Portions per 100 guests for each service tier.
    pub tier_base_portions: BTreeMap<i32, u32>,
    /// Used when a tier is outside `tier_base_portions`.
    pub default_base_portions: u32,
    /// Redundancy multiplier per category; missing categories use 1.0.
    pub redundancy_shift: BTreeMap<Category, f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("policy must define at least one tier band")]
    NoTierBands,

    #[error("tier band max_guests must be strictly ascending (band {index}: {max_guests})")]
    BandsNotAscending { index: usize, max_guests: i64 },

    #[error("base portions must be positive (tier {tier})")]
    NonPositivePortions { tier: i32 },

    #[error("redundancy shift for {category} must be a positive finite number, got {shift}")]
    InvalidShift { category: &'static str, shift: f64 },
}

// ────────────────────────────────────────────────────────────────────────────
// Defaults and loading
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_POLICY_VERSION: &str = "2024.1";

impl Default for QuantityPolicy {
    fn default() -> Self {
        QuantityPolicy {
            version: DEFAULT_POLICY_VERSION.to_string(),
            tier_bands: vec![
                TierBand::new(40, "1 full", "1 full", "1 qt"),
                TierBand::new(75, "1 full", "1 full", "1-2 qt"),
                TierBand::new(125, "2 full", "1-2 full", "2 qt"),
                TierBand::new(175, "2-3 full", "2 full", "2-3 qt"),
                TierBand::new(225, "3 full", "2-3 full", "3 qt"),
                TierBand::new(300, "3-4 full", "3 full", "3-4 qt"),
            ],
            tier_base_portions: BTreeMap::from([(1, 125), (2, 100), (3, 75), (4, 50), (5, 25)]),
            default_base_portions: 75,
            redundancy_shift: BTreeMap::from([
                (Category::Passed, 1.15),
                (Category::Buffet, 1.10),
                (Category::Plated, 1.00),
                (Category::Stationed, 1.08),
                (Category::Dessert, 1.12),
            ]),
        }
    }
}

impl QuantityPolicy {
    /// Reads a JSON policy file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file '{}'", path.display()))?;
        let policy: QuantityPolicy = serde_json::from_str(&raw)
            .with_context(|| format!("Policy file '{}' is not valid JSON", path.display()))?;
        policy
            .validate()
            .with_context(|| format!("Policy file '{}' failed validation", path.display()))?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.tier_bands.is_empty() {
            return Err(PolicyError::NoTierBands);
        }
        for (index, pair) in self.tier_bands.windows(2).enumerate() {
            if pair[1].max_guests <= pair[0].max_guests {
                return Err(PolicyError::BandsNotAscending {
                    index: index + 1,
                    max_guests: pair[1].max_guests,
                });
            }
        }
        for (&tier, &portions) in &self.tier_base_portions {
            if portions == 0 {
                return Err(PolicyError::NonPositivePortions { tier });
            }
        }
        if self.default_base_portions == 0 {
            return Err(PolicyError::NonPositivePortions { tier: 0 });
        }
        for (category, &shift) in &self.redundancy_shift {
            if !shift.is_finite() || shift <= 0.0 {
                return Err(PolicyError::InvalidShift {
                    category: category.as_str(),
                    shift,
                });
            }
        }
        Ok(())
    }

    /// First band whose `max_guests >= guest_count`, else the last band.
    ///
    /// Validation guarantees at least one band; an unvalidated empty policy falls
    /// back to the house table.
    pub fn active_band(&self, guest_count: i64) -> TierBand {
        match self
            .tier_bands
            .iter()
            .find(|band| band.max_guests >= guest_count)
            .or_else(|| self.tier_bands.last())
        {
            Some(band) => band.clone(),
            None => QuantityPolicy::default().active_band(guest_count),
        }
    }

    /// Index of the active band. Used to check lookup monotonicity.
    pub fn active_band_index(&self, guest_count: i64) -> usize {
        self.tier_bands
            .iter()
            .position(|band| band.max_guests >= guest_count)
            .unwrap_or_else(|| self.tier_bands.len().saturating_sub(1))
    }

    pub fn base_portions(&self, tier: i32) -> u32 {
        self.tier_base_portions
            .get(&tier)
            .copied()
            .unwrap_or(self.default_base_portions)
    }

    pub fn shift_for(&self, category: Category) -> f64 {
        self.redundancy_shift.get(&category).copied().unwrap_or(1.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
