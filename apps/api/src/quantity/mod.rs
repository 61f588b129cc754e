// Quantity engines: the kitchen spec strings and the equipment estimate.
// Both read the same versioned policy tables but classify items on different
// axes (printed section vs. category) and are never reconciled.

pub mod equipment;
pub mod handlers;
pub mod policy;
pub mod rules;
pub mod spec;

pub use equipment::{estimate_equipment, EquipmentEstimate, EstimateItem, EstimateRequest};
pub use policy::{QuantityPolicy, TierBand};
pub use spec::{compute_spec, compute_spec_with_policy};
