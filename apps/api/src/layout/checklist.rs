//! Checklist Mode Renderer — decides which auxiliary value sits beside each row.
//!
//! State is caller-owned and read-only here: overrides, checkbox values and
//! pack-out text arrive as a snapshot keyed by the strings built below.
//!
//! # Keys
//! - spec override:  `<section>:<item>:<row>` (legacy `<section>:<item>` for row 0)
//! - checkbox:       `<mode>:<section>:<item>:<row>` for kitchen, expeditor, server
//! - pack-out text:  `<section>:<item>`, parent row only

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layout::paginate::Page;
use crate::layout::rows::ExpandedItem;
use crate::models::Row;
use crate::quantity::policy::QuantityPolicy;
use crate::quantity::spec::compute_spec_with_policy;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistMode {
    Spec,
    Packout,
    Kitchen,
    Expeditor,
    Server,
}

impl ChecklistMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistMode::Spec => "spec",
            ChecklistMode::Packout => "packout",
            ChecklistMode::Kitchen => "kitchen",
            ChecklistMode::Expeditor => "expeditor",
            ChecklistMode::Server => "server",
        }
    }

    fn is_checkbox(&self) -> bool {
        matches!(
            self,
            ChecklistMode::Kitchen | ChecklistMode::Expeditor | ChecklistMode::Server
        )
    }
}

/// Caller-owned interactive state snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistState {
    #[serde(default)]
    pub overrides: HashMap<String, String>,
    #[serde(default)]
    pub checks: HashMap<String, bool>,
    #[serde(default)]
    pub packout: HashMap<String, String>,
}

/// The right-hand value resolved for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowSlot {
    /// `computed` is what the screen shows; `printed` is what goes on paper.
    Spec {
        key: String,
        computed: String,
        override_text: Option<String>,
        printed: String,
    },
    Checkbox {
        key: String,
        checked: bool,
    },
    Packout {
        key: String,
        text: String,
    },
    /// Pack-out mode child rows carry no field.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistRow {
    pub row_index: usize,
    pub row: Row,
    pub slot: RowSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub item_id: String,
    pub rows: Vec<ChecklistRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSection {
    pub section_id: String,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistPage {
    pub page_number: u32,
    pub sections: Vec<ChecklistSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Key construction
// ────────────────────────────────────────────────────────────────────────────

pub fn override_key(section_id: &str, item_id: &str, row_index: usize) -> String {
    format!("{section_id}:{item_id}:{row_index}")
}

pub fn legacy_override_key(section_id: &str, item_id: &str) -> String {
    format!("{section_id}:{item_id}")
}

pub fn check_key(mode: ChecklistMode, section_id: &str, item_id: &str, row_index: usize) -> String {
    format!("{}:{section_id}:{item_id}:{row_index}", mode.as_str())
}

pub fn packout_key(section_id: &str, item_id: &str) -> String {
    format!("{section_id}:{item_id}")
}

// ────────────────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────────────────

/// Row key, then legacy key (row 0), then the item's persisted override (row 0).
/// Blank values count as absent.
pub fn resolve_override(
    state: &ChecklistState,
    section_id: &str,
    item: &ExpandedItem,
    row_index: usize,
) -> Option<String> {
    let non_empty = |value: Option<&String>| value.filter(|v| !v.is_empty()).cloned();

    if let Some(text) = non_empty(state.overrides.get(&override_key(section_id, &item.item_id, row_index))) {
        return Some(text);
    }
    if row_index != 0 {
        return None;
    }
    non_empty(state.overrides.get(&legacy_override_key(section_id, &item.item_id)))
        .or_else(|| non_empty(item.override_text.as_ref()))
}

/// Non-empty override first, computed spec otherwise.
pub fn printed_spec(computed: &str, override_text: Option<&str>) -> String {
    match override_text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => computed.to_string(),
    }
}

pub fn resolve_checked(
    state: &ChecklistState,
    mode: ChecklistMode,
    section_id: &str,
    item: &ExpandedItem,
    row_index: usize,
) -> bool {
    state
        .checks
        .get(&check_key(mode, section_id, &item.item_id, row_index))
        .copied()
        .unwrap_or(item.loaded)
}

/// Resolves the slot for one row of an item.
#[allow(clippy::too_many_arguments)]
pub fn resolve_slot(
    mode: ChecklistMode,
    state: &ChecklistState,
    policy: &QuantityPolicy,
    guest_count: i64,
    section_id: &str,
    item: &ExpandedItem,
    row_index: usize,
    row: &Row,
) -> RowSlot {
    match mode {
        ChecklistMode::Spec => {
            let computed = compute_spec_with_policy(
                policy,
                item.spec_section(section_id),
                &row.text,
                guest_count,
                None,
            );
            let override_text = resolve_override(state, section_id, item, row_index);
            let printed = printed_spec(&computed, override_text.as_deref());
            RowSlot::Spec {
                key: override_key(section_id, &item.item_id, row_index),
                computed,
                override_text,
                printed,
            }
        }
        ChecklistMode::Packout if row_index == 0 => {
            let key = packout_key(section_id, &item.item_id);
            let text = state.packout.get(&key).cloned().unwrap_or_default();
            RowSlot::Packout { key, text }
        }
        ChecklistMode::Packout => RowSlot::Empty,
        checkbox_mode => {
            debug_assert!(checkbox_mode.is_checkbox());
            RowSlot::Checkbox {
                key: check_key(checkbox_mode, section_id, &item.item_id, row_index),
                checked: resolve_checked(state, checkbox_mode, section_id, item, row_index),
            }
        }
    }
}

/// Decorates every row of a page partition for the given mode.
pub fn render_checklist(
    pages: &[Page],
    mode: ChecklistMode,
    state: &ChecklistState,
    policy: &QuantityPolicy,
    guest_count: i64,
) -> Vec<ChecklistPage> {
    pages
        .iter()
        .map(|page| ChecklistPage {
            page_number: page.page_number,
            sections: page
                .sections
                .iter()
                .map(|section| ChecklistSection {
                    section_id: section.section_id.clone(),
                    items: section
                        .items
                        .iter()
                        .map(|item| ChecklistItem {
                            item_id: item.item_id.clone(),
                            rows: item
                                .rows
                                .iter()
                                .enumerate()
                                .map(|(row_index, row)| ChecklistRow {
                                    row_index,
                                    row: row.clone(),
                                    slot: resolve_slot(
                                        mode,
                                        state,
                                        policy,
                                        guest_count,
                                        &section.section_id,
                                        item,
                                        row_index,
                                        row,
                                    ),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
