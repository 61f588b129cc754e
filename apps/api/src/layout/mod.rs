// Print layout: row expansion, page partitioning and checklist decoration.
// Everything here is synchronous and linear in the total row count, so handlers
// call it inline rather than through spawn_blocking.

pub mod checklist;
pub mod handlers;
pub mod paginate;
pub mod rows;

// Re-export the public API consumed by other modules (config, handlers).
pub use checklist::{render_checklist, ChecklistMode, ChecklistState, RowSlot};
pub use paginate::{layout_menu, plan_pages, LayoutConfig, LayoutConfigError, Page};
pub use rows::{expand_item, expand_sections, ExpandedItem, ExpandedSection};
