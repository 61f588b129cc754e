//! Page Layout Planner — partitions sections across fixed-capacity printed pages.
//!
//! # Rules
//! - Single greedy pass in input order, no backtracking.
//! - A section is never split. One that exceeds a page on its own still gets placed,
//!   alone, on whatever page is open.
//! - Page 1 has a smaller budget (event header and banners); later pages use the
//!   continuation budget.
//! - A page that reaches its budget is closed immediately.
//!
//! The planner does not know what decorates the first or last page.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::layout::rows::{expand_sections, ExpandedSection};
use crate::models::MenuSectionInput;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Line-unit budgets for the printed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Lines available on page 1, below the event header.
    pub first_page_budget: u32,
    /// Lines available on pages 2 and later.
    pub continuation_page_budget: u32,
    /// Title/banner lines charged to every section.
    pub section_overhead_lines: u32,
}

pub const DEFAULT_FIRST_PAGE_BUDGET: u32 = 24;
pub const DEFAULT_CONTINUATION_PAGE_BUDGET: u32 = 48;
pub const DEFAULT_SECTION_OVERHEAD_LINES: u32 = 2;
/// Upper bound on per-section overhead; a title block never needs more.
pub const MAX_SECTION_OVERHEAD_LINES: u32 = 64;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutConfigError {
    #[error("page budgets must be greater than zero")]
    ZeroBudget,

    #[error("section_overhead_lines must be at most {max}, got {got}")]
    OverheadTooLarge { got: u32, max: u32 },
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            first_page_budget: DEFAULT_FIRST_PAGE_BUDGET,
            continuation_page_budget: DEFAULT_CONTINUATION_PAGE_BUDGET,
            section_overhead_lines: DEFAULT_SECTION_OVERHEAD_LINES,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if self.first_page_budget == 0 || self.continuation_page_budget == 0 {
            return Err(LayoutConfigError::ZeroBudget);
        }
        if self.section_overhead_lines > MAX_SECTION_OVERHEAD_LINES {
            return Err(LayoutConfigError::OverheadTooLarge {
                got: self.section_overhead_lines,
                max: MAX_SECTION_OVERHEAD_LINES,
            });
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based.
    pub page_number: u32,
    pub sections: Vec<ExpandedSection>,
    pub lines_used: u32,
    pub line_budget: u32,
}

impl Page {
    fn open(page_number: u32, line_budget: u32) -> Self {
        Page {
            page_number,
            sections: Vec::new(),
            lines_used: 0,
            line_budget,
        }
    }

    /// True when an oversized section pushed this page past its budget.
    pub fn is_overfull(&self) -> bool {
        self.lines_used > self.line_budget
    }

    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.section_id.as_str()).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Planner
// ────────────────────────────────────────────────────────────────────────────

/// Lines a section occupies: its overhead plus every expanded row.
/// Saturates at `u32::MAX` so unvalidated configs still plan.
pub fn section_lines(section: &ExpandedSection, config: &LayoutConfig) -> u32 {
    let rows = u32::try_from(section.row_count()).unwrap_or(u32::MAX);
    config.section_overhead_lines.saturating_add(rows)
}

/// Partitions already-expanded sections into pages.
///
/// Always returns at least one page; an empty input yields a single empty page 1.
pub fn plan_pages(sections: Vec<ExpandedSection>, config: &LayoutConfig) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page::open(1, config.first_page_budget);

    for section in sections {
        let lines = section_lines(&section, config);

        if !current.sections.is_empty()
            && current.lines_used.saturating_add(lines) > current.line_budget
        {
            let next_number = current.page_number + 1;
            close_page(&mut pages, current);
            current = Page::open(next_number, config.continuation_page_budget);
        }

        if lines > current.line_budget {
            warn!(
                section_id = %section.section_id,
                lines,
                budget = current.line_budget,
                page = current.page_number,
                "Section exceeds a full page; placing it unsplit"
            );
        }

        current.sections.push(section);
        current.lines_used = current.lines_used.saturating_add(lines);

        if current.lines_used >= current.line_budget {
            let next_number = current.page_number + 1;
            close_page(&mut pages, current);
            current = Page::open(next_number, config.continuation_page_budget);
        }
    }

    if !current.sections.is_empty() {
        close_page(&mut pages, current);
    }

    if pages.is_empty() {
        pages.push(Page::open(1, config.first_page_budget));
    }

    pages
}

/// Expands menu sections into rows and plans their pages.
pub fn layout_menu(sections: &[MenuSectionInput], config: &LayoutConfig) -> Vec<Page> {
    plan_pages(expand_sections(sections), config)
}

fn close_page(pages: &mut Vec<Page>, page: Page) {
    debug!(
        page = page.page_number,
        sections = page.sections.len(),
        lines_used = page.lines_used,
        budget = page.line_budget,
        "Closing page"
    );
    pages.push(page);
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
