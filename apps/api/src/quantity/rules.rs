//! Ordered classification tables for the spec calculator.
//!
//! Each table is evaluated top to bottom and the first matching entry wins.
//! Keep entries in precedence order: moving a row changes behaviour.

// ────────────────────────────────────────────────────────────────────────────
// Section routing
// ────────────────────────────────────────────────────────────────────────────

/// Which quantity rule a printed section uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecRule {
    PassedApp,
    PresentedApp,
    /// Buffet, desserts and stations share the tier-band rule.
    TierBand,
}

#[derive(Debug, Clone, Copy)]
pub enum SectionMatch {
    Contains(&'static str),
    Equals(&'static str),
}

impl SectionMatch {
    fn matches(&self, section: &str) -> bool {
        match self {
            SectionMatch::Contains(needle) => section.contains(needle),
            SectionMatch::Equals(label) => section == *label,
        }
    }
}

pub const SECTION_RULES: &[(SectionMatch, SpecRule)] = &[
    (SectionMatch::Contains("PASSED"), SpecRule::PassedApp),
    (SectionMatch::Contains("PRESENTED"), SpecRule::PresentedApp),
    (SectionMatch::Contains("BUFFET"), SpecRule::TierBand),
    (SectionMatch::Equals("DESSERTS"), SpecRule::TierBand),
    (SectionMatch::Equals("STATIONS"), SpecRule::TierBand),
];

/// Returns `None` for sections without a quantity rule.
pub fn route_section(section: &str) -> Option<SpecRule> {
    SECTION_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(section))
        .map(|(_, rule)| *rule)
}

// ────────────────────────────────────────────────────────────────────────────
// Sauce and vessel detection
// ────────────────────────────────────────────────────────────────────────────

pub const SAUCE_KEYWORDS: &[&str] = &[
    "sauce",
    "dressing",
    "aioli",
    "vinaigrette",
    "reduction",
    "cream",
];

/// Round-chafer token keeps its leading space, so specs read `"1 full  (round chafer)"`.
pub const ROUND_CHAFER: &str = " (round chafer)";
pub const DEFAULT_VESSEL: &str = "pan";

pub const VESSEL_RULES: &[(&[&str], &str)] = &[
    (&["salad", "slaw", "mix", "greens"], "bowl"),
    (
        &[
            "cheese display",
            "cheese platter",
            "charcuterie",
            "crudité",
            "display",
        ],
        "platter",
    ),
    (
        &[
            "mashed potato",
            "mashed",
            "soup",
            "chowder",
            "bisque",
            "risotto",
        ],
        ROUND_CHAFER,
    ),
];

pub fn is_sauce_name(item_name: &str) -> bool {
    let lower = item_name.to_lowercase();
    SAUCE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

pub fn vessel_for(item_name: &str) -> &'static str {
    let lower = item_name.to_lowercase();
    VESSEL_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, vessel)| *vessel)
        .unwrap_or(DEFAULT_VESSEL)
}
