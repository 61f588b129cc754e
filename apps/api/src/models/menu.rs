use std::fmt;

use serde::{Deserialize, Serialize};

/// Printed-menu placement of an item. Drives spec routing.
///
/// Serialized as its label (`"BUFFET"`, `"PASSED_APPS"`, ...). Labels the service
/// does not know about round-trip through `Custom` so callers can still lay them out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuSection {
    PassedApps,
    PresentedApps,
    Buffet,
    Desserts,
    Stations,
    Custom(String),
}

impl MenuSection {
    pub fn as_str(&self) -> &str {
        match self {
            MenuSection::PassedApps => "PASSED_APPS",
            MenuSection::PresentedApps => "PRESENTED_APPS",
            MenuSection::Buffet => "BUFFET",
            MenuSection::Desserts => "DESSERTS",
            MenuSection::Stations => "STATIONS",
            MenuSection::Custom(label) => label,
        }
    }
}

impl Default for MenuSection {
    fn default() -> Self {
        MenuSection::Custom(String::new())
    }
}

impl From<String> for MenuSection {
    fn from(label: String) -> Self {
        match label.as_str() {
            "PASSED_APPS" => MenuSection::PassedApps,
            "PRESENTED_APPS" => MenuSection::PresentedApps,
            "BUFFET" => MenuSection::Buffet,
            "DESSERTS" => MenuSection::Desserts,
            "STATIONS" => MenuSection::Stations,
            _ => MenuSection::Custom(label),
        }
    }
}

impl From<MenuSection> for String {
    fn from(section: MenuSection) -> Self {
        section.as_str().to_string()
    }
}

impl fmt::Display for MenuSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment-estimation classification. Independent of `MenuSection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Passed,
    Presented,
    Buffet,
    Plated,
    Stationed,
    Dessert,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Passed => "passed",
            Category::Presented => "presented",
            Category::Buffet => "buffet",
            Category::Plated => "plated",
            Category::Stationed => "stationed",
            Category::Dessert => "dessert",
        }
    }
}

/// A menu item as supplied by the event data provider.
///
/// A parent exclusively owns its `children`; they only ever render as rows under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub section: MenuSection,
    #[serde(default)]
    pub children: Vec<MenuItem>,
    #[serde(default)]
    pub is_sauce: bool,
    /// Never nested under a parent, even when linked as a child.
    #[serde(default)]
    pub stand_alone_sauce: bool,
    /// Persisted manual spec override.
    #[serde(default, rename = "override")]
    pub override_text: Option<String>,
    /// Seeds the kitchen/expeditor/server checkboxes before any interaction.
    #[serde(default)]
    pub loaded: bool,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, section: MenuSection) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            section,
            children: Vec::new(),
            is_sauce: false,
            stand_alone_sauce: false,
            override_text: None,
            loaded: false,
        }
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }
}

/// One printed section with its items in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSectionInput {
    pub section_id: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A single printed line belonging to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub text: String,
    pub is_child: bool,
    pub owner_item_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_label_round_trip_known_and_custom() {
        let buffet: MenuSection = serde_json::from_str("\"BUFFET\"").unwrap();
        assert_eq!(buffet, MenuSection::Buffet);

        let custom: MenuSection = serde_json::from_str("\"LATE NIGHT\"").unwrap();
        assert_eq!(custom, MenuSection::Custom("LATE NIGHT".to_string()));
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"LATE NIGHT\"");
    }

    #[test]
    fn test_menu_item_defaults_when_fields_missing() {
        let item: MenuItem = serde_json::from_str(r#"{"id":"a1","name":"Crab Cakes"}"#).unwrap();
        assert!(item.children.is_empty());
        assert!(!item.stand_alone_sauce);
        assert_eq!(item.override_text, None);
        assert_eq!(item.section, MenuSection::default());
    }

    #[test]
    fn test_override_field_uses_wire_name() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id":"a1","name":"Crab Cakes","override":"150 pc"}"#)
                .unwrap();
        assert_eq!(item.override_text.as_deref(), Some("150 pc"));
    }

    #[test]
    fn test_category_snake_case() {
        let c: Category = serde_json::from_str("\"stationed\"").unwrap();
        assert_eq!(c, Category::Stationed);
        assert_eq!(c.as_str(), "stationed");
    }
}
