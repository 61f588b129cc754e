//! Row expansion — flattens menu items into the printed lines the planner counts.
//!
//! An item expands to its own row followed by one row per linked child, in child
//! order. Children flagged `stand_alone_sauce` are never nested: they are lifted
//! out and printed as their own item right after the parent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{MenuItem, MenuSection, MenuSectionInput, Row};

/// A menu item together with its printed rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedItem {
    pub item_id: String,
    pub name: String,
    /// The item's own menu section; routes spec rules when set.
    #[serde(default)]
    pub section: MenuSection,
    pub is_sauce: bool,
    pub loaded: bool,
    #[serde(rename = "override")]
    pub override_text: Option<String>,
    /// Row 0 is the parent; rows 1.. are children.
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedSection {
    pub section_id: String,
    pub items: Vec<ExpandedItem>,
}

impl ExpandedItem {
    /// Label used for spec routing: the item's own section, else the enclosing one.
    pub fn spec_section<'a>(&'a self, section_id: &'a str) -> &'a str {
        match self.section.as_str() {
            "" => section_id,
            label => label,
        }
    }
}

impl ExpandedSection {
    pub fn row_count(&self) -> usize {
        self.items.iter().map(|item| item.rows.len()).sum()
    }
}

pub fn expand_item(item: &MenuItem) -> ExpandedItem {
    let mut rows = Vec::with_capacity(1 + item.children.len());
    rows.push(Row {
        text: item.name.clone(),
        is_child: false,
        owner_item_id: item.id.clone(),
    });
    rows.extend(
        item.children
            .iter()
            .filter(|child| !child.stand_alone_sauce)
            .map(|child| Row {
                text: child.name.clone(),
                is_child: true,
                owner_item_id: item.id.clone(),
            }),
    );

    ExpandedItem {
        item_id: item.id.clone(),
        name: item.name.clone(),
        section: item.section.clone(),
        is_sauce: item.is_sauce,
        loaded: item.loaded,
        override_text: item.override_text.clone(),
        rows,
    }
}

/// Expands every item of a section, lifting stand-alone sauces to top level.
///
/// A lifted sauce is skipped when the section already lists an item with the
/// same id, or when another parent already lifted it.
pub fn expand_section(section: &MenuSectionInput) -> ExpandedSection {
    let top_level: HashSet<&str> = section.items.iter().map(|i| i.id.as_str()).collect();
    let mut lifted: HashSet<&str> = HashSet::new();
    let mut items = Vec::with_capacity(section.items.len());

    for item in &section.items {
        items.push(expand_item(item));
        for child in item.children.iter().filter(|c| c.stand_alone_sauce) {
            if top_level.contains(child.id.as_str()) || !lifted.insert(child.id.as_str()) {
                continue;
            }
            items.push(expand_item(child));
        }
    }

    ExpandedSection {
        section_id: section.section_id.clone(),
        items,
    }
}

pub fn expand_sections(sections: &[MenuSectionInput]) -> Vec<ExpandedSection> {
    sections.iter().map(expand_section).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuSection;

    fn make_item(id: &str, children: &[&str]) -> MenuItem {
        MenuItem::new(id, format!("Item {id}"), MenuSection::Buffet).with_children(
            children
                .iter()
                .map(|c| MenuItem::new(*c, format!("Child {c}"), MenuSection::Buffet))
                .collect(),
        )
    }

    fn make_sauce(id: &str) -> MenuItem {
        let mut sauce = MenuItem::new(id, format!("Sauce {id}"), MenuSection::Buffet);
        sauce.is_sauce = true;
        sauce.stand_alone_sauce = true;
        sauce
    }

    #[test]
    fn test_n_children_yield_n_plus_one_rows() {
        let expanded = expand_item(&make_item("p", &["c1", "c2", "c3"]));
        assert_eq!(expanded.rows.len(), 4);
        assert!(!expanded.rows[0].is_child);
        assert_eq!(expanded.rows[0].text, "Item p");
        let child_texts: Vec<&str> = expanded.rows[1..].iter().map(|r| r.text.as_str()).collect();
        assert_eq!(child_texts, vec!["Child c1", "Child c2", "Child c3"]);
        assert!(expanded.rows[1..].iter().all(|r| r.is_child));
    }

    #[test]
    fn test_all_rows_owned_by_parent() {
        let expanded = expand_item(&make_item("p", &["c1", "c2"]));
        assert!(expanded.rows.iter().all(|r| r.owner_item_id == "p"));
    }

    #[test]
    fn test_item_without_children_is_single_row() {
        let expanded = expand_item(&make_item("solo", &[]));
        assert_eq!(expanded.rows.len(), 1);
    }

    #[test]
    fn test_stand_alone_sauce_not_nested() {
        let mut parent = make_item("steak", &["c1"]);
        parent.children.push(make_sauce("chimichurri"));

        let expanded = expand_item(&parent);
        assert_eq!(expanded.rows.len(), 2);
        assert!(expanded.rows.iter().all(|r| r.text != "Sauce chimichurri"));
    }

    #[test]
    fn test_stand_alone_sauce_lifted_after_parent() {
        let mut parent = make_item("steak", &[]);
        parent.children.push(make_sauce("chimichurri"));
        let section = MenuSectionInput {
            section_id: "BUFFET".to_string(),
            items: vec![parent, make_item("potatoes", &[])],
        };

        let expanded = expand_section(&section);
        let ids: Vec<&str> = expanded.items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["steak", "chimichurri", "potatoes"]);
        assert!(expanded.items[1].is_sauce);
    }

    #[test]
    fn test_stand_alone_sauce_not_duplicated() {
        let mut steak = make_item("steak", &[]);
        steak.children.push(make_sauce("jus"));
        let mut chicken = make_item("chicken", &[]);
        chicken.children.push(make_sauce("jus"));
        let mut fish = make_item("fish", &[]);
        fish.children.push(make_sauce("aioli"));

        let section = MenuSectionInput {
            section_id: "BUFFET".to_string(),
            items: vec![steak, chicken, fish, make_sauce("aioli")],
        };

        let expanded = expand_section(&section);
        let ids: Vec<&str> = expanded.items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["steak", "jus", "chicken", "fish", "aioli"]);
    }

    #[test]
    fn test_spec_section_prefers_item_label() {
        let expanded = expand_item(&make_item("p", &[]));
        assert_eq!(expanded.section, MenuSection::Buffet);
        assert_eq!(expanded.spec_section("s-2"), "BUFFET");

        let unlabeled = expand_item(&MenuItem::new("q", "Dish", MenuSection::default()));
        assert_eq!(unlabeled.spec_section("s-2"), "s-2");
    }

    #[test]
    fn test_section_row_count() {
        let section = MenuSectionInput {
            section_id: "BUFFET".to_string(),
            items: vec![make_item("a", &["x", "y"]), make_item("b", &[])],
        };
        assert_eq!(expand_section(&section).row_count(), 4);
    }
}
