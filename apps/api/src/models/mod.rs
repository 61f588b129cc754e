pub mod menu;

pub use menu::{Category, MenuItem, MenuSection, MenuSectionInput, Row};
