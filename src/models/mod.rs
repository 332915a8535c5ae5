//! Ordered document model
//!
//! A [`Document`] maps section names to [`Section`]s, and a section maps key
//! names to [`IniValue`]s. Both levels keep declaration order.
//!
//! ```rust
//! use ordered_ini::models::{Document, Section};
//!
//! let mut doc = Document::new();
//! doc.set_section_with("php", Section::from_iter([("ide", "phpstorm")])).unwrap();
//! doc.set_section("bash").unwrap();
//! doc.move_section_to_start("bash").unwrap();
//!
//! assert_eq!(doc.section_names().collect::<Vec<_>>(), ["bash", "php"]);
//! assert_eq!(doc.value("php", "ide").unwrap(), "phpstorm");
//! ```

pub mod document;
mod ordering;
pub mod section;
pub mod value;

pub use document::Document;
pub use ordering::Placement;
pub use section::Section;
pub use value::IniValue;
