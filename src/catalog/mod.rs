//! Static catalog of engineering learning resources.
//!
//! The catalog is built once at startup and never mutated afterwards. Every
//! view over it goes through [`filter`], which is a pure function of the
//! catalog and the current [`FilterSelection`](crate::models::FilterSelection).
//!
//! ```rust
//! use engineer_vault::catalog::{filter, Catalog};
//! use engineer_vault::models::{FilterSelection, ResourceType};
//!
//! let catalog = Catalog::builtin();
//! let code = filter(catalog.resources(), &FilterSelection::default().kind(ResourceType::Code));
//! assert_eq!(code.len(), 1);
//! ```

mod filter;

pub use filter::{filter, matches, suggestions, DEFAULT_SUGGESTIONS, MAX_SUGGESTIONS};

use crate::models::{Category, Level, ResourceRecord, ResourceType};

/// Year options offered by the year selector, newest first
pub const YEAR_OPTIONS: [&str; 4] = ["2025", "2024", "2023", "2022"];

/// An immutable, ordered collection of resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    resources: Vec<ResourceRecord>,
}

impl Catalog {
    /// Create a catalog from an arbitrary list of records
    pub fn new(resources: Vec<ResourceRecord>) -> Self {
        Self { resources }
    }

    /// The catalog shipped with the application
    pub fn builtin() -> Self {
        Self::new(vec![
            ResourceRecord::new(
                "Finite Element Analysis Fundamentals",
                Category::MechanicalEngineering,
                ResourceType::Pdf,
                2024,
                Level::Undergraduate,
            )
            .tags(["simulation", "ansys", "materials"]),
            ResourceRecord::new(
                "High-Efficiency Motor Drive Blueprint",
                Category::ElectricalElectronics,
                ResourceType::Blueprint,
                2023,
                Level::Research,
            )
            .tags(["power electronics", "drive", "control"]),
            ResourceRecord::new(
                "Autonomous Robot Control in Python",
                Category::RoboticsAutomation,
                ResourceType::Code,
                2025,
                Level::Intermediate,
            )
            .tags(["python", "slam", "navigation"]),
            ResourceRecord::new(
                "STM32 Embedded Systems Lab",
                Category::EmbeddedSystems,
                ResourceType::Video,
                2022,
                Level::Beginner,
            )
            .tags(["firmware", "c", "microcontroller"]),
        ])
    }

    /// All resources in catalog order
    pub fn resources(&self) -> &[ResourceRecord] {
        &self.resources
    }

    /// The fixed category labels, in display order
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Number of resources in a category
    pub fn count_in(&self, category: Category) -> usize {
        self.resources
            .iter()
            .filter(|r| r.category == category)
            .count()
    }

    /// Get the number of resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
        assert_eq!(
            catalog.resources()[0].title,
            "Finite Element Analysis Fundamentals"
        );
        assert_eq!(catalog.categories().len(), 8);
    }

    #[test]
    fn test_count_in_category() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.count_in(Category::EmbeddedSystems), 1);
        assert_eq!(catalog.count_in(Category::FinalYearProjects), 0);
    }

    #[test]
    fn test_year_options_cover_catalog() {
        let catalog = Catalog::builtin();
        for resource in catalog.resources() {
            assert!(YEAR_OPTIONS.contains(&resource.year.to_string().as_str()));
        }
    }
}
