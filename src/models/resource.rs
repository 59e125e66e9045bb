//! Resource model representing one entry of the static catalog.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error returned when a label cannot be parsed into one of the catalog enums
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Normalize a user-supplied label so "Embedded Systems", "embedded-systems"
/// and "embedded_systems" compare equal.
fn normalize_label(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Engineering field a resource belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Mechanical Engineering")]
    MechanicalEngineering,
    #[serde(rename = "Electrical & Electronics")]
    ElectricalElectronics,
    #[serde(rename = "Mechatronics")]
    Mechatronics,
    #[serde(rename = "Robotics & Automation")]
    RoboticsAutomation,
    #[serde(rename = "Embedded Systems")]
    EmbeddedSystems,
    #[serde(rename = "Programming (C, C++, Python, MATLAB)")]
    Programming,
    #[serde(rename = "CAD & Simulation (SolidWorks, AutoCAD, Proteus, ANSYS)")]
    CadSimulation,
    #[serde(rename = "Final Year Projects")]
    FinalYearProjects,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::MechanicalEngineering,
        Category::ElectricalElectronics,
        Category::Mechatronics,
        Category::RoboticsAutomation,
        Category::EmbeddedSystems,
        Category::Programming,
        Category::CadSimulation,
        Category::FinalYearProjects,
    ];

    /// Returns the display label of the category
    pub fn label(&self) -> &'static str {
        match self {
            Category::MechanicalEngineering => "Mechanical Engineering",
            Category::ElectricalElectronics => "Electrical & Electronics",
            Category::Mechatronics => "Mechatronics",
            Category::RoboticsAutomation => "Robotics & Automation",
            Category::EmbeddedSystems => "Embedded Systems",
            Category::Programming => "Programming (C, C++, Python, MATLAB)",
            Category::CadSimulation => "CAD & Simulation (SolidWorks, AutoCAD, Proteus, ANSYS)",
            Category::FinalYearProjects => "Final Year Projects",
        }
    }

    /// Returns the short identifier accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Category::MechanicalEngineering => "mechanical",
            Category::ElectricalElectronics => "electrical",
            Category::Mechatronics => "mechatronics",
            Category::RoboticsAutomation => "robotics",
            Category::EmbeddedSystems => "embedded-systems",
            Category::Programming => "programming",
            Category::CadSimulation => "cad-simulation",
            Category::FinalYearProjects => "final-year-projects",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize_label(c.label()) == wanted || normalize_label(c.slug()) == wanted)
            .ok_or_else(|| {
                let slugs: Vec<&str> = Category::ALL.iter().map(|c| c.slug()).collect();
                ParseLabelError::new("category", s, &slugs)
            })
    }
}

/// Kind of file a resource is delivered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "PDF")]
    Pdf,
    Blueprint,
    Code,
    Video,
}

impl ResourceType {
    /// All resource types in display order
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Pdf,
        ResourceType::Blueprint,
        ResourceType::Code,
        ResourceType::Video,
    ];

    /// Returns the display label of the resource type
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Pdf => "PDF",
            ResourceType::Blueprint => "Blueprint",
            ResourceType::Code => "Code",
            ResourceType::Video => "Video",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ResourceType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        ResourceType::ALL
            .into_iter()
            .find(|t| normalize_label(t.label()) == wanted)
            .ok_or_else(|| {
                let labels: Vec<&str> = ResourceType::ALL.iter().map(|t| t.label()).collect();
                ParseLabelError::new("file type", s, &labels)
            })
    }
}

/// Academic level a resource targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Undergraduate,
    Research,
}

impl Level {
    /// All levels in display order
    pub const ALL: [Level; 4] = [
        Level::Beginner,
        Level::Intermediate,
        Level::Undergraduate,
        Level::Research,
    ];

    /// Returns the display label of the level
    pub fn label(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Undergraduate => "Undergraduate",
            Level::Research => "Research",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Level {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Level::ALL
            .into_iter()
            .find(|l| normalize_label(l.label()) == wanted)
            .ok_or_else(|| {
                let labels: Vec<&str> = Level::ALL.iter().map(|l| l.label()).collect();
                ParseLabelError::new("level", s, &labels)
            })
    }
}

/// A learning resource in the static catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Resource title
    pub title: String,

    /// Engineering field
    pub category: Category,

    /// File type
    #[serde(rename = "type")]
    pub kind: ResourceType,

    /// Publication year
    pub year: u16,

    /// Academic level
    pub level: Level,

    /// Free-form tags, in source order
    pub tags: Vec<String>,
}

impl ResourceRecord {
    /// Create a new record with no tags
    pub fn new(
        title: impl Into<String>,
        category: Category,
        kind: ResourceType,
        year: u16,
        level: Level,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            kind,
            year,
            level,
            tags: Vec::new(),
        }
    }

    /// Attach tags to the record
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// One-line summary used by the plain and shell renderers
    pub fn summary(&self) -> String {
        format!(
            "{} · {} · {} · {}",
            self.category, self.kind, self.level, self.year
        )
    }
}
