//! Sample catalogue used by the demo binary and tests

use serde::{Deserialize, Serialize};

use learning_core::{Category, CategoryId, Course, LearningResult};

/// Courses and categories to pre-populate the gateways with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Categories, ids included
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Courses, ids and category keys included
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Catalogue {
    /// Parse a catalogue from JSON in the wire format
    pub fn from_json(json: &str) -> LearningResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A small catalogue with one uncategorised course and one course whose
/// category key points nowhere
pub fn sample_catalogue() -> Catalogue {
    Catalogue {
        categories: vec![
            Category::new("Programming").with_id(1),
            Category::new("Mathematics").with_id(2),
            Category::new("Design").with_id(3),
        ],
        courses: vec![
            Course::new("Rust Fundamentals", "Ownership, borrowing and traits", CategoryId(1)).with_id(1),
            Course::new("Linear Algebra", "Vectors, matrices and eigenvalues", CategoryId(2)).with_id(2),
            Course::new("Typography", "Type in interfaces", CategoryId(3)).with_id(3),
            Course::new("Study Skills", "Planning and note taking", CategoryId(0)).with_id(4),
            Course::new("Archived Workshop", "Category was removed", CategoryId(42)).with_id(5),
        ],
    }
}
