//! Builders for test entities

use learning_core::{Category, CategoryId, Course, CourseId};

/// Builder for [`Course`] values
#[derive(Debug, Clone)]
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    /// Start from an unsaved, uncategorised course titled `title`
    pub fn new(title: &str) -> Self {
        Self {
            course: Course::new(title, format!("About {}", title), CategoryId::UNASSIGNED),
        }
    }

    /// Set the id
    pub fn id(mut self, id: u64) -> Self {
        self.course.id = CourseId(id);
        self
    }

    /// Set the description
    pub fn description(mut self, description: &str) -> Self {
        self.course.description = description.to_string();
        self
    }

    /// Set the category foreign key
    pub fn category_id(mut self, id: u64) -> Self {
        self.course.category_id = CategoryId(id);
        self
    }

    /// Pre-resolve the category, as the store would
    pub fn resolved(mut self, category: &Category) -> Self {
        self.course.category_id = category.id;
        self.course.category = Some(category.clone());
        self
    }

    /// Finish
    pub fn build(self) -> Course {
        self.course
    }
}

/// Builder for [`Category`] values
#[derive(Debug, Clone)]
pub struct CategoryBuilder {
    category: Category,
}

impl CategoryBuilder {
    /// Start from an unsaved category named `name`
    pub fn new(name: &str) -> Self {
        Self {
            category: Category::new(name),
        }
    }

    /// Set the id
    pub fn id(mut self, id: u64) -> Self {
        self.category.id = CategoryId(id);
        self
    }

    /// Finish
    pub fn build(self) -> Category {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder_defaults() {
        let course = CourseBuilder::new("Algebra").build();
        assert!(course.id.is_unassigned());
        assert!(course.category_id.is_unassigned());
        assert_eq!(course.description, "About Algebra");
    }

    #[test]
    fn test_resolved_sets_key_and_category() {
        let math = CategoryBuilder::new("Math").id(1).build();
        let course = CourseBuilder::new("Algebra").id(3).resolved(&math).build();
        assert_eq!(course.category_id, CategoryId(1));
        assert_eq!(course.category, Some(math));
    }
}
