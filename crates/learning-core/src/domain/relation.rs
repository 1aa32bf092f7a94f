//! Course to category relation resolution
//!
//! A course only stores `category_id`; the embedded `category` is derived
//! on the client from whatever categories are cached at the time of the
//! call. Nothing here reaches back into the store, so a resolved course can
//! go stale when its category later changes.

use super::category::{Category, CategoryId};
use super::course::Course;

/// Find the category a foreign key points at. `0` never matches.
pub fn find_category(categories: &[Category], id: CategoryId) -> Option<&Category> {
    if id.is_unassigned() {
        return None;
    }
    categories.iter().find(|category| category.id == id)
}

/// Attach the category referenced by `course.category_id`, or `None`.
pub fn resolve(mut course: Course, categories: &[Category]) -> Course {
    course.category = find_category(categories, course.category_id).cloned();
    course
}

/// Resolve every course in place against the same category snapshot
pub fn resolve_all(courses: &mut [Course], categories: &[Category]) {
    for course in courses.iter_mut() {
        course.category = find_category(categories, course.category_id).cloned();
    }
}
