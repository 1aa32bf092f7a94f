//! Mockall mocks of the entity gateways.
//!
//! Use these when a test needs to pin exact call counts or arguments; use
//! [`ScriptedGateway`](crate::ScriptedGateway) when it only needs failures
//! or latency on top of working storage.

use async_trait::async_trait;
use mockall::mock;

use learning_core::{Category, CategoryId, Course, CourseId, EntityGateway, GatewayError};

mock! {
    pub CourseGateway {}

    #[async_trait]
    impl EntityGateway<Course> for CourseGateway {
        async fn get_all(&self) -> Result<Vec<Course>, GatewayError>;
        async fn create(&self, entity: &Course) -> Result<Course, GatewayError>;
        async fn update(&self, entity: &Course) -> Result<Course, GatewayError>;
        async fn delete(&self, id: CourseId) -> Result<(), GatewayError>;
    }
}

mock! {
    pub CategoryGateway {}

    #[async_trait]
    impl EntityGateway<Category> for CategoryGateway {
        async fn get_all(&self) -> Result<Vec<Category>, GatewayError>;
        async fn create(&self, entity: &Category) -> Result<Category, GatewayError>;
        async fn update(&self, entity: &Category) -> Result<Category, GatewayError>;
        async fn delete(&self, id: CategoryId) -> Result<(), GatewayError>;
    }
}

/// Course mock whose initial load returns `courses`
pub fn course_gateway_loading(courses: Vec<Course>) -> MockCourseGateway {
    let mut mock = MockCourseGateway::new();
    mock.expect_get_all().times(1).returning(move || Ok(courses.clone()));
    mock
}

/// Category mock whose initial load returns `categories`
pub fn category_gateway_loading(categories: Vec<Category>) -> MockCategoryGateway {
    let mut mock = MockCategoryGateway::new();
    mock.expect_get_all()
        .times(1)
        .returning(move || Ok(categories.clone()));
    mock
}
