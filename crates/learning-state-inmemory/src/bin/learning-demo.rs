use std::env;
use std::fs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use learning_core::{Category, CategoryId, Course, CourseId, LearningStore, StoreConfig};
use learning_state_inmemory::{sample_catalogue, Catalogue, InMemoryGatewayProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalogue = match env::var("LEARNING_SEED_FILE") {
        Ok(path) => {
            info!("Seeding catalogue from {}", path);
            Catalogue::from_json(&fs::read_to_string(&path)?)?
        }
        Err(_) => sample_catalogue(),
    };

    let provider = InMemoryGatewayProvider::with_catalogue(catalogue);
    let (courses_api, categories_api) = provider.create_gateways();
    let store = LearningStore::new(courses_api, categories_api, &config);
    store.ready().await;

    let course_count = store.course_count();
    let category_count = store.category_count();
    info!(
        "Loaded {} courses in {} categories",
        course_count.get(),
        category_count.get()
    );

    store.add_category(Category::new("Music")).settled().await?;
    let music = store
        .categories()
        .iter()
        .find(|c| c.name == "Music")
        .map(|c| c.id)
        .unwrap_or(CategoryId::UNASSIGNED);

    store
        .add_course(Course::new("Harmony", "Chords and voice leading", music))
        .settled()
        .await?;

    for course in store.courses().iter() {
        let category = course
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        info!("#{} {} [{}]", course.id, course.title, category);
    }

    // deleting an unknown id surfaces a friendly message in the error slot
    store.delete_course(CourseId(999)).settled().await?;
    if let Some(message) = store.error() {
        error!("{}", message);
    }

    info!(
        "Finished with {} courses in {} categories",
        course_count.get(),
        category_count.get()
    );
    store.dispose();
    Ok(())
}
