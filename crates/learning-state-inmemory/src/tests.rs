use crate::{sample_catalogue, Catalogue, InMemoryEntityGateway, InMemoryGatewayProvider};
use learning_core::{
    Category, CategoryId, Course, CourseId, EntityGateway, EntityKind, GatewayError,
};

#[tokio::test]
async fn test_create_assigns_sequential_ids() -> Result<(), GatewayError> {
    let gateway = InMemoryEntityGateway::<Category>::new();

    let math = gateway.create(&Category::new("Math")).await?;
    let art = gateway.create(&Category::new("Art")).await?;

    assert_eq!(math.id, CategoryId(1));
    assert_eq!(art.id, CategoryId(2));
    assert_eq!(gateway.get_all().await?, vec![math, art]);
    Ok(())
}

#[tokio::test]
async fn test_seeded_ids_continue_after_highest() -> Result<(), GatewayError> {
    let gateway = InMemoryEntityGateway::with_entities(vec![
        Category::new("Math").with_id(4),
        Category::new("Art").with_id(9),
    ]);

    let created = gateway.create(&Category::new("Music")).await?;
    assert_eq!(created.id, CategoryId(10));
    Ok(())
}

#[tokio::test]
async fn test_resolved_category_is_not_persisted() -> Result<(), GatewayError> {
    let gateway = InMemoryEntityGateway::<Course>::new();
    let mut course = Course::new("Algebra", "d", CategoryId(1));
    course.category = Some(Category::new("Math").with_id(1));

    let created = gateway.create(&course).await?;

    assert!(created.category.is_none());
    assert!(gateway.snapshot().await[0].category.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_replaces_in_place() -> Result<(), GatewayError> {
    let gateway = InMemoryEntityGateway::with_entities(vec![
        Course::new("A", "d", CategoryId(0)).with_id(1),
        Course::new("B", "d", CategoryId(0)).with_id(2),
    ]);

    let mut changed = Course::new("B2", "d", CategoryId(3)).with_id(2);
    changed.category = Some(Category::new("Art").with_id(3));
    let updated = gateway.update(&changed).await?;

    assert_eq!(updated.title, "B2");
    assert!(updated.category.is_none());
    let titles: Vec<_> = gateway.snapshot().await.into_iter().map(|c| c.title).collect();
    assert_eq!(titles, vec!["A", "B2"]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let gateway = InMemoryEntityGateway::<Course>::new();

    let update = gateway.update(&Course::new("X", "d", CategoryId(0)).with_id(8)).await;
    let delete = gateway.delete(CourseId(8)).await;

    assert_eq!(update, Err(GatewayError::not_found(EntityKind::Course, 8)));
    assert_eq!(delete, Err(GatewayError::not_found(EntityKind::Course, 8)));
}

#[tokio::test]
async fn test_delete_removes_entity() -> Result<(), GatewayError> {
    let gateway = InMemoryEntityGateway::with_entities(vec![
        Category::new("Math").with_id(1),
        Category::new("Art").with_id(2),
    ]);

    gateway.delete(CategoryId(1)).await?;

    assert_eq!(gateway.snapshot().await, vec![Category::new("Art").with_id(2)]);
    assert_eq!(gateway.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_provider_shares_gateways() -> Result<(), GatewayError> {
    let provider = InMemoryGatewayProvider::with_catalogue(sample_catalogue());
    let (courses, categories) = provider.create_gateways();

    assert_eq!(courses.get_all().await?.len(), 5);
    assert_eq!(categories.get_all().await?.len(), 3);

    categories.delete(CategoryId(3)).await?;
    assert_eq!(provider.categories().len().await, 2);
    Ok(())
}

#[test]
fn test_catalogue_from_json() {
    let catalogue = Catalogue::from_json(
        r#"{"categories": [{"id": 1, "name": "Math"}],
            "courses": [{"id": 2, "title": "Algebra", "description": "d", "categoryId": 1}]}"#,
    )
    .unwrap();

    assert_eq!(catalogue.categories, vec![Category::new("Math").with_id(1)]);
    assert_eq!(catalogue.courses[0].category_id, CategoryId(1));
    assert!(Catalogue::from_json("not json").is_err());
    assert!(Catalogue::from_json(r#"{"courses": 3}"#).is_err());
}

#[test]
fn test_failed_delete_leaves_storage_intact() {
    let gateway = InMemoryEntityGateway::with_entities(vec![Category::new("Math").with_id(1)]);

    let result = tokio_test::block_on(gateway.delete(CategoryId(7)));

    tokio_test::assert_err!(result.clone());
    assert_eq!(result, Err(GatewayError::not_found(EntityKind::Category, 7)));
    assert_eq!(tokio_test::block_on(gateway.len()), 1);
}
