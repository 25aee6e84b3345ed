use crate::domain::{a001_category, a002_subcategory, a003_location, a004_business};
use crate::shared::error::ServiceResult;
use contracts::domain::a001_category::aggregate::CategoryDto;
use contracts::domain::a002_subcategory::aggregate::SubcategoryDto;
use contracts::domain::a003_location::aggregate::LocationDto;
use contracts::domain::a004_business::aggregate::{Business, BusinessDto};
use contracts::enums::business_status::BusinessStatus;
use contracts::shared::guide_home::{build_guide_home, GuideHomeQuery, GuideHomeResponse};
use contracts::shared::taxonomy_filter::{dangling_links, TaxonomySnapshot};
use uuid::Uuid;

/// Снимок для публичной части: вся таксономия и только одобренные бизнесы
pub async fn load_snapshot() -> ServiceResult<TaxonomySnapshot<Business>> {
    let snapshot = TaxonomySnapshot {
        categories: a001_category::repository::list_all().await?,
        subcategories: a002_subcategory::repository::list_all().await?,
        locations: a003_location::repository::list_all().await?,
        businesses: a004_business::repository::list_approved().await?,
    };

    let dangling = dangling_links(&snapshot);
    if !dangling.is_empty() {
        tracing::warn!(
            "Businesses reference missing taxonomy nodes: categories={:?} subcategories={:?} locations={:?}",
            dangling.categories,
            dangling.subcategories,
            dangling.locations
        );
    }

    Ok(snapshot)
}

/// Главная страница гида для заданного выбора
pub async fn home(query: &GuideHomeQuery) -> ServiceResult<GuideHomeResponse> {
    let snapshot = load_snapshot().await?;
    let response = build_guide_home(&snapshot, query);
    if response.repaired.is_changed() {
        tracing::debug!(
            "Stale selection repaired ({:?}): requested category={:?} subcategory={:?} location={:?}",
            response.repaired,
            query.category_id,
            query.subcategory_id,
            query.location_id
        );
    }
    Ok(response)
}

/// Вставка тестовых данных: небольшой гид по острову Боипеба
pub async fn insert_test_data() -> ServiceResult<()> {
    let food = create_category("Onde comer", 0).await?;
    let stay = create_category("Onde ficar", 1).await?;
    let tours = create_category("Passeios", 2).await?;
    // Категория без бизнесов: в публичной части не появится
    create_category("Serviços", 3).await?;

    let restaurants = create_subcategory("Restaurantes", food, 0).await?;
    let bars = create_subcategory("Bares", food, 1).await?;
    let pousadas = create_subcategory("Pousadas", stay, 0).await?;
    let boats = create_subcategory("Passeios de barco", tours, 0).await?;

    let velha = create_location("Velha Boipeba", 0).await?;
    let morere = create_location("Moreré", 1).await?;
    let cova = create_location("Cova da Onça", 2).await?;
    let monte_alegre = create_location("Monte Alegre", 3).await?;
    a003_location::service::set_hidden(monte_alegre, true).await?;

    let businesses = vec![
        demo_business("Restaurante Maré Alta", "Restaurante", food, restaurants, velha, 4.7, &["moqueca", "frutos do mar"]),
        demo_business("Bar do Zé", "Bar", food, bars, morere, 4.3, &["praia", "caipirinha"]),
        demo_business("Pousada Cova da Onça", "Pousada", stay, pousadas, cova, 4.5, &["café da manhã"]),
        demo_business("Pousada Maliale", "Pousada", stay, pousadas, velha, 4.8, &["piscina"]),
        demo_business("Volta à Ilha", "Passeio", tours, boats, velha, 4.9, &["barco", "piscinas naturais"]),
        demo_business("Bar Escondido", "Bar", food, bars, monte_alegre, 3.9, &[]),
    ];

    for dto in businesses {
        a004_business::service::create(dto).await?;
    }

    tracing::info!("Guide test data inserted");
    Ok(())
}

async fn create_category(name: &str, sort_order: i32) -> ServiceResult<Uuid> {
    a001_category::service::create(CategoryDto {
        id: None,
        version: None,
        name: name.into(),
        sort_order: Some(sort_order),
        hidden: None,
    })
    .await
}

async fn create_subcategory(name: &str, category: Uuid, sort_order: i32) -> ServiceResult<Uuid> {
    a002_subcategory::service::create(SubcategoryDto {
        id: None,
        version: None,
        name: name.into(),
        category_id: category.to_string(),
        sort_order: Some(sort_order),
        hidden: None,
    })
    .await
}

async fn create_location(name: &str, sort_order: i32) -> ServiceResult<Uuid> {
    a003_location::service::create(LocationDto {
        id: None,
        version: None,
        name: name.into(),
        sort_order: Some(sort_order),
        hidden: None,
    })
    .await
}

#[allow(clippy::too_many_arguments)]
fn demo_business(
    name: &str,
    label: &str,
    category: Uuid,
    subcategory: Uuid,
    location: Uuid,
    rating: f64,
    tags: &[&str],
) -> BusinessDto {
    BusinessDto {
        name: name.into(),
        category: Some(label.into()),
        description: Some(format!("{} em Boipeba", label)),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating: Some(rating),
        review_count: Some(10),
        status: Some(BusinessStatus::Approved),
        category_id: Some(category.to_string()),
        subcategory_id: Some(subcategory.to_string()),
        location_id: Some(location.to_string()),
        ..Default::default()
    }
}
