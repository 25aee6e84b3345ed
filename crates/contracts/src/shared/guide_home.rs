use crate::domain::a001_category::aggregate::Category;
use crate::domain::a002_subcategory::aggregate::Subcategory;
use crate::domain::a003_location::aggregate::Location;
use crate::domain::a004_business::aggregate::Business;
use crate::shared::search::BusinessFilter;
use crate::shared::taxonomy_filter::{recompute, RepairOutcome, Selection, SelectionDto, TaxonomySnapshot};
use serde::{Deserialize, Deserializer, Serialize};

/// Параметры запроса главной страницы (GET /api/guide/home)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideHomeQuery {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: String,
    #[serde(default)]
    pub location_id: String,
    #[serde(default)]
    pub search: String,
    #[serde(default, deserialize_with = "rating_from_param")]
    pub rating_min: Option<f64>,
}

/// `rating_min` приходит строкой из query string; пустое или нечисловое значение
/// означает "без ограничения"
fn rating_from_param<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

impl GuideHomeQuery {
    pub fn selection(&self) -> Selection {
        Selection::from(&SelectionDto {
            category_id: self.category_id.clone(),
            subcategory_id: self.subcategory_id.clone(),
            location_id: self.location_id.clone(),
        })
    }
}

/// Ответ главной страницы: видимая таксономия, исправленный выбор и бизнесы
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideHomeResponse {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub locations: Vec<Location>,
    pub selection: SelectionDto,
    pub repaired: RepairOutcome,
    pub businesses: Vec<Business>,
    pub total: usize,
}

/// Собрать ответ главной страницы из снимка.
///
/// Бизнесы фильтруются уже исправленным выбором, поэтому устаревший фильтр
/// никогда не дает пустой список из-за несуществующего узла.
pub fn build_guide_home(
    snapshot: &TaxonomySnapshot<Business>,
    query: &GuideHomeQuery,
) -> GuideHomeResponse {
    let view = recompute(snapshot, query.selection());
    let filter = BusinessFilter::new(
        query.search.clone(),
        view.selection,
        query.rating_min.unwrap_or(0.0),
    );
    let businesses = filter.apply(&snapshot.businesses);
    GuideHomeResponse {
        categories: view.categories,
        subcategories: view.subcategories,
        locations: view.locations,
        selection: view.selection.into(),
        repaired: view.outcome,
        total: businesses.len(),
        businesses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::aggregate::CategoryId;
    use crate::domain::a002_subcategory::aggregate::SubcategoryId;
    use crate::domain::a003_location::aggregate::LocationId;
    use crate::domain::common::AggregateId;

    fn snapshot() -> (TaxonomySnapshot<Business>, CategoryId, SubcategoryId, LocationId) {
        let food = Category::new_for_insert("Comida".into(), 0, false);
        let bars = Subcategory::new_for_insert("Bares".into(), food.id, 0, false);
        let morere = Location::new_for_insert("Moreré".into(), 0, false);

        let mut bar = Business::new_for_insert("Bar da Praia".into());
        bar.category_id = Some(food.id);
        bar.subcategory_id = Some(bars.id);
        bar.location_id = Some(morere.id);
        bar.rating = 4.0;

        let mut unclassified = Business::new_for_insert("Loja".into());
        unclassified.rating = 5.0;

        let ids = (food.id, bars.id, morere.id);
        (
            TaxonomySnapshot {
                categories: vec![food],
                subcategories: vec![bars],
                locations: vec![morere],
                businesses: vec![bar, unclassified],
            },
            ids.0,
            ids.1,
            ids.2,
        )
    }

    #[test]
    fn test_rating_param_parsing() {
        let q: GuideHomeQuery = serde_json::from_str(r#"{"rating_min":"4.5"}"#).unwrap();
        assert_eq!(q.rating_min, Some(4.5));
        let q: GuideHomeQuery = serde_json::from_str(r#"{"rating_min":""}"#).unwrap();
        assert_eq!(q.rating_min, None);
        let q: GuideHomeQuery = serde_json::from_str(r#"{"search":"bar"}"#).unwrap();
        assert_eq!(q.rating_min, None);
        assert_eq!(q.search, "bar");
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let (snapshot, ..) = snapshot();
        let response = build_guide_home(&snapshot, &GuideHomeQuery::default());
        assert_eq!(response.categories.len(), 1);
        assert!(response.subcategories.is_empty());
        assert_eq!(response.locations.len(), 1);
        assert_eq!(response.total, 2);
        assert_eq!(response.repaired, RepairOutcome::Unchanged);
        assert_eq!(response.selection, SelectionDto::default());
    }

    #[test]
    fn test_full_selection_narrows_businesses() {
        let (snapshot, food, bars, morere) = snapshot();
        let query = GuideHomeQuery {
            category_id: food.as_string(),
            subcategory_id: bars.as_string(),
            location_id: morere.as_string(),
            ..Default::default()
        };
        let response = build_guide_home(&snapshot, &query);
        assert_eq!(response.subcategories.len(), 1);
        assert_eq!(response.total, 1);
        assert_eq!(response.businesses[0].name, "Bar da Praia");
        assert_eq!(response.selection.subcategory_id, bars.as_string());
    }

    #[test]
    fn test_stale_category_is_dropped_before_filtering() {
        let (snapshot, ..) = snapshot();
        let query = GuideHomeQuery {
            category_id: CategoryId::new_v4().as_string(),
            rating_min: Some(4.5),
            ..Default::default()
        };
        let response = build_guide_home(&snapshot, &query);
        assert_eq!(response.repaired, RepairOutcome::CategoryCleared);
        assert_eq!(response.selection.category_id, "");
        assert_eq!(response.total, 1);
        assert_eq!(response.businesses[0].name, "Loja");
    }
}
