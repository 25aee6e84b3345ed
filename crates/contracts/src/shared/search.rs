use crate::domain::a004_business::aggregate::Business;
use crate::shared::taxonomy_filter::{HasTaxonomyLink, Selection};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Нормализация строки для поиска: нижний регистр, без диакритики.
///
/// Строка раскладывается в NFD, после чего комбинируемые знаки
/// (U+0300..U+036F) отбрасываются. Так одинаково сворачиваются и
/// составные буквы, и уже разложенный ввод.
///
/// ```
/// use contracts::shared::search::normalize_for_search;
/// assert_eq!(normalize_for_search("Café Açaí"), "cafe acai");
/// assert_eq!(normalize_for_search("MORERÉ"), "morere");
/// ```
pub fn normalize_for_search(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{300}'..='\u{36f}').contains(&c)
}

/// Фильтр списка бизнесов на главной: текстовый поиск, выбор в таксономии,
/// минимальный рейтинг.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub rating_min: f64,
}

impl BusinessFilter {
    pub fn new(search: impl Into<String>, selection: Selection, rating_min: f64) -> Self {
        Self {
            search: search.into(),
            selection,
            rating_min,
        }
    }

    pub fn matches(&self, business: &Business) -> bool {
        let query = normalize_for_search(self.search.trim());
        self.matches_normalized(business, &query)
    }

    pub fn apply(&self, businesses: &[Business]) -> Vec<Business> {
        let query = normalize_for_search(self.search.trim());
        businesses
            .iter()
            .filter(|b| self.matches_normalized(b, &query))
            .cloned()
            .collect()
    }

    fn matches_normalized(&self, business: &Business, query: &str) -> bool {
        let link = business.taxonomy_link();
        matches_search(business, query)
            && link.matches_category(self.selection.category_id)
            && link.matches_subcategory(self.selection.subcategory_id)
            && link.matches_location(self.selection.location_id)
            && business.rating >= self.rating_min
    }
}

fn matches_search(business: &Business, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    normalize_for_search(&business.name).contains(query)
        || normalize_for_search(&business.category).contains(query)
        || normalize_for_search(&business.description).contains(query)
        || business
            .tags
            .iter()
            .any(|t| normalize_for_search(t).contains(query))
}
