use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_subcategory::aggregate::SubcategoryId;
use contracts::domain::a003_location::aggregate::LocationId;
use contracts::domain::a004_business::aggregate::Business;
use contracts::shared::taxonomy_filter::{Selection, TaxonomySnapshot};
use leptos::prelude::*;

/// Состояние главной страницы
#[derive(Clone, Copy)]
pub struct GuideHomeState {
    pub snapshot: RwSignal<TaxonomySnapshot<Business>>,
    pub selection: RwSignal<Selection>,
    pub search: RwSignal<String>,
    pub rating_min: RwSignal<f64>,
}

pub fn create_state() -> GuideHomeState {
    GuideHomeState {
        snapshot: RwSignal::new(TaxonomySnapshot::default()),
        selection: RwSignal::new(Selection::default()),
        search: RwSignal::new(String::new()),
        rating_min: RwSignal::new(0.0),
    }
}

// Повторный клик по активному чипу снимает выбор уровня

pub fn toggle_category(selection: &mut Selection, id: CategoryId) {
    if selection.category_id == Some(id) {
        selection.clear_category();
    } else {
        selection.select_category(id);
    }
}

pub fn toggle_subcategory(selection: &mut Selection, id: SubcategoryId) {
    if selection.subcategory_id == Some(id) {
        selection.clear_subcategory();
    } else {
        selection.select_subcategory(id);
    }
}

pub fn toggle_location(selection: &mut Selection, id: LocationId) {
    if selection.location_id == Some(id) {
        selection.clear_location();
    } else {
        selection.select_location(id);
    }
}

/// Варианты фильтра по минимальному рейтингу: (значение, подпись)
pub const RATING_OPTIONS: [(f64, &str); 4] = [
    (0.0, "Любой рейтинг"),
    (3.0, "3+"),
    (4.0, "4+"),
    (4.5, "4.5+"),
];
