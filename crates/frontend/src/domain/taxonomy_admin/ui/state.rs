use contracts::domain::common::{AggregateId, TaxonomyNode};
use leptos::prelude::*;

/// Строка списка узлов в консоли (общая для всех трех уровней)
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRow {
    pub id: String,
    pub name: String,
    pub hidden: bool,
}

pub fn to_rows<N: TaxonomyNode>(nodes: &[N]) -> Vec<NodeRow> {
    nodes
        .iter()
        .map(|n| NodeRow {
            id: n.node_id().as_string(),
            name: n.node_name().to_string(),
            hidden: n.is_hidden(),
        })
        .collect()
}

#[derive(Clone, Copy)]
pub struct TaxonomyAdminState {
    pub categories: RwSignal<Vec<NodeRow>>,
    pub subcategories: RwSignal<Vec<NodeRow>>,
    pub locations: RwSignal<Vec<NodeRow>>,
    /// Категория, подкатегории которой показаны ("" - не выбрана)
    pub current_category: RwSignal<String>,
}

/// Id выбранной категории, если значение селектора похоже на UUID
pub fn selected_category_id(value: &str) -> Option<String> {
    <uuid::Uuid as AggregateId>::from_filter(value).map(|_| value.to_string())
}

pub fn create_state() -> TaxonomyAdminState {
    TaxonomyAdminState {
        categories: RwSignal::new(Vec::new()),
        subcategories: RwSignal::new(Vec::new()),
        locations: RwSignal::new(Vec::new()),
        current_category: RwSignal::new(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_location::aggregate::Location;

    #[test]
    fn test_to_rows_keeps_order_and_flags() {
        let nodes = vec![
            Location::new_for_insert("Moreré".into(), 0, false),
            Location::new_for_insert("Monte Alegre".into(), 1, true),
        ];
        let rows = to_rows(&nodes);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Moreré");
        assert_eq!(rows[0].id, nodes[0].id.as_string());
        assert!(!rows[0].hidden);
        assert!(rows[1].hidden);
    }

    #[test]
    fn test_selected_category_id_ignores_placeholder() {
        assert_eq!(selected_category_id(""), None);
        assert_eq!(selected_category_id("nope"), None);
        let id = uuid::Uuid::from_u128(5).to_string();
        assert_eq!(selected_category_id(&id), Some(id.clone()));
    }
}
