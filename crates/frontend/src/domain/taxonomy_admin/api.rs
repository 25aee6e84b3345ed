use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a002_subcategory::aggregate::Subcategory;
use contracts::domain::a003_location::aggregate::Location;
use contracts::domain::common::AggregateRoot;
use contracts::shared::reorder::{HiddenRequest, ReorderRequest};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::shared::api_utils::{api_url, query_string};

/// Уровень таксономии, которым управляет консоль
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Category,
    Subcategory,
    Location,
}

impl NodeKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            NodeKind::Category => "/api/category",
            NodeKind::Subcategory => "/api/subcategory",
            NodeKind::Location => "/api/location",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NodeKind::Category => Category::list_name(),
            NodeKind::Subcategory => Subcategory::list_name(),
            NodeKind::Location => Location::list_name(),
        }
    }
}

async fn fetch_list<T: DeserializeOwned>(url: &str) -> Result<Vec<T>, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch {}: {}", url, response.status()));
    }

    response
        .json::<Vec<T>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    fetch_list(&api_url(NodeKind::Category.endpoint())).await
}

/// Подкатегории одной категории
pub async fn fetch_subcategories(category_id: &str) -> Result<Vec<Subcategory>, String> {
    let url = format!(
        "{}{}",
        api_url(NodeKind::Subcategory.endpoint()),
        query_string(&[("category_id", category_id)])
    );
    fetch_list(&url).await
}

pub async fn fetch_locations() -> Result<Vec<Location>, String> {
    fetch_list(&api_url(NodeKind::Location.endpoint())).await
}

/// Скрыть / показать узел
pub async fn set_hidden(kind: NodeKind, id: &str, hidden: bool) -> Result<(), String> {
    let url = api_url(&format!("{}/{}/hidden", kind.endpoint(), id));
    let response = Request::post(&url)
        .json(&HiddenRequest { hidden })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to update visibility: {}", response.status()));
    }
    Ok(())
}

/// Сохранить новый порядок: позиция в `ids` становится `sort_order`
pub async fn reorder(kind: NodeKind, ids: Vec<String>) -> Result<(), String> {
    let url = api_url(&format!("{}/reorder", kind.endpoint()));
    let response = Request::post(&url)
        .json(&ReorderRequest { ids })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to reorder: {}", response.status()));
    }
    Ok(())
}

/// Заполнить гид демонстрационными данными
pub async fn insert_test_data() -> Result<(), String> {
    let response = Request::post(&api_url("/api/guide/testdata"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to insert test data: {}", response.status()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(NodeKind::Category.endpoint(), "/api/category");
        assert_eq!(NodeKind::Subcategory.endpoint(), "/api/subcategory");
        assert_eq!(NodeKind::Location.endpoint(), "/api/location");
        assert_eq!(NodeKind::Category.title(), "Категории");
    }
}
