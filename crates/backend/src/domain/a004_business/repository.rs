use chrono::Utc;
use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_subcategory::aggregate::SubcategoryId;
use contracts::domain::a003_location::aggregate::LocationId;
use contracts::domain::a004_business::aggregate::{Business, BusinessId};
use contracts::domain::common::EntityMetadata;
use contracts::enums::business_status::BusinessStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_business")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
    pub instagram: String,
    pub tripadvisor: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    /// JSON-массив строк
    pub images: String,
    /// JSON-массив строк
    pub tags: String,
    pub rating: f64,
    pub review_count: i32,
    pub is_premium: bool,
    pub status: String,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub location_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn to_json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

fn parse_uuid(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|s| Uuid::parse_str(s).ok())
}

impl From<Model> for Business {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Business {
            id: BusinessId(uuid),
            name: m.name,
            category: m.category,
            description: m.description,
            address: m.address,
            phone: m.phone,
            whatsapp: m.whatsapp,
            instagram: m.instagram,
            tripadvisor: m.tripadvisor,
            website: m.website,
            logo: m.logo,
            images: parse_list(&m.images),
            tags: parse_list(&m.tags),
            rating: m.rating,
            review_count: m.review_count,
            is_premium: m.is_premium,
            status: BusinessStatus::from_code(&m.status).unwrap_or_default(),
            category_id: parse_uuid(m.category_id.as_deref()).map(CategoryId),
            subcategory_id: parse_uuid(m.subcategory_id.as_deref()).map(SubcategoryId),
            location_id: parse_uuid(m.location_id.as_deref()).map(LocationId),
            metadata,
        }
    }
}

fn to_active_model(aggregate: &Business) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        category: Set(aggregate.category.clone()),
        description: Set(aggregate.description.clone()),
        address: Set(aggregate.address.clone()),
        phone: Set(aggregate.phone.clone()),
        whatsapp: Set(aggregate.whatsapp.clone()),
        instagram: Set(aggregate.instagram.clone()),
        tripadvisor: Set(aggregate.tripadvisor.clone()),
        website: Set(aggregate.website.clone()),
        logo: Set(aggregate.logo.clone()),
        images: Set(to_json_list(&aggregate.images)),
        tags: Set(to_json_list(&aggregate.tags)),
        rating: Set(aggregate.rating),
        review_count: Set(aggregate.review_count),
        is_premium: Set(aggregate.is_premium),
        status: Set(aggregate.status.code().to_string()),
        category_id: Set(aggregate.category_id.map(|id| id.value().to_string())),
        subcategory_id: Set(aggregate.subcategory_id.map(|id| id.value().to_string())),
        location_id: Set(aggregate.location_id.map(|id| id.value().to_string())),
        is_deleted: Set(aggregate.metadata.is_deleted),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn sort_by_name(items: &mut [Business]) {
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

pub async fn list_all() -> anyhow::Result<Vec<Business>> {
    let mut items: Vec<Business> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    sort_by_name(&mut items);
    Ok(items)
}

/// Одобренные бизнесы: только они участвуют в публичной таксономии
pub async fn list_approved() -> anyhow::Result<Vec<Business>> {
    let mut items: Vec<Business> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Status.eq(BusinessStatus::Approved.code()))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    sort_by_name(&mut items);
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Business>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Business) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

/// Обновить запись, если в БД все еще `expected_version`.
/// `false` - запись успели изменить другим запросом.
pub async fn update(aggregate: &Business, expected_version: i32) -> anyhow::Result<bool> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    match Entity::update(active)
        .filter(Column::Version.eq(expected_version))
        .exec(conn())
        .await
    {
        Ok(_) => Ok(true),
        Err(DbErr::RecordNotUpdated) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .col_expr(Column::Version, Expr::col(Column::Version).add(1))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn set_status(id: Uuid, status: BusinessStatus) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.code()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .col_expr(Column::Version, Expr::col(Column::Version).add(1))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_columns_tolerate_bad_json() {
        assert_eq!(parse_list(r#"["a","b"]"#), vec!["a", "b"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list("not json").is_empty());
        assert_eq!(to_json_list(&["praia".to_string()]), r#"["praia"]"#);
    }

    #[test]
    fn test_model_with_broken_links_becomes_unclassified() {
        let model = Model {
            id: Uuid::from_u128(1).to_string(),
            name: "Pousada".into(),
            category: String::new(),
            description: String::new(),
            address: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            instagram: String::new(),
            tripadvisor: None,
            website: None,
            logo: None,
            images: "[]".into(),
            tags: r#"["praia"]"#.into(),
            rating: 4.5,
            review_count: 3,
            is_premium: false,
            status: "approved".into(),
            category_id: Some("garbage".into()),
            subcategory_id: None,
            location_id: Some(Uuid::from_u128(7).to_string()),
            is_deleted: false,
            created_at: None,
            updated_at: None,
            version: 1,
        };
        let business = Business::from(model);
        assert_eq!(business.category_id, None);
        assert_eq!(business.location_id, Some(LocationId(Uuid::from_u128(7))));
        assert_eq!(business.status, BusinessStatus::Approved);
        assert_eq!(business.tags, vec!["praia"]);
    }
}
