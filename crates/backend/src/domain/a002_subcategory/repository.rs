use chrono::Utc;
use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_subcategory::aggregate::{Subcategory, SubcategoryId};
use contracts::domain::common::{sort_nodes, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_subcategory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub sort_order: i32,
    pub hidden: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subcategory {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        // Битая ссылка на категорию дает сироту: в публичных списках она не появится
        let category_uuid = Uuid::parse_str(&m.category_id).unwrap_or_else(|_| Uuid::nil());

        Subcategory {
            id: SubcategoryId(uuid),
            name: m.name,
            category_id: CategoryId(category_uuid),
            sort_order: m.sort_order,
            hidden: m.hidden,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Subcategory>> {
    let mut items: Vec<Subcategory> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    sort_nodes(&mut items);
    Ok(items)
}

/// Подкатегории одной категории
pub async fn list_by_category(category_id: Uuid) -> anyhow::Result<Vec<Subcategory>> {
    let mut items: Vec<Subcategory> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CategoryId.eq(category_id.to_string()))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    sort_nodes(&mut items);
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Subcategory>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Subcategory) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        name: Set(aggregate.name.clone()),
        category_id: Set(aggregate.category_id.value().to_string()),
        sort_order: Set(aggregate.sort_order),
        hidden: Set(aggregate.hidden),
        is_deleted: Set(aggregate.metadata.is_deleted),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Обновить запись, если в БД все еще `expected_version`.
/// `false` - запись успели изменить другим запросом.
pub async fn update(aggregate: &Subcategory, expected_version: i32) -> anyhow::Result<bool> {
    let id = aggregate.id.value().to_string();
    let active = ActiveModel {
        id: Set(id),
        name: Set(aggregate.name.clone()),
        category_id: Set(aggregate.category_id.value().to_string()),
        sort_order: Set(aggregate.sort_order),
        hidden: Set(aggregate.hidden),
        is_deleted: Set(aggregate.metadata.is_deleted),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
        created_at: sea_orm::ActiveValue::NotSet,
    };
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

pub async fn set_hidden(id: Uuid, hidden: bool) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Hidden, Expr::value(hidden))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .col_expr(Column::Version, Expr::col(Column::Version).add(1))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn set_sort_orders(orders: &[(SubcategoryId, i32)]) -> anyhow::Result<()> {
    use sea_orm::sea_query::Expr;
    let txn = conn().begin().await?;
    let now = Utc::now();
    for (id, sort_order) in orders {
        Entity::update_many()
            .col_expr(Column::SortOrder, Expr::value(*sort_order))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .col_expr(Column::Version, Expr::col(Column::Version).add(1))
            .filter(Column::Id.eq(id.value().to_string()))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;
    Ok(())
}
