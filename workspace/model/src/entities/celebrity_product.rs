use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::celebrity;

/// A shoppable product attributed to a celebrity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "celebrity_products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub celebrity_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub price: Option<Decimal>,
    pub purchase_link: Option<String>,
    /// 1 to 5, editorial rating.
    pub rating: Option<i32>,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    #[sea_orm(default_value = "false")]
    pub is_featured: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "celebrity::Entity",
        from = "Column::CelebrityId",
        to = "celebrity::Column::Id",
        on_delete = "Cascade"
    )]
    Celebrity,
}

impl Related<celebrity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Celebrity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
