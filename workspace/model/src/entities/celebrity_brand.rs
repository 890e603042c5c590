use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{brand, category, celebrity};

/// An endorsement linking a celebrity to a brand, with per-relationship
/// metadata. All metadata is optional and surfaced as explicit fields.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "celebrity_brands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub celebrity_id: i32,
    pub brand_id: i32,
    pub description: Option<String>,
    /// What the endorsement covers, e.g. "Racquet", "Shoes", "Watch".
    pub item_type: Option<String>,
    pub category_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub price: Option<Decimal>,
    pub purchase_link: Option<String>,
    pub relationship_start_year: Option<i32>,
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
    #[sea_orm(
        belongs_to = "brand::Entity",
        from = "Column::BrandId",
        to = "brand::Column::Id",
        on_delete = "Cascade"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "category::Entity",
        from = "Column::CategoryId",
        to = "category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<celebrity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Celebrity.def()
    }
}

impl Related<brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
