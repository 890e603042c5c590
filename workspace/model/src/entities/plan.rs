use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A subscription/membership tier shown on the pricing page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image_url: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price: Decimal,
    /// Promo text, e.g. "20% off first year".
    pub discount: Option<String>,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
