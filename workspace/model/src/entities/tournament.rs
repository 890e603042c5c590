use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// A tournament or event with an outfit gallery.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tournaments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub location: String,
    /// Playing surface, e.g. "Clay", "Grass", "Hard".
    pub surface_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub image_url: String,
    /// Competition tier, e.g. "Grand Slam", "Masters 1000".
    pub tier: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tournament_outfit::Entity")]
    TournamentOutfit,
}

impl Related<super::tournament_outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentOutfit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
