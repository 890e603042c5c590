use sea_orm::entity::prelude::*;

use super::{celebrity, tournament};

/// What a celebrity wore at a tournament edition.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tournament_outfits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub celebrity_id: i32,
    pub tournament_id: i32,
    pub year: i32,
    pub description: Option<String>,
    pub image_url: String,
    /// Tournament result, e.g. "Winner", "Runner-up".
    pub result: Option<String>,
    pub main_color: String,
    pub accent_color: Option<String>,
    pub special_features: Option<String>,
    pub design_inspiration: Option<String>,
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
        belongs_to = "tournament::Entity",
        from = "Column::TournamentId",
        to = "tournament::Column::Id",
        on_delete = "Cascade"
    )]
    Tournament,
}

impl Related<celebrity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Celebrity.def()
    }
}

impl Related<tournament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
