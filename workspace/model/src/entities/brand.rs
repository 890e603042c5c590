use sea_orm::entity::prelude::*;

/// A fashion or equipment brand referenced by endorsements.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::celebrity_brand::Entity")]
    CelebrityBrand,
}

impl Related<super::celebrity_brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CelebrityBrand.def()
    }
}

impl Related<super::celebrity::Entity> for Entity {
    fn to() -> RelationDef {
        super::celebrity_brand::Relation::Celebrity.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::celebrity_brand::Relation::Brand.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
