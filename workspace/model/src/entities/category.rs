use sea_orm::entity::prelude::*;

/// An occasion/style category used to group endorsements,
/// e.g. "Grand Slam", "Red Carpet", "Casual".
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
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

impl ActiveModelBehavior for ActiveModel {}
