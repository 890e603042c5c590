use sea_orm::entity::prelude::*;

/// A public celebrity profile.
///
/// `user_id` links the owning account; editorial/seeded profiles have no
/// owner. The unique index on `user_id` keeps one profile per user, the
/// application layer keeps one user per profile.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "celebrities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub profession: String,
    pub image_url: String,
    pub description: Option<String>,
    /// Editorial grouping, e.g. "Red Carpet" or "Street Style".
    pub category: String,
    #[sea_orm(unique)]
    pub user_id: Option<i32>,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    #[sea_orm(default_value = "false")]
    pub is_elite: bool,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub booking_inquiries: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::celebrity_brand::Entity")]
    CelebrityBrand,
    #[sea_orm(has_many = "super::celebrity_product::Entity")]
    CelebrityProduct,
    #[sea_orm(has_many = "super::tournament_outfit::Entity")]
    TournamentOutfit,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::celebrity_brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CelebrityBrand.def()
    }
}

impl Related<super::celebrity_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CelebrityProduct.def()
    }
}

impl Related<super::tournament_outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentOutfit.def()
    }
}

// Many-to-many to brands through the endorsement table.
impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        super::celebrity_brand::Relation::Brand.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::celebrity_brand::Relation::Celebrity.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
