//! Root for all SeaORM entity modules.
//!
//! The schema covers the account/role subsystem (users, roles, grants,
//! reset tokens) and the content catalog (celebrities, brands,
//! endorsements, products, categories, tournaments, outfits, plans).
//! Optional metadata is modeled as explicit nullable columns, never as
//! free-form JSON blobs.

pub mod brand;
pub mod category;
pub mod celebrity;
pub mod celebrity_brand;
pub mod celebrity_product;
pub mod permission;
pub mod plan;
pub mod role;
pub mod role_permission;
pub mod tournament;
pub mod tournament_outfit;
pub mod user;
pub mod user_role;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::brand::Entity as Brand;
    pub use super::category::Entity as Category;
    pub use super::celebrity::Entity as Celebrity;
    pub use super::celebrity_brand::Entity as CelebrityBrand;
    pub use super::celebrity_product::Entity as CelebrityProduct;
    pub use super::permission::Entity as Permission;
    pub use super::plan::Entity as Plan;
    pub use super::role::Entity as Role;
    pub use super::role_permission::Entity as RolePermission;
    pub use super::tournament::Entity as Tournament;
    pub use super::tournament_outfit::Entity as TournamentOutfit;
    pub use super::user::Entity as User;
    pub use super::user_role::Entity as UserRole;
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn local_user(username: &str, email: &str) -> user::ActiveModel {
        user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(Some("$argon2id$stub".to_string())),
            account_status: Set(user::AccountStatus::Approved),
            source: Set(user::SignupSource::Local),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        // Setup database
        let db = setup_db().await?;

        // Create users
        let user1 = local_user("serena", "serena@example.com").insert(&db).await?;
        let user2 = local_user("coco", "coco@example.com").insert(&db).await?;

        // Create roles and grant them
        let role_user = role::ActiveModel {
            name: Set(role::USER.to_string()),
            description: Set(Some("Default role".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let role_celebrity = role::ActiveModel {
            name: Set(role::CELEBRITY.to_string()),
            description: Set(Some("Owns a public profile".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        user_role::ActiveModel {
            user_id: Set(user1.id),
            role_id: Set(role_user.id),
        }
        .insert(&db)
        .await?;

        user_role::ActiveModel {
            user_id: Set(user1.id),
            role_id: Set(role_celebrity.id),
        }
        .insert(&db)
        .await?;

        // Create a celebrity profile owned by user1 and an editorial one
        let celebrity1 = celebrity::ActiveModel {
            name: Set("Serena W.".to_string()),
            profession: Set("Tennis Player".to_string()),
            image_url: Set("https://img.example.com/serena.jpg".to_string()),
            description: Set(Some("23 majors".to_string())),
            category: Set("Grand Slam".to_string()),
            user_id: Set(Some(user1.id)),
            is_active: Set(true),
            is_elite: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let celebrity2 = celebrity::ActiveModel {
            name: Set("Editorial Icon".to_string()),
            profession: Set("Model".to_string()),
            image_url: Set("https://img.example.com/icon.jpg".to_string()),
            category: Set("Red Carpet".to_string()),
            user_id: Set(None),
            is_active: Set(true),
            is_elite: Set(false),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a brand and an endorsement with explicit metadata
        let brand1 = brand::ActiveModel {
            name: Set("Nike".to_string()),
            description: Set(Some("Sportswear".to_string())),
            image_url: Set("https://img.example.com/nike.png".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let occasion = category::ActiveModel {
            name: Set("Grand Slam".to_string()),
            description: Set("Major tournament looks".to_string()),
            image_url: Set("https://img.example.com/slam.jpg".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let endorsement = celebrity_brand::ActiveModel {
            celebrity_id: Set(celebrity1.id),
            brand_id: Set(brand1.id),
            description: Set(Some("Signature shoe line".to_string())),
            item_type: Set(Some("Shoes".to_string())),
            category_id: Set(Some(occasion.id)),
            price: Set(Some(Decimal::new(18000, 2))), // 180.00
            purchase_link: Set(Some("https://shop.example.com/shoe".to_string())),
            relationship_start_year: Set(Some(2004)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a product attributed to the celebrity
        let product = celebrity_product::ActiveModel {
            celebrity_id: Set(celebrity1.id),
            name: Set("Match Dress".to_string()),
            category: Set("Apparel".to_string()),
            image_url: Set("https://img.example.com/dress.jpg".to_string()),
            price: Set(Some(Decimal::new(24900, 2))), // 249.00
            rating: Set(Some(5)),
            is_active: Set(true),
            is_featured: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a tournament and an outfit worn there
        let tournament = tournament::ActiveModel {
            name: Set("Wimbledon".to_string()),
            location: Set("London".to_string()),
            surface_type: Set("Grass".to_string()),
            start_date: Set(NaiveDate::from_ymd_opt(2023, 7, 3).unwrap()),
            end_date: Set(NaiveDate::from_ymd_opt(2023, 7, 16).unwrap()),
            image_url: Set("https://img.example.com/wimbledon.jpg".to_string()),
            tier: Set("Grand Slam".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let outfit = tournament_outfit::ActiveModel {
            celebrity_id: Set(celebrity1.id),
            tournament_id: Set(tournament.id),
            year: Set(2023),
            description: Set(Some("All-white with gold trim".to_string())),
            image_url: Set("https://img.example.com/outfit.jpg".to_string()),
            result: Set(Some("Winner".to_string())),
            main_color: Set("White".to_string()),
            accent_color: Set(Some("Gold".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a plan
        plan::ActiveModel {
            name: Set("Elite".to_string()),
            image_url: Set("https://img.example.com/elite.jpg".to_string()),
            price: Set(Decimal::new(999, 2)), // 9.99
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Read back and verify data

        // Verify users
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.username == "serena"));
        assert!(users.iter().any(|u| u.username == "coco"));

        // Verify roles via the many-to-many relation
        let roles_of_user1 = user1.find_related(Role).all(&db).await?;
        assert_eq!(roles_of_user1.len(), 2);
        assert!(roles_of_user1.iter().any(|r| r.name == role::USER));
        assert!(roles_of_user1.iter().any(|r| r.name == role::CELEBRITY));

        let roles_of_user2 = user2.find_related(Role).all(&db).await?;
        assert!(roles_of_user2.is_empty());

        // Verify celebrity ownership
        let owned = Celebrity::find()
            .filter(celebrity::Column::UserId.eq(user1.id))
            .one(&db)
            .await?;
        assert_eq!(owned.map(|c| c.id), Some(celebrity1.id));

        let profile_of_user1 = user1.find_related(Celebrity).one(&db).await?;
        assert_eq!(profile_of_user1.map(|c| c.id), Some(celebrity1.id));
        assert_eq!(celebrity2.user_id, None);

        // Verify endorsement and its brand
        let endorsements = celebrity1.find_related(CelebrityBrand).all(&db).await?;
        assert_eq!(endorsements.len(), 1);
        assert_eq!(endorsements[0].id, endorsement.id);
        assert_eq!(endorsements[0].price, Some(Decimal::new(18000, 2)));

        let brands_of_celebrity1 = celebrity1.find_related(Brand).all(&db).await?;
        assert_eq!(brands_of_celebrity1.len(), 1);
        assert_eq!(brands_of_celebrity1[0].name, "Nike");

        // Verify product
        let products = celebrity1.find_related(CelebrityProduct).all(&db).await?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, product.id);

        // Verify outfit joins both ways
        let outfits_at_tournament = tournament.find_related(TournamentOutfit).all(&db).await?;
        assert_eq!(outfits_at_tournament.len(), 1);
        assert_eq!(outfits_at_tournament[0].id, outfit.id);

        let outfit_tournament = outfit.find_related(Tournament).one(&db).await?;
        assert_eq!(outfit_tournament.map(|t| t.name), Some("Wimbledon".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_unique_constraints_on_users() -> Result<(), DbErr> {
        let db = setup_db().await?;

        local_user("serena", "serena@example.com").insert(&db).await?;

        // Same email, different username
        let dup_email = local_user("serena2", "serena@example.com")
            .insert(&db)
            .await;
        assert!(dup_email.is_err());

        // Same username, different email
        let dup_username = local_user("serena", "other@example.com")
            .insert(&db)
            .await;
        assert!(dup_username.is_err());

        // A retry keeps failing the same way
        let retried = local_user("serena2", "serena@example.com")
            .insert(&db)
            .await;
        assert!(retried.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_one_profile_per_user() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let owner = local_user("serena", "serena@example.com").insert(&db).await?;

        celebrity::ActiveModel {
            name: Set("Profile A".to_string()),
            profession: Set("Tennis Player".to_string()),
            image_url: Set("https://img.example.com/a.jpg".to_string()),
            category: Set("Grand Slam".to_string()),
            user_id: Set(Some(owner.id)),
            is_active: Set(true),
            is_elite: Set(false),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The unique index on user_id refuses a second profile for the same owner
        let second = celebrity::ActiveModel {
            name: Set("Profile B".to_string()),
            profession: Set("Model".to_string()),
            image_url: Set("https://img.example.com/b.jpg".to_string()),
            category: Set("Red Carpet".to_string()),
            user_id: Set(Some(owner.id)),
            is_active: Set(true),
            is_elite: Set(false),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(second.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_role_grant_is_rejected_by_key() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let user = local_user("coco", "coco@example.com").insert(&db).await?;
        let role = role::ActiveModel {
            name: Set(role::CELEBRITY.to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        user_role::ActiveModel {
            user_id: Set(user.id),
            role_id: Set(role.id),
        }
        .insert(&db)
        .await?;

        // The composite primary key makes the second identical grant an error,
        // which the service layer turns into a no-op.
        let second = user_role::ActiveModel {
            user_id: Set(user.id),
            role_id: Set(role.id),
        }
        .insert(&db)
        .await;
        assert!(second.is_err());

        let grants = UserRole::find()
            .filter(user_role::Column::UserId.eq(user.id))
            .all(&db)
            .await?;
        assert_eq!(grants.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_role_cascades_grants() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let user = local_user("coco", "coco@example.com").insert(&db).await?;
        let role = role::ActiveModel {
            name: Set(role::USER.to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        user_role::ActiveModel {
            user_id: Set(user.id),
            role_id: Set(role.id),
        }
        .insert(&db)
        .await?;

        Role::delete_by_id(role.id).exec(&db).await?;

        let grants = UserRole::find().all(&db).await?;
        assert!(grants.is_empty());

        Ok(())
    }
}
