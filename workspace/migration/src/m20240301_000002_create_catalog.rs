use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create celebrities table
        manager
            .create_table(
                Table::create()
                    .table(Celebrities::Table)
                    .if_not_exists()
                    .col(pk_auto(Celebrities::Id))
                    .col(string(Celebrities::Name))
                    .col(string(Celebrities::Profession))
                    .col(string(Celebrities::ImageUrl))
                    .col(string_null(Celebrities::Description))
                    .col(string(Celebrities::Category))
                    // One profile per user; NULL marks editorial content.
                    .col(integer_null(Celebrities::UserId).unique_key())
                    .col(boolean(Celebrities::IsActive).default(true))
                    .col(boolean(Celebrities::IsElite).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_celebrity_user")
                            .from(Celebrities::Table, Celebrities::UserId)
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create brands table
        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(pk_auto(Brands::Id))
                    .col(string(Brands::Name).unique_key())
                    .col(string_null(Brands::Description))
                    .col(string(Brands::ImageUrl))
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string(Categories::Name).unique_key())
                    .col(string(Categories::Description))
                    .col(string(Categories::ImageUrl))
                    .to_owned(),
            )
            .await?;

        // Create celebrity_brands table (endorsements)
        manager
            .create_table(
                Table::create()
                    .table(CelebrityBrands::Table)
                    .if_not_exists()
                    .col(pk_auto(CelebrityBrands::Id))
                    .col(integer(CelebrityBrands::CelebrityId))
                    .col(integer(CelebrityBrands::BrandId))
                    .col(string_null(CelebrityBrands::Description))
                    .col(string_null(CelebrityBrands::ItemType))
                    .col(integer_null(CelebrityBrands::CategoryId))
                    .col(decimal_len_null(CelebrityBrands::Price, 16, 2))
                    .col(string_null(CelebrityBrands::PurchaseLink))
                    .col(integer_null(CelebrityBrands::RelationshipStartYear))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_celebrity_brands_celebrity")
                            .from(CelebrityBrands::Table, CelebrityBrands::CelebrityId)
                            .to(Celebrities::Table, Celebrities::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_celebrity_brands_brand")
                            .from(CelebrityBrands::Table, CelebrityBrands::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_celebrity_brands_category")
                            .from(CelebrityBrands::Table, CelebrityBrands::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create celebrity_products table
        manager
            .create_table(
                Table::create()
                    .table(CelebrityProducts::Table)
                    .if_not_exists()
                    .col(pk_auto(CelebrityProducts::Id))
                    .col(integer(CelebrityProducts::CelebrityId))
                    .col(string(CelebrityProducts::Name))
                    .col(string_null(CelebrityProducts::Description))
                    .col(string(CelebrityProducts::Category))
                    .col(string(CelebrityProducts::ImageUrl))
                    .col(decimal_len_null(CelebrityProducts::Price, 16, 2))
                    .col(string_null(CelebrityProducts::PurchaseLink))
                    .col(integer_null(CelebrityProducts::Rating))
                    .col(boolean(CelebrityProducts::IsActive).default(true))
                    .col(boolean(CelebrityProducts::IsFeatured).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_celebrity_products_celebrity")
                            .from(CelebrityProducts::Table, CelebrityProducts::CelebrityId)
                            .to(Celebrities::Table, Celebrities::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(CelebrityProducts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CelebrityBrands::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Celebrities::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Celebrities {
    Table,
    Id,
    Name,
    Profession,
    ImageUrl,
    Description,
    Category,
    UserId,
    IsActive,
    IsElite,
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
    Name,
    Description,
    ImageUrl,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    ImageUrl,
}

#[derive(DeriveIden)]
enum CelebrityBrands {
    Table,
    Id,
    CelebrityId,
    BrandId,
    Description,
    ItemType,
    CategoryId,
    Price,
    PurchaseLink,
    RelationshipStartYear,
}

#[derive(DeriveIden)]
enum CelebrityProducts {
    Table,
    Id,
    CelebrityId,
    Name,
    Description,
    Category,
    ImageUrl,
    Price,
    PurchaseLink,
    Rating,
    IsActive,
    IsFeatured,
}
