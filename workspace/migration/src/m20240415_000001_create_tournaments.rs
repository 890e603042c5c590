use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tournaments table
        manager
            .create_table(
                Table::create()
                    .table(Tournaments::Table)
                    .if_not_exists()
                    .col(pk_auto(Tournaments::Id))
                    .col(string(Tournaments::Name))
                    .col(string(Tournaments::Location))
                    .col(string(Tournaments::SurfaceType))
                    .col(date(Tournaments::StartDate))
                    .col(date(Tournaments::EndDate))
                    .col(string_null(Tournaments::Description))
                    .col(string(Tournaments::ImageUrl))
                    .col(string(Tournaments::Tier))
                    .to_owned(),
            )
            .await?;

        // Create tournament_outfits table
        manager
            .create_table(
                Table::create()
                    .table(TournamentOutfits::Table)
                    .if_not_exists()
                    .col(pk_auto(TournamentOutfits::Id))
                    .col(integer(TournamentOutfits::CelebrityId))
                    .col(integer(TournamentOutfits::TournamentId))
                    .col(integer(TournamentOutfits::Year))
                    .col(string_null(TournamentOutfits::Description))
                    .col(string(TournamentOutfits::ImageUrl))
                    .col(string_null(TournamentOutfits::Result))
                    .col(string(TournamentOutfits::MainColor))
                    .col(string_null(TournamentOutfits::AccentColor))
                    .col(string_null(TournamentOutfits::SpecialFeatures))
                    .col(string_null(TournamentOutfits::DesignInspiration))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_outfits_celebrity")
                            .from(TournamentOutfits::Table, TournamentOutfits::CelebrityId)
                            .to(Alias::new("celebrities"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_outfits_tournament")
                            .from(TournamentOutfits::Table, TournamentOutfits::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
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
            .drop_table(Table::drop().table(TournamentOutfits::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tournaments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tournaments {
    Table,
    Id,
    Name,
    Location,
    SurfaceType,
    StartDate,
    EndDate,
    Description,
    ImageUrl,
    Tier,
}

#[derive(DeriveIden)]
enum TournamentOutfits {
    Table,
    Id,
    CelebrityId,
    TournamentId,
    Year,
    Description,
    ImageUrl,
    Result,
    MainColor,
    AccentColor,
    SpecialFeatures,
    DesignInspiration,
}
