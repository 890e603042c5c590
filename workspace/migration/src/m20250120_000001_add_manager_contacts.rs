use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Add booking contact columns to celebrities table
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("celebrities"))
                    .add_column(ColumnDef::new(Alias::new("manager_name")).string())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("celebrities"))
                    .add_column(ColumnDef::new(Alias::new("manager_email")).string())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("celebrities"))
                    .add_column(ColumnDef::new(Alias::new("booking_inquiries")).string())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop booking contact columns from celebrities table
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("celebrities"))
                    .drop_column(Alias::new("booking_inquiries"))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("celebrities"))
                    .drop_column(Alias::new("manager_email"))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("celebrities"))
                    .drop_column(Alias::new("manager_name"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
