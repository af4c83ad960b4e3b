use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Risk classification per city. Consumed by the high-risk report
        // join only; rows are managed by seed migrations, not CRUD.
        manager
            .create_table(
                Table::create()
                    .table(RiskZones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RiskZones::City)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(RiskZones::RiskLevel))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_risk_zones_risk_level")
                    .table(RiskZones::Table)
                    .col(RiskZones::RiskLevel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RiskZones::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RiskZones {
    Table,
    City,
    RiskLevel,
}
