use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Baseline roles referenced by the JWT role predicate
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO roles (name, description)
            SELECT v.name, v.description
            FROM (VALUES
                ('admin', 'Full administrative access, including risk reports'),
                ('user', 'Regular citizen account')
            ) AS v(name, description)
            WHERE NOT EXISTS (SELECT 1 FROM roles r WHERE r.name = v.name)
            "#,
            )
            .await?;

        // Representative risk-zone classification
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO risk_zones (city, risk_level)
            VALUES
                ('Riverton', 'high'),
                ('Ashford', 'high'),
                ('Lakeside', 'medium'),
                ('Milbrook', 'medium'),
                ('Greenfield', 'low'),
                ('Fairview', 'low')
            ON CONFLICT (city) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Delete in reverse order of foreign key dependencies
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM risk_zones")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "DELETE FROM roles WHERE name IN ('admin', 'user') AND NOT EXISTS (SELECT 1 FROM users u WHERE u.role_id = roles.id)",
            )
            .await?;

        Ok(())
    }
}
