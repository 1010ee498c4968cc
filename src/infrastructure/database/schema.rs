//! Table creation from entity definitions
//!
//! Creates missing tables on startup (`CREATE TABLE IF NOT EXISTS`). Existing
//! tables are left untouched; there is no versioned migration history.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};
use tracing::info;

use super::entities::{language, role, user};

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}

/// Create dictionary tables first so `users` foreign keys resolve.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, role::Entity).await?;
    create_table(db, &schema, language::Entity).await?;
    create_table(db, &schema, user::Entity).await?;

    info!("Database schema ready");
    Ok(())
}
