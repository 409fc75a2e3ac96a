use entity::{memos, users};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, EntityTrait, Schema};
use tracing::info;

/// Opens the connection pool and makes sure both tables exist.
pub async fn connect(url: &str) -> Result<DbConn, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    if url.starts_with("sqlite:") {
        // every pooled connection to `sqlite::memory:` would be its own database
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    info!("Connecting to database...");
    let db = Database::connect(options).await?;
    create_schema(&db).await?;
    info!("Database ready.");
    Ok(db)
}

/// `CREATE TABLE IF NOT EXISTS` for every entity, parents first.
pub async fn create_schema(db: &DbConn) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, memos::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DbConn, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}
