use poem::{Server, listener::TcpListener};

use memo_server::{build_app, config::AppConfig, db, init_tracing};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to DB
    let db = match db::connect(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("database connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let app = build_app(db, config.auth.clone());

    tracing::info!("memo server listening on {}", config.addr());
    Server::new(TcpListener::bind(config.addr()))
        .run(app)
        .await
}
