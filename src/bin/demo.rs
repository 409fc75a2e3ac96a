use poem::{Server, listener::TcpListener};

use memo_server::{config::DemoConfig, demo::build_demo_app, init_tracing};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    init_tracing();

    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("demo server listening on {}", config.addr());
    Server::new(TcpListener::bind(config.addr()))
        .run(build_demo_app())
        .await
}
