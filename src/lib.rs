use poem::{Endpoint, EndpointExt, Route, middleware::{AddData, CookieJarManager, Tracing}};
use poem_openapi::OpenApiService;
use sea_orm::DbConn;

pub mod api;
pub mod config;
pub mod db;
pub mod demo;
pub mod templates;

use api::{MemoApi, PagesApi, UserApi};
use config::AuthSettings;

/// Memo app routes with the connection and auth settings attached.
pub fn build_app(db: DbConn, auth: AuthSettings) -> impl Endpoint {
    // OpenAPI service (combined APIs)
    let api_service = OpenApiService::new((PagesApi, UserApi, MemoApi), "My Memo API", "1.0");
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/docs", ui)
        .nest("/", api_service)
        // handlers and the session checker read these through `Data` / `Request::data`
        .with(AddData::new(db))
        .with(AddData::new(auth))
        .with(CookieJarManager::new())
        .with(Tracing)
}

/// Installs the fmt subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
