//! Stand-alone demo endpoints: query params, JSON, custom headers and templates.

use poem::{Endpoint, EndpointExt, Result, Route, middleware::Tracing};
use poem_openapi::{ApiResponse, Object, OpenApi, OpenApiService, param::{Path, Query}, payload::{Html, Json, PlainText}};
use serde::Serialize;

use crate::templates::{DemoAboutTemplate, FruitsTemplate, HelloTemplate, MessagesTemplate, render};

const FRUITS: [&str; 5] = ["Apple", "Banana", "Cherry", "Date", "Elderberry"];

#[derive(Object, Serialize)]
pub struct Greeting {
    message: String,
}

#[derive(ApiResponse)]
enum HeaderResponse {
    #[oai(status = 200)]
    Ok(PlainText<String>, #[oai(header = "X-Example")] String),
    #[oai(status = 202)]
    Accepted(PlainText<String>, #[oai(header = "X-Example")] String),
}

pub struct DemoApi;

#[OpenApi]
impl DemoApi {
    #[oai(path = "/query", method = "get")]
    async fn query_example(&self, language: Query<Option<String>>) -> PlainText<String> {
        PlainText(format!(
            "Requested language: {}",
            language.0.as_deref().unwrap_or("None")
        ))
    }

    #[oai(path = "/json", method = "get")]
    async fn json_example(&self) -> Json<Greeting> {
        Json(Greeting {
            message: "Hello, World".to_string(),
        })
    }

    #[oai(path = "/direct", method = "get")]
    async fn direct_response(&self) -> HeaderResponse {
        HeaderResponse::Ok(
            PlainText("Direct Response".to_string()),
            "DirectHeader".to_string(),
        )
    }

    #[oai(path = "/custom", method = "get")]
    async fn custom_response(&self) -> HeaderResponse {
        HeaderResponse::Accepted(
            PlainText("Custom Response".to_string()),
            "CustomHeader".to_string(),
        )
    }

    #[oai(path = "/hello/:name", method = "get")]
    async fn hello_name(&self, Path(name): Path<String>) -> Result<Html<String>> {
        Ok(Html(render(&HelloTemplate { name: &name })?))
    }

    #[oai(path = "/fruits", method = "get")]
    async fn show_fruits(&self) -> Result<Html<String>> {
        Ok(Html(render(&FruitsTemplate { fruits: &FRUITS })?))
    }

    #[oai(path = "/messages", method = "get")]
    async fn show_messages(&self) -> Result<Html<String>> {
        Ok(Html(render(&MessagesTemplate)?))
    }

    #[oai(path = "/about", method = "get")]
    async fn about_page(&self) -> Result<Html<String>> {
        Ok(Html(render(&DemoAboutTemplate)?))
    }
}

pub fn build_demo_app() -> impl Endpoint {
    let api_service = OpenApiService::new(DemoApi, "Demo API", "1.0");
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/docs", ui)
        .nest("/", api_service)
        .with(Tracing)
}
