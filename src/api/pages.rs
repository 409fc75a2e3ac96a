use poem::Result;
use poem_openapi::{OpenApi, payload::{Html, PlainText}};

use crate::templates::{HomeTemplate, render};

pub struct PagesApi;

#[OpenApi]
impl PagesApi {
    #[oai(path = "/", method = "get")]
    async fn home(&self) -> Result<Html<String>> {
        Ok(Html(render(&HomeTemplate)?))
    }

    #[oai(path = "/about", method = "get")]
    async fn about(&self) -> PlainText<String> {
        PlainText("This is the introduction page of the My Memo app.".to_string())
    }
}
