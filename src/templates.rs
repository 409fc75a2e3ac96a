use askama::Template;

use entity::memos;

use crate::api::ApiError;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

#[derive(Template)]
#[template(path = "memos.html")]
pub struct MemosTemplate {
    pub username: String,
    pub memos: Vec<memos::Model>,
}

#[derive(Template)]
#[template(path = "hello.html")]
pub struct HelloTemplate<'a> {
    pub name: &'a str,
}

#[derive(Template)]
#[template(path = "fruits_list.html")]
pub struct FruitsTemplate<'a> {
    pub fruits: &'a [&'a str],
}

#[derive(Template)]
#[template(path = "messages.html")]
pub struct MessagesTemplate;

#[derive(Template)]
#[template(path = "demo_about.html")]
pub struct DemoAboutTemplate;

pub fn render<T: Template>(template: &T) -> Result<String, ApiError> {
    template
        .render()
        .map_err(|e| ApiError::Internal(format!("template rendering failed: {}", e)))
}
