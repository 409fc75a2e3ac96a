pub mod error;
pub mod memo;
pub mod pages;
pub mod session;
pub mod user;
pub use memo::MemoApi;
pub use pages::PagesApi;
pub use user::UserApi;

pub use error::ApiError;
