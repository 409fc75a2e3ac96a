pub mod memos;
pub mod users;

pub mod prelude {
    pub use super::memos::Entity as Memos;
    pub use super::users::Entity as Users;
}
