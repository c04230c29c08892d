pub mod current_user;
pub mod current_user_db;

pub use current_user::CurrentUser;
pub use current_user_db::CurrentUserRecord;
