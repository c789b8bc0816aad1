pub mod auth;
pub mod extract;
pub mod health;
pub mod login;
pub mod register;
pub mod talent;
pub mod user;
pub mod validation;
pub mod video;

pub use auth::{login_method_not_allowed, method_not_allowed, ApiKey};
pub use extract::AppJson;
pub use health::health_check;
pub use login::login;
pub use register::register_user;
pub use talent::{create_talent, list_talents};
pub use user::{update_password, update_user};
pub use video::{create_videos, list_videos};
