mod api_client;
mod auth_service;
mod profile_service;
mod user_service;

pub use api_client::*;
pub use auth_service::*;
pub use profile_service::*;
pub use user_service::*;
