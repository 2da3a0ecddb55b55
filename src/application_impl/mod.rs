mod api_client_impl;
mod auth_service_impl;
mod profile_service_impl;
mod session_events;
mod user_service_impl;
mod util;

pub mod validation;

pub use api_client_impl::*;
pub use auth_service_impl::*;
pub use profile_service_impl::*;
pub use session_events::*;
pub use user_service_impl::*;
