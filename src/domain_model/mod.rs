mod administrator;
mod envelope;
mod profile;
mod record;
mod request;
mod session;
mod user;

pub use administrator::*;
pub use envelope::*;
pub use profile::*;
pub use record::*;
pub use request::*;
pub use session::*;
pub use user::*;
