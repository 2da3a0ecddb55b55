// store

mod session_store;

pub use session_store::*;

// transport

mod http_transport;

pub use http_transport::*;
