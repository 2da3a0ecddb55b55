mod session_store_file;
mod session_store_memory;

pub use session_store_file::*;
pub use session_store_memory::*;
