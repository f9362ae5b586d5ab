pub mod errors;
pub mod table;

pub use errors::{extract_error_message, DEFAULT_ERROR_MESSAGE};
pub use table::{Align, Table};
