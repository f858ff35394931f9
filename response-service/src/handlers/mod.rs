pub mod completions;
pub mod db_status;
pub mod responses;
pub mod static_files;

pub use completions::chat_completions;
pub use db_status::db_status;
pub use responses::{list_responses, save_response};
pub use static_files::{serve_index, serve_path, static_not_found};
