pub mod cors;
pub mod request_log;

pub use cors::{cors_headers_middleware, preflight};
pub use request_log::{REQUEST_ID_HEADER, request_log_middleware};
