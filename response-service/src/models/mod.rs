pub mod response;

pub use response::{format_date, id_to_string, ResponseRecord, DATE_FORMAT};
