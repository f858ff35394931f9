pub mod database;
pub mod upstream;

pub use database::MongoDb;
pub use upstream::{UpstreamClient, UpstreamResponse};
