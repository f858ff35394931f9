use crate::dtos::ListQuery;
use crate::models::{id_to_string, ResponseRecord};
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

/// Database used when the connection string names none.
pub const DEFAULT_DATABASE: &str = "vlm-webcam-responses";
pub const RESPONSES_COLLECTION: &str = "responses";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Builds the shared client. The driver connects lazily, so an
    /// unreachable server surfaces on the first operation, not here.
    pub async fn connect(uri: &str) -> Result<Self, AppError> {
        let options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        let database = database_name(options.default_database.as_deref());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB ping failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Stores `message` stamped with the current time and returns the new id.
    pub async fn insert_response(&self, message: &str) -> Result<String, AppError> {
        let record = ResponseRecord::new(message.to_string());
        let result = self
            .responses()
            .insert_one(&record, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert response: {}", e);
                AppError::from(e)
            })?;

        let id = id_to_string(&result.inserted_id);
        tracing::debug!(id = %id, date = %record.date, "Response stored");
        Ok(id)
    }

    pub async fn list_responses(&self, query: &ListQuery) -> Result<Vec<ResponseRecord>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "date": query.order.direction() })
            .skip(query.skip)
            .limit(query.limit)
            .build();

        let cursor = self
            .responses()
            .find(doc! {}, find_options)
            .await
            .map_err(AppError::from)?;

        let records: Vec<ResponseRecord> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(records)
    }

    pub fn responses(&self) -> Collection<ResponseRecord> {
        self.db.collection(RESPONSES_COLLECTION)
    }

    pub fn name(&self) -> &str {
        self.db.name()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn database_name(from_uri: Option<&str>) -> String {
    match from_uri.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_DATABASE.to_string(),
    }
}
