use chrono::{DateTime, Utc};
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// Storage format of `date`: UTC, second precision.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A saved free-text response as stored in the `responses` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Assigned by MongoDB on insert; `None` only before the write.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub date: String,
}

impl ResponseRecord {
    pub fn new(message: String) -> Self {
        Self::at(message, Utc::now())
    }

    pub fn at(message: String, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            message,
            date: format_date(now),
        }
    }

    pub fn id_string(&self) -> String {
        self.id.as_ref().map(id_to_string).unwrap_or_default()
    }
}

pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

/// Renders a document id the way clients see it: ObjectIds as hex,
/// strings verbatim, anything else via its BSON display form.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
