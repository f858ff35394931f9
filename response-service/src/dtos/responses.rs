use crate::models::ResponseRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid payload: expected { response: string }";
pub const SAVED_MESSAGE: &str = "Response saved successfully";

pub const DEFAULT_LIMIT: i64 = 50;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 200;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveResponseRequest {
    #[validate(length(min = 1))]
    pub response: Option<String>,
}

impl SaveResponseRequest {
    /// Decodes a raw request body and returns the message to store.
    ///
    /// Anything but a JSON object whose `response` is a non-empty string is
    /// rejected, including bodies that are not JSON at all.
    pub fn message_from_body(body: &[u8]) -> Result<String, AppError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| invalid_payload())?;
        if !value.is_object() {
            return Err(invalid_payload());
        }

        let payload: Self = serde_json::from_value(value).map_err(|_| invalid_payload())?;
        payload.validate().map_err(|_| invalid_payload())?;
        payload.response.ok_or_else(invalid_payload)
    }
}

fn invalid_payload() -> AppError {
    AppError::ValidationError(INVALID_PAYLOAD_MESSAGE.to_string())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponseResponse {
    pub message: String,
    pub id: String,
}

impl SaveResponseResponse {
    pub fn saved(id: String) -> Self {
        Self {
            message: SAVED_MESSAGE.to_string(),
            id,
        }
    }
}

/// Raw `/responses` query string. Kept as text so malformed numbers get
/// our own error envelope instead of the extractor's rejection.
#[derive(Debug, Default)]
pub struct ListParams {
    pub limit: Option<String>,
    pub skip: Option<String>,
    pub order: Option<String>,
}

impl ListParams {
    /// Builds params from decoded query pairs. When a key repeats, its
    /// first value wins and later ones are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "skip" => &mut params.skip,
                "order" => &mut params.order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    Ascending,
    Descending,
}

impl ListOrder {
    /// `asc` (any case) sorts oldest first; everything else newest first.
    pub fn from_param(order: Option<&str>) -> Self {
        match order {
            Some(o) if o.trim().eq_ignore_ascii_case("asc") => ListOrder::Ascending,
            _ => ListOrder::Descending,
        }
    }

    /// MongoDB sort direction.
    pub fn direction(self) -> i32 {
        match self {
            ListOrder::Ascending => 1,
            ListOrder::Descending => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: i64,
    pub skip: u64,
    pub order: ListOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
            order: ListOrder::Descending,
        }
    }
}

impl TryFrom<ListParams> for ListQuery {
    type Error = anyhow::Error;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let limit = parse_int("limit", params.limit.as_deref())?
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(MIN_LIMIT, MAX_LIMIT);
        let skip = parse_int("skip", params.skip.as_deref())?
            .unwrap_or(0)
            .max(0) as u64;

        Ok(ListQuery {
            limit,
            skip,
            order: ListOrder::from_param(params.order.as_deref()),
        })
    }
}

fn parse_int(name: &str, raw: Option<&str>) -> anyhow::Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} must be an integer, got '{}': {}", name, value, e)),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
    pub date: String,
}

impl From<ResponseRecord> for ResponseItem {
    fn from(record: ResponseRecord) -> Self {
        Self {
            id: record.id_string(),
            message: record.message,
            date: record.date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponsesResponse {
    pub count: usize,
    pub items: Vec<ResponseItem>,
}

impl From<Vec<ResponseRecord>> for ListResponsesResponse {
    fn from(records: Vec<ResponseRecord>) -> Self {
        let items: Vec<ResponseItem> = records.into_iter().map(ResponseItem::from).collect();
        Self {
            count: items.len(),
            items,
        }
    }
}
