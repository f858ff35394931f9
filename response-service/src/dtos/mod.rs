pub mod responses;

pub use responses::{
    ListOrder, ListParams, ListQuery, ListResponsesResponse, ResponseItem, SaveResponseRequest,
    SaveResponseResponse,
};
