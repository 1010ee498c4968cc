//! Shared HTTP building blocks: response envelope, error rendering, extractors

mod path_id;
mod response;
mod validated_json;

pub use path_id::PathId;
pub use response::{detail_response, ApiEnvelope, ApiError, DetailBody, EmptyData};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
