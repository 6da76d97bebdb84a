use serde::Serialize;
use utoipa::ToSchema;

/// Wraps a successful response body as `{"data": ...}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
