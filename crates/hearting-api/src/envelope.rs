use crate::ApiError;
use serde::de::IgnoredAny;
use serde::Deserialize;

pub const SUCCESS_STATUS: &str = "success";

/// `{ "status": ..., "data": ... }` wrapper every endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Rejected {
                status: self.status,
            });
        }
        self.data.ok_or(ApiError::MissingData)
    }
}

impl Envelope<IgnoredAny> {
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                status: self.status,
            })
        }
    }
}
