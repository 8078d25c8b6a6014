use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("api error: {0}")]
    Api(#[from] hearting_api::ApiError),
    #[error("expiry error: {0}")]
    Expiry(#[from] hearting_core::ExpiryError),
}
