/*
[INPUT]:  HTTP client configuration, credentials and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod error;
pub mod payments;
pub mod settlements;

pub use error::{DigipayError, Result};

pub use client::{
    API_PREFIX, BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL, DigipayClient, TIMEOUT_ENV,
    parse_base_url,
};
