/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public DigiPay client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod sdk;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    Credential,
    CredentialMode,
    SessionStore,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DigipayClient,
    DigipayError,
    Result,
};

// Re-export the SDK facade
pub use sdk::{
    Digipay,
    DigipayBuilder,
    Environment,
};

// Re-export all types
pub use types::*;
