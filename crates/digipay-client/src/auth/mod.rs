/*
[INPUT]:  API keys, session tokens, environment lookups
[OUTPUT]: Credential values and the shared session slot
[POS]:    Auth layer - credential modes for DigiPay requests
[UPDATE]: When auth modes or token handling change
*/

pub mod credential;
pub mod session;

pub use credential::{API_KEY_ENV, API_KEY_HEADER, Credential, CredentialMode};
pub use session::{SessionStore, token_expiry};
