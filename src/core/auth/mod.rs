//! Service-principal authentication
//!
//! Two independent identities are used: one scoped to the directory service
//! and one scoped to the report-hosting service. Tokens are fetched fresh for
//! every operation through the OAuth2 client-credentials grant.

mod client_credentials;
mod credentials;

pub use client_credentials::{CredentialAcquirer, TokenResponse};
pub use credentials::{AccessToken, ServiceCredential};
