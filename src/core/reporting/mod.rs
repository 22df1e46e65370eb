//! Report-hosting service integration

mod client;
mod composer;

pub use client::{GeneratedToken, ReportMetadata, ReportingClient};
pub use composer::{EmbedTokenComposer, build_token_request, target_workspaces};
