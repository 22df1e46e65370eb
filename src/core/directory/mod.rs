//! Directory service integration
//!
//! The directory hosts a site containing the role-assignment list. The site
//! identifier is resolved once at startup; every role lookup then reads the
//! list through that identifier.

mod client;
mod roles;
mod site;

pub use client::{DirectoryClient, ListItem, RoleAssignmentFields, SiteRecord};
pub use roles::{Principal, RoleAssignmentRow, RoleResolver, match_role, normalize_email};
pub use site::{SiteIdentifier, SiteRegistry, SiteResolver, SiteState};
