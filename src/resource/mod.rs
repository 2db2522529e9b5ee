//! Declarative resource mapping layer
//!
//! One struct per managed entity kind. Each struct holds the declared
//! configuration plus a locally tracked identifier (`id`), and exposes
//! async lifecycle operations that translate to API calls.
//!
//! Conventions shared by all resources:
//!
//! - `create` issues the API call and stores the resulting identifier.
//! - `read` refreshes the struct from the API; if the entity no longer
//!   exists upstream the identifier is cleared rather than raising an
//!   error, signaling that the resource is gone.
//! - `delete` removes the entity and clears the identifier.
//! - Relationship resources (user-role, target-role, credentials) have no
//!   server-side identity of their own and synthesize composite IDs; see
//!   [`ids`].
//!
//! Operations are stateless and self-contained: the hosting runtime may run
//! operations for independent resource instances concurrently, passing each
//! its own reference to the shared [`crate::Client`].

pub mod ids;
pub mod password_credential;
pub mod public_key_credential;
pub mod role;
pub mod sso_credential;
pub mod target;
pub mod target_role;
pub mod ticket;
pub mod user;
pub mod user_role;

pub use ids::{combine_id, split_id};
pub use password_credential::PasswordCredentialResource;
pub use public_key_credential::PublicKeyCredentialResource;
pub use role::RoleResource;
pub use sso_credential::SsoCredentialResource;
pub use target::{
    HttpOptionsBlock, PasswordAuthBlock, PublicKeyAuthBlock, SqlOptionsBlock, SshOptionsBlock,
    TargetResource, TlsBlock,
};
pub use target_role::TargetRoleResource;
pub use ticket::TicketResource;
pub use user::{CredentialPolicyBlock, UserResource};
pub use user_role::UserRoleResource;
