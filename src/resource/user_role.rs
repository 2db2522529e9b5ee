//! User-role assignment resource
//!
//! A join resource with no server-side identity; addressed by the composite
//! `user_id:role_id`. Existence is reconciled by re-fetching the user's role
//! list and checking membership.

use serde::{Deserialize, Serialize};

use super::ids::{combine_id, split_id};
use crate::client::Client;
use crate::error::Result;

/// Assignment of a role to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRoleResource {
    /// Composite `user_id:role_id`; `None` until created or after the
    /// assignment disappears upstream.
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub role_id: String,
}

impl UserRoleResource {
    /// Prepare a resource for import from a composite identifier.
    pub fn import(id: &str) -> Result<Self> {
        let (user_id, role_id) = split_id(id, "user_id", "role_id")?;
        Ok(Self {
            id: Some(id.to_string()),
            user_id,
            role_id,
        })
    }

    /// Assign the role and synthesize the composite identifier.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        client.add_user_role(&self.user_id, &self.role_id).await?;
        self.id = Some(combine_id(&self.user_id, &self.role_id));
        Ok(())
    }

    /// Check that the assignment still exists; clears the identifier when
    /// the role is no longer in the user's role list.
    pub async fn read(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        let (user_id, role_id) = split_id(&id, "user_id", "role_id")?;
        self.user_id = user_id;
        self.role_id = role_id;

        let roles = client.user_roles(&self.user_id).await?;
        if !roles.iter().any(|role| role.id == self.role_id) {
            self.id = None;
        }

        Ok(())
    }

    /// Remove the assignment and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        client
            .delete_user_role(&self.user_id, &self.role_id)
            .await?;
        self.id = None;
        Ok(())
    }
}
