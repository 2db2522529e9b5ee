//! Target-role assignment resource
//!
//! Mirrors [`super::user_role`] for targets: composite `target_id:role_id`,
//! membership checked against the target's role list.

use serde::{Deserialize, Serialize};

use super::ids::{combine_id, split_id};
use crate::client::Client;
use crate::error::Result;

/// Assignment of a role to a target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetRoleResource {
    /// Composite `target_id:role_id`; `None` until created or after the
    /// assignment disappears upstream.
    #[serde(default)]
    pub id: Option<String>,
    pub target_id: String,
    pub role_id: String,
}

impl TargetRoleResource {
    /// Prepare a resource for import from a composite identifier.
    pub fn import(id: &str) -> Result<Self> {
        let (target_id, role_id) = split_id(id, "target_id", "role_id")?;
        Ok(Self {
            id: Some(id.to_string()),
            target_id,
            role_id,
        })
    }

    /// Assign the role and synthesize the composite identifier.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        client
            .add_target_role(&self.target_id, &self.role_id)
            .await?;
        self.id = Some(combine_id(&self.target_id, &self.role_id));
        Ok(())
    }

    /// Check that the assignment still exists; clears the identifier when
    /// the role is no longer in the target's role list.
    pub async fn read(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        let (target_id, role_id) = split_id(&id, "target_id", "role_id")?;
        self.target_id = target_id;
        self.role_id = role_id;

        let roles = client.target_roles(&self.target_id).await?;
        if !roles.iter().any(|role| role.id == self.role_id) {
            self.id = None;
        }

        Ok(())
    }

    /// Remove the assignment and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        client
            .delete_target_role(&self.target_id, &self.role_id)
            .await?;
        self.id = None;
        Ok(())
    }
}
