//! Role resource

use serde::{Deserialize, Serialize};

use crate::client::roles::RoleDataRequest;
use crate::client::Client;
use crate::error::Result;

/// A managed role: a named permission grouping assignable to users and
/// targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleResource {
    /// Server-assigned identifier; `None` until created or after the role
    /// disappears upstream.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl RoleResource {
    /// Prepare a resource for import by identifier; `read` completes it.
    pub fn import(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    fn request(&self) -> RoleDataRequest {
        RoleDataRequest {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    /// Create the role and store its identifier.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        let role = client.create_role(&self.request()).await?;
        self.id = Some(role.id);
        self.read(client).await
    }

    /// Refresh from the API; clears the identifier if the role is gone.
    pub async fn read(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        match client.get_role(&id).await? {
            Some(role) => {
                self.name = role.name;
                self.description = role.description;
            }
            None => self.id = None,
        }

        Ok(())
    }

    /// Push name/description changes to the API.
    pub async fn update(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        client.update_role(&id, &self.request()).await?;
        self.read(client).await
    }

    /// Delete the role and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        if let Some(id) = self.id.take() {
            client.delete_role(&id).await?;
        }
        Ok(())
    }
}
