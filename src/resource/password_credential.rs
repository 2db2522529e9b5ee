//! Password credential resource
//!
//! Addressed by the composite `user_id:credential_id`. The API never returns
//! the password, so there is no server read-back; changing the password
//! means replacing the credential.

use serde::{Deserialize, Serialize};

use super::ids::{combine_id, split_id};
use crate::client::Client;
use crate::error::Result;

/// A password credential bound to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordCredentialResource {
    /// Composite `user_id:credential_id`; `None` until created.
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub password: String,
}

impl PasswordCredentialResource {
    /// Prepare a resource for import from a composite identifier. The
    /// password itself cannot be recovered from the API.
    pub fn import(id: &str) -> Result<Self> {
        let (user_id, _) = split_id(id, "user_id", "credential_id")?;
        Ok(Self {
            id: Some(id.to_string()),
            user_id,
            ..Default::default()
        })
    }

    /// Add the credential and synthesize the composite identifier.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        let credential = client
            .add_password_credential(&self.user_id, &self.password)
            .await?;
        self.id = Some(combine_id(&self.user_id, &credential.id));
        Ok(())
    }

    /// No-op: the API exposes no way to read a password credential back.
    pub async fn read(&mut self, _client: &Client) -> Result<()> {
        Ok(())
    }

    /// Remove the credential and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.take() else {
            return Ok(());
        };

        let (user_id, credential_id) = split_id(&id, "user_id", "credential_id")?;
        client
            .delete_password_credential(&user_id, &credential_id)
            .await?;
        Ok(())
    }
}
