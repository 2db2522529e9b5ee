//! SSO credential resource
//!
//! Unlike the other credential resources, the server-issued credential ID is
//! used directly as the resource identifier; the owning user is a separate
//! attribute. Import still accepts the composite `user_id:credential_id`
//! form, since the credential alone does not identify its owner.

use serde::{Deserialize, Serialize};

use super::ids::split_id;
use crate::client::Client;
use crate::error::{Error, Result};

/// An SSO identity (provider + email) bound to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsoCredentialResource {
    /// Server-issued credential ID; `None` until created or after the
    /// credential disappears upstream.
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub provider: String,
    pub email: String,
}

impl SsoCredentialResource {
    /// Prepare a resource for import from `user_id:credential_id`; `read`
    /// completes it.
    pub fn import(id: &str) -> Result<Self> {
        let (user_id, credential_id) = split_id(id, "user_id", "credential_id")?;
        Ok(Self {
            id: Some(credential_id),
            user_id,
            ..Default::default()
        })
    }

    /// Add the credential, verifying the owning user exists first.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        let user = client.get_user(&self.user_id).await?;
        if user.is_none() {
            return Err(Error::NotFound {
                kind: "user",
                name: self.user_id.clone(),
            });
        }

        let credential = client
            .add_sso_credential(&self.user_id, &self.provider, &self.email)
            .await?;
        self.id = Some(credential.id);
        self.read(client).await
    }

    /// Refresh from the user's SSO credential list; clears the identifier
    /// when the credential is gone.
    pub async fn read(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        let credentials = client.sso_credentials(&self.user_id).await?;
        match credentials.into_iter().find(|c| c.id == id) {
            Some(credential) => {
                self.provider = credential.provider;
                self.email = credential.email;
            }
            None => self.id = None,
        }

        Ok(())
    }

    /// Push provider/email changes to the API.
    pub async fn update(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        client
            .update_sso_credential(&self.user_id, &id, &self.provider, &self.email)
            .await?;

        self.read(client).await
    }

    /// Remove the credential and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        if let Some(id) = self.id.take() {
            client.delete_sso_credential(&self.user_id, &id).await?;
        }
        Ok(())
    }
}
