//! Public key credential resource
//!
//! Addressed by the composite `user_id:credential_id`. There is no
//! fetch-by-ID endpoint; reads list the user's public keys and match on the
//! credential ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{combine_id, split_id};
use crate::client::Client;
use crate::error::Result;

/// An OpenSSH public key credential bound to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredentialResource {
    /// Composite `user_id:credential_id`; `None` until created or after the
    /// credential disappears upstream.
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub label: String,
    pub public_key: String,
    /// Server-computed timestamps.
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
}

impl PublicKeyCredentialResource {
    /// Prepare a resource for import from a composite identifier; `read`
    /// completes it.
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
            .add_public_key_credential(&self.user_id, &self.label, &self.public_key)
            .await?;
        self.id = Some(combine_id(&self.user_id, &credential.id));
        self.read(client).await
    }

    /// Refresh from the user's public key list; clears the identifier when
    /// the credential is gone.
    pub async fn read(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        let (user_id, credential_id) = split_id(&id, "user_id", "credential_id")?;
        self.user_id = user_id;

        let credentials = client.public_key_credentials(&self.user_id).await?;
        match credentials.into_iter().find(|c| c.id == credential_id) {
            Some(credential) => {
                self.label = credential.label;
                self.public_key = credential.openssh_public_key;
                self.date_added = credential.date_added;
                self.last_used = credential.last_used;
            }
            None => self.id = None,
        }

        Ok(())
    }

    /// Push label/key changes to the API.
    pub async fn update(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        let (user_id, credential_id) = split_id(&id, "user_id", "credential_id")?;
        client
            .update_public_key_credential(&user_id, &credential_id, &self.label, &self.public_key)
            .await?;

        self.read(client).await
    }

    /// Remove the credential and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.take() else {
            return Ok(());
        };

        let (user_id, credential_id) = split_id(&id, "user_id", "credential_id")?;
        client
            .delete_public_key_credential(&user_id, &credential_id)
            .await?;
        Ok(())
    }
}
