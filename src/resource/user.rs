//! User resource
//!
//! Includes the credential-policy codec: the declared policy block is a map
//! of protocol name to credential-kind strings (as handed over by the
//! hosting runtime), validated and expanded into the API's typed
//! [`CredentialPolicy`] before any network call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::users::{CredentialKind, CredentialPolicy, UserCreateRequest, UserUpdateRequest};
use crate::client::Client;
use crate::error::{Error, Result};

/// Declared credential policy: protocol name to list of credential-kind
/// names. Keys are limited to `http`, `ssh`, `mysql`, and `postgres`.
pub type CredentialPolicyBlock = BTreeMap<String, Vec<String>>;

/// A managed user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserResource {
    /// Server-assigned identifier; `None` until created or after the user
    /// disappears upstream.
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub credential_policy: Option<CredentialPolicyBlock>,
}

impl UserResource {
    /// Prepare a resource for import by identifier; `read` completes it.
    pub fn import(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    /// Validate the declared configuration without touching the API.
    pub fn validate(&self) -> Result<()> {
        if let Some(block) = &self.credential_policy {
            expand_credential_policy(block)?;
        }
        Ok(())
    }

    /// Create the user. The API only accepts the credential policy on
    /// update, so a declared policy is applied with a follow-up call.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        let policy = self
            .credential_policy
            .as_ref()
            .map(expand_credential_policy)
            .transpose()?;

        let user = client
            .create_user(&UserCreateRequest {
                username: self.username.clone(),
                description: self.description.clone(),
            })
            .await?;
        self.id = Some(user.id.clone());

        if let Some(policy) = policy {
            client
                .update_user(
                    &user.id,
                    &UserUpdateRequest {
                        username: self.username.clone(),
                        description: self.description.clone(),
                        credential_policy: Some(policy),
                    },
                )
                .await?;
        }

        self.read(client).await
    }

    /// Refresh from the API; clears the identifier if the user is gone.
    pub async fn read(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        match client.get_user(&id).await? {
            Some(user) => {
                self.username = user.username;
                self.description = user.description;
                self.credential_policy = user
                    .credential_policy
                    .as_ref()
                    .map(flatten_credential_policy);
            }
            None => self.id = None,
        }

        Ok(())
    }

    /// Push username, description, and policy changes to the API.
    pub async fn update(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        let policy = self
            .credential_policy
            .as_ref()
            .map(expand_credential_policy)
            .transpose()?;

        client
            .update_user(
                &id,
                &UserUpdateRequest {
                    username: self.username.clone(),
                    description: self.description.clone(),
                    credential_policy: policy,
                },
            )
            .await?;

        self.read(client).await
    }

    /// Delete the user and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        if let Some(id) = self.id.take() {
            client.delete_user(&id).await?;
        }
        Ok(())
    }
}

/// Convert a declared policy block into the API structure, rejecting
/// unknown protocol keys and credential kinds.
pub fn expand_credential_policy(block: &CredentialPolicyBlock) -> Result<CredentialPolicy> {
    let mut policy = CredentialPolicy::default();

    for (key, kinds) in block {
        let parsed = parse_kind_list(key, kinds)?;

        match key.as_str() {
            "http" => policy.http = Some(parsed),
            "ssh" => policy.ssh = Some(parsed),
            "mysql" => policy.mysql = Some(parsed),
            "postgres" => policy.postgres = Some(parsed),
            other => {
                return Err(Error::validation(format!(
                    "unknown credential policy key: {other}"
                )))
            }
        }
    }

    Ok(policy)
}

fn parse_kind_list(key: &str, kinds: &[String]) -> Result<Vec<CredentialKind>> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            kind.parse().map_err(|_| {
                Error::validation(format!(
                    "credential_policy.{key}[{i}]: {kind} is not a valid credential kind"
                ))
            })
        })
        .collect()
}

/// Convert the API policy structure back into a declared policy block.
pub fn flatten_credential_policy(policy: &CredentialPolicy) -> CredentialPolicyBlock {
    let mut block = CredentialPolicyBlock::new();

    let entries = [
        ("http", &policy.http),
        ("ssh", &policy.ssh),
        ("mysql", &policy.mysql),
        ("postgres", &policy.postgres),
    ];

    for (key, kinds) in entries {
        if let Some(kinds) = kinds {
            block.insert(
                key.to_string(),
                kinds.iter().map(|k| k.to_string()).collect(),
            );
        }
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_round_trips() {
        let block = CredentialPolicyBlock::from([(
            "http".to_string(),
            vec!["Password".to_string(), "Totp".to_string()],
        )]);

        let policy = expand_credential_policy(&block).unwrap();
        assert_eq!(
            policy.http,
            Some(vec![CredentialKind::Password, CredentialKind::Totp])
        );
        assert_eq!(policy.ssh, None);

        assert_eq!(flatten_credential_policy(&policy), block);
    }

    #[test]
    fn policy_rejects_unknown_key() {
        let block =
            CredentialPolicyBlock::from([("ldap".to_string(), vec!["Password".to_string()])]);

        let err = expand_credential_policy(&block).unwrap_err();
        assert_eq!(err.to_string(), "unknown credential policy key: ldap");
    }

    #[test]
    fn policy_rejects_unknown_kind() {
        let block =
            CredentialPolicyBlock::from([("ssh".to_string(), vec!["Fingerprint".to_string()])]);

        let err = expand_credential_policy(&block).unwrap_err();
        assert_eq!(
            err.to_string(),
            "credential_policy.ssh[0]: Fingerprint is not a valid credential kind"
        );
    }

    #[test]
    fn validate_covers_the_declared_policy() {
        let user = UserResource {
            username: "alice".to_string(),
            credential_policy: Some(CredentialPolicyBlock::from([(
                "mysql".to_string(),
                vec!["Sso".to_string(), "Bogus".to_string()],
            )])),
            ..Default::default()
        };

        let err = user.validate().unwrap_err();
        assert!(err.to_string().contains("credential_policy.mysql[1]"));
    }
}
