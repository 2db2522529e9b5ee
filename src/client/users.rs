//! User endpoints
//!
//! User CRUD, the per-protocol credential policy, and the per-user
//! credential sub-resources (passwords, public keys, SSO identities).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::error::{Error, Result};

/// A kind of authentication factor a user can be required to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialKind {
    Password,
    PublicKey,
    Totp,
    Sso,
    WebUserApproval,
}

impl CredentialKind {
    /// All known credential kinds.
    pub const ALL: [CredentialKind; 5] = [
        CredentialKind::Password,
        CredentialKind::PublicKey,
        CredentialKind::Totp,
        CredentialKind::Sso,
        CredentialKind::WebUserApproval,
    ];

    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::Password => "Password",
            CredentialKind::PublicKey => "PublicKey",
            CredentialKind::Totp => "Totp",
            CredentialKind::Sso => "Sso",
            CredentialKind::WebUserApproval => "WebUserApproval",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CredentialKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::validation(format!("{s} is not a valid credential kind")))
    }
}

/// Per-protocol credential requirements for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<Vec<CredentialKind>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh: Option<Vec<CredentialKind>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql: Option<Vec<CredentialKind>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<Vec<CredentialKind>>,
}

/// A Warpgate user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_policy: Option<CredentialPolicy>,
}

/// Request payload for creating a user
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserCreateRequest {
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Request payload for updating a user
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdateRequest {
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_policy: Option<CredentialPolicy>,
}

/// A password credential attached to a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordCredential {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// A public key credential attached to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredential {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub label: String,
    pub openssh_public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

/// An SSO identity attached to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsoCredential {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub provider: String,
    pub email: String,
}

impl Client {
    /// Retrieve all users, optionally filtered by a search term.
    pub async fn list_users(&self, search: Option<&str>) -> Result<Vec<User>> {
        self.list("/users", search).await
    }

    /// Retrieve a user by ID. Returns `None` if the user does not exist.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.get_optional(&format!("/users/{id}")).await
    }

    /// Create a new user.
    pub async fn create_user(&self, req: &UserCreateRequest) -> Result<User> {
        let response = self.request(Method::POST, "/users", Some(req)).await?;
        Self::handle(response).await
    }

    /// Update an existing user, including its credential policy.
    pub async fn update_user(&self, id: &str, req: &UserUpdateRequest) -> Result<User> {
        let response = self
            .request(Method::PUT, &format!("/users/{id}"), Some(req))
            .await?;
        Self::handle(response).await
    }

    /// Delete a user by ID.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let response = self
            .request::<()>(Method::DELETE, &format!("/users/{id}"), None)
            .await?;
        Self::handle_empty(response).await
    }

    /// Add a password credential to a user.
    pub async fn add_password_credential(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<PasswordCredential> {
        let req = PasswordCredential {
            password: password.to_string(),
            ..Default::default()
        };

        let response = self
            .request(
                Method::POST,
                &format!("/users/{user_id}/credentials/passwords"),
                Some(&req),
            )
            .await?;
        Self::handle(response).await
    }

    /// Remove a password credential from a user.
    pub async fn delete_password_credential(
        &self,
        user_id: &str,
        credential_id: &str,
    ) -> Result<()> {
        let response = self
            .request::<()>(
                Method::DELETE,
                &format!("/users/{user_id}/credentials/passwords/{credential_id}"),
                None,
            )
            .await?;
        Self::handle_empty(response).await
    }

    /// Retrieve all public key credentials for a user.
    pub async fn public_key_credentials(&self, user_id: &str) -> Result<Vec<PublicKeyCredential>> {
        let response = self
            .request::<()>(
                Method::GET,
                &format!("/users/{user_id}/credentials/public-keys"),
                None,
            )
            .await?;
        Self::handle(response).await
    }

    /// Add a public key credential to a user.
    pub async fn add_public_key_credential(
        &self,
        user_id: &str,
        label: &str,
        openssh_public_key: &str,
    ) -> Result<PublicKeyCredential> {
        let req = PublicKeyCredential {
            label: label.to_string(),
            openssh_public_key: openssh_public_key.to_string(),
            ..Default::default()
        };

        let response = self
            .request(
                Method::POST,
                &format!("/users/{user_id}/credentials/public-keys"),
                Some(&req),
            )
            .await?;
        Self::handle(response).await
    }

    /// Update an existing public key credential.
    pub async fn update_public_key_credential(
        &self,
        user_id: &str,
        credential_id: &str,
        label: &str,
        openssh_public_key: &str,
    ) -> Result<PublicKeyCredential> {
        let req = PublicKeyCredential {
            label: label.to_string(),
            openssh_public_key: openssh_public_key.to_string(),
            ..Default::default()
        };

        let response = self
            .request(
                Method::PUT,
                &format!("/users/{user_id}/credentials/public-keys/{credential_id}"),
                Some(&req),
            )
            .await?;
        Self::handle(response).await
    }

    /// Remove a public key credential from a user.
    pub async fn delete_public_key_credential(
        &self,
        user_id: &str,
        credential_id: &str,
    ) -> Result<()> {
        let response = self
            .request::<()>(
                Method::DELETE,
                &format!("/users/{user_id}/credentials/public-keys/{credential_id}"),
                None,
            )
            .await?;
        Self::handle_empty(response).await
    }

    /// Retrieve all SSO credentials for a user.
    pub async fn sso_credentials(&self, user_id: &str) -> Result<Vec<SsoCredential>> {
        let response = self
            .request::<()>(Method::GET, &format!("/users/{user_id}/credentials/sso"), None)
            .await?;
        Self::handle(response).await
    }

    /// Add an SSO credential to a user.
    pub async fn add_sso_credential(
        &self,
        user_id: &str,
        provider: &str,
        email: &str,
    ) -> Result<SsoCredential> {
        let req = SsoCredential {
            provider: provider.to_string(),
            email: email.to_string(),
            ..Default::default()
        };

        let response = self
            .request(
                Method::POST,
                &format!("/users/{user_id}/credentials/sso"),
                Some(&req),
            )
            .await?;
        Self::handle(response).await
    }

    /// Update an existing SSO credential.
    pub async fn update_sso_credential(
        &self,
        user_id: &str,
        credential_id: &str,
        provider: &str,
        email: &str,
    ) -> Result<SsoCredential> {
        let req = SsoCredential {
            provider: provider.to_string(),
            email: email.to_string(),
            ..Default::default()
        };

        let response = self
            .request(
                Method::PUT,
                &format!("/users/{user_id}/credentials/sso/{credential_id}"),
                Some(&req),
            )
            .await?;
        Self::handle(response).await
    }

    /// Remove an SSO credential from a user.
    pub async fn delete_sso_credential(&self, user_id: &str, credential_id: &str) -> Result<()> {
        let response = self
            .request::<()>(
                Method::DELETE,
                &format!("/users/{user_id}/credentials/sso/{credential_id}"),
                None,
            )
            .await?;
        Self::handle_empty(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_kind_parses_known_values() {
        for kind in CredentialKind::ALL {
            assert_eq!(kind.as_str().parse::<CredentialKind>().unwrap(), kind);
        }
    }

    #[test]
    fn credential_kind_rejects_unknown_values() {
        assert!("Fingerprint".parse::<CredentialKind>().is_err());
        assert!("password".parse::<CredentialKind>().is_err());
        assert!("".parse::<CredentialKind>().is_err());
    }

    #[test]
    fn credential_policy_serializes_only_populated_protocols() {
        let policy = CredentialPolicy {
            http: Some(vec![CredentialKind::Password, CredentialKind::Totp]),
            ..Default::default()
        };

        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "http": ["Password", "Totp"] })
        );
    }
}
