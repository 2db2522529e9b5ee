//! Target endpoints
//!
//! Target CRUD and the tagged target-options union. The API represents the
//! per-protocol options as a JSON object discriminated by a `kind` field;
//! here that is a sum type deserialized directly via the discriminator, so
//! an unrecognized `kind` fails at decode time.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::error::{Error, Result};

/// TLS mode for a target connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsMode {
    Disabled,
    Preferred,
    Required,
}

impl TlsMode {
    /// The wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsMode::Disabled => "Disabled",
            TlsMode::Preferred => "Preferred",
            TlsMode::Required => "Required",
        }
    }
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TlsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Disabled" => Ok(TlsMode::Disabled),
            "Preferred" => Ok(TlsMode::Preferred),
            "Required" => Ok(TlsMode::Required),
            other => Err(Error::validation(format!(
                "invalid TLS mode: {other} (expected Disabled, Preferred, or Required)"
            ))),
        }
    }
}

/// TLS configuration embedded in HTTP/MySQL/Postgres target options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tls {
    pub mode: TlsMode,
    pub verify: bool,
}

/// Authentication method for SSH targets, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SshAuth {
    Password { password: String },
    PublicKey,
}

/// Options for SSH targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub allow_insecure_algos: bool,
    pub auth: SshAuth,
}

/// Options for HTTP targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOptions {
    pub url: String,
    pub tls: Tls,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_host: Option<String>,
}

/// Options for MySQL and PostgreSQL targets (identical shape, distinct kinds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub tls: Tls,
}

/// Per-protocol target options, discriminated by `kind`.
///
/// Exactly one variant is ever populated for a given target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TargetOptions {
    Ssh(SshOptions),
    Http(HttpOptions),
    MySql(SqlOptions),
    Postgres(SqlOptions),
}

/// A Warpgate target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub allow_roles: Vec<String>,
    pub options: TargetOptions,
}

/// Request payload for creating or updating a target
#[derive(Debug, Clone, Serialize)]
pub struct TargetDataRequest {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub options: TargetOptions,
}

impl Client {
    /// Retrieve all targets, optionally filtered by a search term.
    pub async fn list_targets(&self, search: Option<&str>) -> Result<Vec<Target>> {
        self.list("/targets", search).await
    }

    /// Retrieve a target by ID. Returns `None` if the target does not exist.
    pub async fn get_target(&self, id: &str) -> Result<Option<Target>> {
        self.get_optional(&format!("/targets/{id}")).await
    }

    /// Create a new target.
    pub async fn create_target(&self, req: &TargetDataRequest) -> Result<Target> {
        let response = self.request(Method::POST, "/targets", Some(req)).await?;
        Self::handle(response).await
    }

    /// Update an existing target's name, description, and options.
    pub async fn update_target(&self, id: &str, req: &TargetDataRequest) -> Result<Target> {
        let response = self
            .request(Method::PUT, &format!("/targets/{id}"), Some(req))
            .await?;
        Self::handle(response).await
    }

    /// Delete a target by ID.
    pub async fn delete_target(&self, id: &str) -> Result<()> {
        let response = self
            .request::<()>(Method::DELETE, &format!("/targets/{id}"), None)
            .await?;
        Self::handle_empty(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ssh_options_round_trip() {
        let options = TargetOptions::Ssh(SshOptions {
            host: "bastion.internal".to_string(),
            port: 22,
            username: "admin".to_string(),
            allow_insecure_algos: false,
            auth: SshAuth::Password {
                password: "hunter2".to_string(),
            },
        });

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["kind"], "Ssh");
        assert_eq!(value["auth"]["kind"], "Password");

        let decoded: TargetOptions = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, options);
    }

    #[test]
    fn ssh_public_key_auth_round_trip() {
        let options = TargetOptions::Ssh(SshOptions {
            host: "bastion.internal".to_string(),
            port: 2222,
            username: "deploy".to_string(),
            allow_insecure_algos: true,
            auth: SshAuth::PublicKey,
        });

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["auth"], json!({ "kind": "PublicKey" }));

        let decoded: TargetOptions = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, options);
    }

    #[test]
    fn http_options_round_trip() {
        let options = TargetOptions::Http(HttpOptions {
            url: "https://app.internal".to_string(),
            tls: Tls {
                mode: TlsMode::Required,
                verify: true,
            },
            headers: HashMap::from([("X-Custom".to_string(), "1".to_string())]),
            external_host: Some("app.example.com".to_string()),
        });

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["kind"], "Http");
        assert_eq!(value["tls"]["mode"], "Required");

        let decoded: TargetOptions = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, options);
    }

    #[test]
    fn mysql_and_postgres_kinds_stay_distinct() {
        let sql = SqlOptions {
            host: "db.internal".to_string(),
            port: 5432,
            username: "root".to_string(),
            password: None,
            tls: Tls {
                mode: TlsMode::Preferred,
                verify: false,
            },
        };

        let mysql = serde_json::to_value(TargetOptions::MySql(sql.clone())).unwrap();
        let postgres = serde_json::to_value(TargetOptions::Postgres(sql)).unwrap();
        assert_eq!(mysql["kind"], "MySql");
        assert_eq!(postgres["kind"], "Postgres");
    }

    #[test]
    fn unknown_kind_is_a_hard_error() {
        let result: serde_json::Result<TargetOptions> = serde_json::from_value(json!({
            "kind": "Redis",
            "host": "cache.internal",
            "port": 6379
        }));
        assert!(result.is_err());
    }

    #[test]
    fn tls_mode_parses_only_known_literals() {
        assert_eq!("Preferred".parse::<TlsMode>().unwrap(), TlsMode::Preferred);
        assert!("preferred".parse::<TlsMode>().is_err());
        assert!("Optional".parse::<TlsMode>().is_err());
    }
}
