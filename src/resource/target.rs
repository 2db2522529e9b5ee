//! Target resource
//!
//! The declared configuration carries exactly one of four protocol option
//! blocks; validation rejects zero or multiple before any network call.
//! Building translates the populated block into the tagged
//! [`TargetOptions`] union, reading populates the matching block and clears
//! the other three.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::client::targets::{
    HttpOptions, SqlOptions, SshAuth, SshOptions, TargetDataRequest, TargetOptions, Tls,
};
use crate::client::Client;
use crate::error::{Error, Result};

/// Declared TLS settings; `mode` is validated against the three known
/// literals before being sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsBlock {
    pub mode: String,
    pub verify: bool,
}

impl TlsBlock {
    fn to_tls(&self) -> Result<Tls> {
        Ok(Tls {
            mode: self.mode.parse()?,
            verify: self.verify,
        })
    }

    fn from_tls(tls: &Tls) -> Self {
        Self {
            mode: tls.mode.to_string(),
            verify: tls.verify,
        }
    }
}

/// Password authentication block for SSH targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAuthBlock {
    pub password: String,
}

/// Public key authentication block for SSH targets (no attributes; keys are
/// managed on the gateway itself).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyAuthBlock {}

/// Declared SSH target options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshOptionsBlock {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub allow_insecure_algos: bool,
    #[serde(default)]
    pub password_auth: Option<PasswordAuthBlock>,
    #[serde(default)]
    pub public_key_auth: Option<PublicKeyAuthBlock>,
}

/// Declared HTTP target options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOptionsBlock {
    pub url: String,
    pub tls: TlsBlock,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub external_host: Option<String>,
}

/// Declared MySQL/PostgreSQL target options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlOptionsBlock {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    pub tls: TlsBlock,
}

impl SqlOptionsBlock {
    fn to_options(&self) -> Result<SqlOptions> {
        Ok(SqlOptions {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            tls: self.tls.to_tls()?,
        })
    }

    fn from_options(options: &SqlOptions) -> Self {
        Self {
            host: options.host.clone(),
            port: options.port,
            username: options.username.clone(),
            password: options.password.clone(),
            tls: TlsBlock::from_tls(&options.tls),
        }
    }
}

/// A managed target: a protected destination reachable through the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetResource {
    /// Server-assigned identifier; `None` until created or after the target
    /// disappears upstream.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Roles allowed to access this target (server-computed).
    #[serde(default)]
    pub allow_roles: Vec<String>,
    #[serde(default)]
    pub ssh_options: Option<SshOptionsBlock>,
    #[serde(default)]
    pub http_options: Option<HttpOptionsBlock>,
    #[serde(default)]
    pub mysql_options: Option<SqlOptionsBlock>,
    #[serde(default)]
    pub postgres_options: Option<SqlOptionsBlock>,
}

impl TargetResource {
    /// Prepare a resource for import by identifier; `read` completes it.
    pub fn import(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    /// Validate the declared configuration without touching the API:
    /// exactly one option block, exactly one SSH auth method, known TLS
    /// modes.
    pub fn validate(&self) -> Result<()> {
        let blocks = [
            self.ssh_options.is_some(),
            self.http_options.is_some(),
            self.mysql_options.is_some(),
            self.postgres_options.is_some(),
        ];

        match blocks.iter().filter(|set| **set).count() {
            0 => {
                return Err(Error::validation(
                    "one of ssh_options, http_options, mysql_options, or postgres_options must be specified",
                ))
            }
            1 => {}
            _ => {
                return Err(Error::validation(
                    "only one of ssh_options, http_options, mysql_options, postgres_options can be specified",
                ))
            }
        }

        if let Some(ssh) = &self.ssh_options {
            match (&ssh.password_auth, &ssh.public_key_auth) {
                (Some(_), Some(_)) => {
                    return Err(Error::validation(
                        "only one of password_auth or public_key_auth can be specified",
                    ))
                }
                (None, None) => {
                    return Err(Error::validation(
                        "SSH target requires either password_auth or public_key_auth",
                    ))
                }
                _ => {}
            }
        }

        if let Some(http) = &self.http_options {
            http.tls.to_tls()?;
        }
        if let Some(mysql) = &self.mysql_options {
            mysql.tls.to_tls()?;
        }
        if let Some(postgres) = &self.postgres_options {
            postgres.tls.to_tls()?;
        }

        Ok(())
    }

    /// Translate the populated option block into the tagged API union.
    pub fn build_options(&self) -> Result<TargetOptions> {
        self.validate()?;

        if let Some(ssh) = &self.ssh_options {
            let auth = match (&ssh.password_auth, &ssh.public_key_auth) {
                (Some(password_auth), None) => SshAuth::Password {
                    password: password_auth.password.clone(),
                },
                (None, Some(_)) => SshAuth::PublicKey,
                // validate() has already rejected the other shapes
                _ => unreachable!("ssh auth validated to exactly one method"),
            };

            return Ok(TargetOptions::Ssh(SshOptions {
                host: ssh.host.clone(),
                port: ssh.port,
                username: ssh.username.clone(),
                allow_insecure_algos: ssh.allow_insecure_algos,
                auth,
            }));
        }

        if let Some(http) = &self.http_options {
            return Ok(TargetOptions::Http(HttpOptions {
                url: http.url.clone(),
                tls: http.tls.to_tls()?,
                headers: http.headers.clone(),
                external_host: http.external_host.clone(),
            }));
        }

        if let Some(mysql) = &self.mysql_options {
            return Ok(TargetOptions::MySql(mysql.to_options()?));
        }

        if let Some(postgres) = &self.postgres_options {
            return Ok(TargetOptions::Postgres(postgres.to_options()?));
        }

        Err(Error::validation("no target options specified"))
    }

    /// Populate the block matching the API options; the other three blocks
    /// are always cleared.
    pub fn set_options(&mut self, options: &TargetOptions) {
        self.ssh_options = None;
        self.http_options = None;
        self.mysql_options = None;
        self.postgres_options = None;

        match options {
            TargetOptions::Ssh(ssh) => {
                let (password_auth, public_key_auth) = match &ssh.auth {
                    SshAuth::Password { password } => (
                        Some(PasswordAuthBlock {
                            password: password.clone(),
                        }),
                        None,
                    ),
                    SshAuth::PublicKey => (None, Some(PublicKeyAuthBlock {})),
                };

                self.ssh_options = Some(SshOptionsBlock {
                    host: ssh.host.clone(),
                    port: ssh.port,
                    username: ssh.username.clone(),
                    allow_insecure_algos: ssh.allow_insecure_algos,
                    password_auth,
                    public_key_auth,
                });
            }
            TargetOptions::Http(http) => {
                self.http_options = Some(HttpOptionsBlock {
                    url: http.url.clone(),
                    tls: TlsBlock::from_tls(&http.tls),
                    headers: http.headers.clone(),
                    external_host: http.external_host.clone(),
                });
            }
            TargetOptions::MySql(sql) => {
                self.mysql_options = Some(SqlOptionsBlock::from_options(sql));
            }
            TargetOptions::Postgres(sql) => {
                self.postgres_options = Some(SqlOptionsBlock::from_options(sql));
            }
        }
    }

    fn request(&self) -> Result<TargetDataRequest> {
        Ok(TargetDataRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            options: self.build_options()?,
        })
    }

    /// Create the target and store its identifier.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        let req = self.request()?;
        let target = client.create_target(&req).await?;
        self.id = Some(target.id);
        self.read(client).await
    }

    /// Refresh from the API; clears the identifier if the target is gone.
    pub async fn read(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        match client.get_target(&id).await? {
            Some(target) => {
                self.name = target.name;
                self.description = target.description;
                self.allow_roles = target.allow_roles;
                self.set_options(&target.options);
            }
            None => self.id = None,
        }

        Ok(())
    }

    /// Push configuration changes to the API.
    pub async fn update(&mut self, client: &Client) -> Result<()> {
        let Some(id) = self.id.clone() else {
            return Ok(());
        };

        let req = self.request()?;
        client.update_target(&id, &req).await?;
        self.read(client).await
    }

    /// Delete the target and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        if let Some(id) = self.id.take() {
            client.delete_target(&id).await?;
        }
        Ok(())
    }
}
