//! Read-only lookups
//!
//! Resolve existing roles, users, and targets by server ID or by name.
//! Name lookups go through the list endpoint's search filter and require an
//! exact match. Unlike resource reads, a missing entity here is an error:
//! a lookup that finds nothing cannot produce usable attributes.

use serde::{Deserialize, Serialize};

use crate::client::roles::Role;
use crate::client::targets::Target;
use crate::client::users::{SsoCredential, User};
use crate::client::Client;
use crate::error::{Error, Result};

/// Selector for lookups: by server ID or by (user)name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    Id(String),
    Name(String),
}

impl Selector {
    /// Build a selector from optional id/name attributes, requiring at
    /// least one. Name takes precedence when both are given.
    pub fn from_attrs(id: Option<&str>, name: Option<&str>) -> Result<Self> {
        match (name.filter(|n| !n.is_empty()), id.filter(|i| !i.is_empty())) {
            (Some(name), _) => Ok(Selector::Name(name.to_string())),
            (None, Some(id)) => Ok(Selector::Id(id.to_string())),
            (None, None) => Err(Error::validation("either 'id' or 'name' must be specified")),
        }
    }
}

/// Look up a role by ID or name.
pub async fn lookup_role(client: &Client, selector: &Selector) -> Result<Role> {
    match selector {
        Selector::Id(id) => client.get_role(id).await?.ok_or_else(|| Error::NotFound {
            kind: "role",
            name: id.clone(),
        }),
        Selector::Name(name) => client
            .list_roles(Some(name))
            .await?
            .into_iter()
            .find(|role| role.name == *name)
            .ok_or_else(|| Error::NotFound {
                kind: "role",
                name: name.clone(),
            }),
    }
}

/// A user together with its SSO credentials, as exposed by the user lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub user: User,
    pub sso_credentials: Vec<SsoCredential>,
}

/// Look up a user by ID or username, including its SSO credentials.
pub async fn lookup_user(client: &Client, selector: &Selector) -> Result<UserData> {
    let user = match selector {
        Selector::Id(id) => client.get_user(id).await?.ok_or_else(|| Error::NotFound {
            kind: "user",
            name: id.clone(),
        })?,
        Selector::Name(username) => client
            .list_users(Some(username))
            .await?
            .into_iter()
            .find(|user| user.username == *username)
            .ok_or_else(|| Error::NotFound {
                kind: "user",
                name: username.clone(),
            })?,
    };

    let sso_credentials = client.sso_credentials(&user.id).await?;

    Ok(UserData {
        user,
        sso_credentials,
    })
}

/// Look up a target by ID or name.
pub async fn lookup_target(client: &Client, selector: &Selector) -> Result<Target> {
    match selector {
        Selector::Id(id) => client
            .get_target(id)
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "target",
                name: id.clone(),
            }),
        Selector::Name(name) => client
            .list_targets(Some(name))
            .await?
            .into_iter()
            .find(|target| target.name == *name)
            .ok_or_else(|| Error::NotFound {
                kind: "target",
                name: name.clone(),
            }),
    }
}
