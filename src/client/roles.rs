//! Role endpoints
//!
//! Role CRUD plus the role-assignment endpoints for users and targets.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::error::Result;

/// A Warpgate role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Request payload for creating or updating a role
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleDataRequest {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Client {
    /// Retrieve all roles, optionally filtered by a search term.
    pub async fn list_roles(&self, search: Option<&str>) -> Result<Vec<Role>> {
        self.list("/roles", search).await
    }

    /// Retrieve a role by ID. Returns `None` if the role does not exist.
    pub async fn get_role(&self, id: &str) -> Result<Option<Role>> {
        self.get_optional(&format!("/role/{id}")).await
    }

    /// Create a new role.
    pub async fn create_role(&self, req: &RoleDataRequest) -> Result<Role> {
        let response = self.request(Method::POST, "/roles", Some(req)).await?;
        Self::handle(response).await
    }

    /// Update an existing role's name and description.
    pub async fn update_role(&self, id: &str, req: &RoleDataRequest) -> Result<Role> {
        let response = self
            .request(Method::PUT, &format!("/role/{id}"), Some(req))
            .await?;
        Self::handle(response).await
    }

    /// Delete a role by ID.
    pub async fn delete_role(&self, id: &str) -> Result<()> {
        let response = self
            .request::<()>(Method::DELETE, &format!("/role/{id}"), None)
            .await?;
        Self::handle_empty(response).await
    }

    /// Assign a role to a user.
    pub async fn add_user_role(&self, user_id: &str, role_id: &str) -> Result<()> {
        let response = self
            .request::<()>(Method::POST, &format!("/users/{user_id}/roles/{role_id}"), None)
            .await?;
        Self::handle_empty(response).await
    }

    /// Remove a role assignment from a user.
    pub async fn delete_user_role(&self, user_id: &str, role_id: &str) -> Result<()> {
        let response = self
            .request::<()>(
                Method::DELETE,
                &format!("/users/{user_id}/roles/{role_id}"),
                None,
            )
            .await?;
        Self::handle_empty(response).await
    }

    /// Retrieve all roles assigned to a user.
    pub async fn user_roles(&self, user_id: &str) -> Result<Vec<Role>> {
        let response = self
            .request::<()>(Method::GET, &format!("/users/{user_id}/roles"), None)
            .await?;
        Self::handle(response).await
    }

    /// Assign a role to a target.
    pub async fn add_target_role(&self, target_id: &str, role_id: &str) -> Result<()> {
        let response = self
            .request::<()>(
                Method::POST,
                &format!("/targets/{target_id}/roles/{role_id}"),
                None,
            )
            .await?;
        Self::handle_empty(response).await
    }

    /// Remove a role assignment from a target.
    pub async fn delete_target_role(&self, target_id: &str, role_id: &str) -> Result<()> {
        let response = self
            .request::<()>(
                Method::DELETE,
                &format!("/targets/{target_id}/roles/{role_id}"),
                None,
            )
            .await?;
        Self::handle_empty(response).await
    }

    /// Retrieve all roles assigned to a target.
    pub async fn target_roles(&self, target_id: &str) -> Result<Vec<Role>> {
        let response = self
            .request::<()>(Method::GET, &format!("/targets/{target_id}/roles"), None)
            .await?;
        Self::handle(response).await
    }
}
