//! Ticket endpoints
//!
//! Tickets are short-lived access grants for a user/target pair. The API
//! returns the one-time secret only at creation; there is no fetch-by-ID
//! endpoint.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::error::Result;

/// A Warpgate ticket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_left: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Request payload for creating a ticket
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketCreateRequest {
    pub username: String,
    pub target_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_uses: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A ticket together with its one-time secret
#[derive(Debug, Clone, Deserialize)]
pub struct TicketAndSecret {
    pub ticket: Ticket,
    pub secret: String,
}

impl Client {
    /// Create a new ticket. The secret is only returned here.
    pub async fn create_ticket(&self, req: &TicketCreateRequest) -> Result<TicketAndSecret> {
        let response = self.request(Method::POST, "/tickets", Some(req)).await?;
        Self::handle(response).await
    }

    /// Delete a ticket by ID.
    pub async fn delete_ticket(&self, id: &str) -> Result<()> {
        let response = self
            .request::<()>(Method::DELETE, &format!("/tickets/{id}"), None)
            .await?;
        Self::handle_empty(response).await
    }
}
