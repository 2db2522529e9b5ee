//! Ticket resource
//!
//! Tickets are immutable once issued: every attribute change means a new
//! ticket, so there is no update operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::tickets::TicketCreateRequest;
use crate::client::Client;
use crate::error::Result;

/// A managed access ticket for a user/target pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketResource {
    /// Server-assigned identifier; `None` until created.
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    pub target_name: String,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub number_of_uses: Option<u64>,
    #[serde(default)]
    pub description: String,
    /// One-time secret, only available at creation (server-computed).
    #[serde(default)]
    pub secret: Option<String>,
}

impl TicketResource {
    /// Create the ticket and capture its one-time secret.
    pub async fn create(&mut self, client: &Client) -> Result<()> {
        let created = client
            .create_ticket(&TicketCreateRequest {
                username: self.username.clone(),
                target_name: self.target_name.clone(),
                expiry: self.expiry,
                number_of_uses: self.number_of_uses,
                description: self.description.clone(),
            })
            .await?;

        self.id = Some(created.ticket.id);
        self.secret = Some(created.secret);
        Ok(())
    }

    /// No-op: the API has no fetch-by-ID endpoint for tickets, so state is
    /// never refreshed and external changes (expiry, exhausted uses) go
    /// undetected until the next create or delete.
    pub async fn read(&mut self, _client: &Client) -> Result<()> {
        Ok(())
    }

    /// Revoke the ticket and clear the identifier.
    pub async fn delete(&mut self, client: &Client) -> Result<()> {
        if let Some(id) = self.id.take() {
            client.delete_ticket(&id).await?;
        }
        self.secret = None;
        Ok(())
    }
}
