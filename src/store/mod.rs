//! Ticket collection persisted as a single JSON blob in a [`Medium`].
//!
//! Every operation reads the whole collection, applies its query or mutation
//! and, when mutating, writes the whole collection back. A [`Store`]
//! serializes its own operations, but two stores sharing one medium (for
//! example two processes pointed at the same directory) are not coordinated:
//! the last write wins.

pub mod medium;
pub mod ticket;

use std::{io, sync::Arc, time::Duration};

use derive_more::{Display, From};
use itertools::Itertools as _;
use tokio::sync::Mutex;

use crate::config;

pub use self::{
    medium::Medium,
    ticket::{Id, NewTicket, Status, Ticket, ValidationError},
};

/// Key the collection is stored under unless configured otherwise.
pub const STORAGE_KEY: &str = "valetdesk_tickets";

/// Opens a store over the medium described by `config`.
pub fn open(config: config::Storage, latency: config::Latency) -> Store {
    let medium: Arc<dyn Medium> = match config.medium {
        config::Medium::Memory => Arc::new(medium::Memory::new()),
        config::Medium::File { dir } => Arc::new(medium::File::new(dir)),
    };
    Store {
        medium,
        key: config.key,
        latency,
        lock: Mutex::new(()),
    }
}

pub struct Store {
    medium: Arc<dyn Medium>,

    key: String,

    latency: config::Latency,

    lock: Mutex<()>,
}

impl Store {
    /// Creates a store over `medium` using [`STORAGE_KEY`] and no latency.
    pub fn new(medium: impl Medium + 'static) -> Self {
        Self {
            medium: Arc::new(medium),
            key: STORAGE_KEY.to_owned(),
            latency: config::Latency::default(),
            lock: Mutex::new(()),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_latency(mut self, latency: config::Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Returns all tickets, most recently issued first.
    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, Error> {
        simulate(self.latency.list).await;
        let _guard = self.lock.lock().await;

        Ok(self.load().await?)
    }

    /// Returns the ticket with the provided `id`, if any.
    pub async fn get_ticket(&self, id: &Id) -> Result<Option<Ticket>, Error> {
        simulate(self.latency.get).await;
        let _guard = self.lock.lock().await;

        Ok(self.load().await?.into_iter().find(|t| t.id == *id))
    }

    /// Issues a new pending ticket and places it at the head of the
    /// collection.
    pub async fn create_ticket(&self, input: NewTicket) -> Result<Ticket, Error> {
        simulate(self.latency.create).await;
        input.validate()?;
        let _guard = self.lock.lock().await;

        let mut tickets = self.load().await?;
        let mut ticket = Ticket::issue(input);
        while tickets.iter().any(|t| t.id == ticket.id) {
            ticket.id = Id::new();
        }
        tickets.insert(0, ticket.clone());
        self.save(&tickets).await?;

        tracing::debug!(id = %ticket.id, "issued ticket");
        Ok(ticket)
    }

    /// Overwrites the status of the ticket with the provided `id`.
    ///
    /// Any status is accepted regardless of the current one.
    pub async fn update_status(
        &self,
        id: &Id,
        status: Status,
    ) -> Result<Ticket, Error> {
        simulate(self.latency.update_status).await;
        let _guard = self.lock.lock().await;

        let mut tickets = self.load().await?;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let previous = ticket.status;
        ticket.status = status;
        let ticket = ticket.clone();
        self.save(&tickets).await?;

        tracing::debug!(%id, %previous, %status, "updated ticket status");
        Ok(ticket)
    }

    async fn load(&self) -> Result<Vec<Ticket>, StorageError> {
        let Some(raw) = self.medium.get(&self.key).await? else {
            tracing::info!(key = %self.key, "seeding empty store");
            let tickets = ticket::bootstrap();
            self.save(&tickets).await?;
            return Ok(tickets);
        };

        let tickets = serde_json::from_str::<Vec<Ticket>>(&raw)
            .map_err(StorageError::Encoding)?;
        if let Some(id) = tickets.iter().map(|t| &t.id).duplicates().next() {
            return Err(StorageError::DuplicateId(id.clone()));
        }
        Ok(tickets)
    }

    async fn save(&self, tickets: &[Ticket]) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(tickets).map_err(StorageError::Encoding)?;
        self.medium.set(&self.key, raw).await?;
        Ok(())
    }
}

async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[derive(Debug, Display, From)]
pub enum Error {
    #[display("ticket `{_0}` not found")]
    NotFound(Id),

    #[from]
    #[display("invalid ticket: {_0}")]
    Validation(ValidationError),

    #[from]
    #[display("storage failure: {_0}")]
    Storage(StorageError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(e) => Some(e),
            Self::Storage(e) => Some(e),
        }
    }
}

/// Failure of the backing medium or of the payload it holds.
#[derive(Debug, Display, From)]
pub enum StorageError {
    #[from]
    #[display("medium I/O failed: {_0}")]
    Io(io::Error),

    #[display("malformed ticket collection: {_0}")]
    Encoding(serde_json::Error),

    #[display("ticket id `{_0}` occurs more than once")]
    DuplicateId(Id),
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encoding(e) => Some(e),
            Self::DuplicateId(_) => None,
        }
    }
}
