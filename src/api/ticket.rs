use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store;

pub use crate::store::ticket::{Id, NewTicket, Status};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Id,
    pub title: String,
    pub short_description: String,
    pub full_details: String,
    pub location: String,
    pub vehicle_plate: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub amount: f64,
    pub status: Status,
    pub available_transitions: Vec<Status>,
}

impl From<store::Ticket> for Ticket {
    fn from(ticket: store::Ticket) -> Self {
        Self {
            available_transitions: ticket.status.transitions().to_vec(),
            id: ticket.id,
            title: ticket.title,
            short_description: ticket.short_description,
            full_details: ticket.full_details,
            location: ticket.location,
            vehicle_plate: ticket.vehicle_plate,
            date: ticket.date,
            amount: ticket.amount,
            status: ticket.status,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub tickets: Vec<Ticket>,
    pub total_count: usize,
}

impl List {
    /// Builds a listing of the tickets matching `search`, keeping the store
    /// order. `total_count` reflects the whole collection.
    pub fn filtered(tickets: Vec<store::Ticket>, search: Option<&str>) -> Self {
        let total_count = tickets.len();
        let tickets = tickets
            .into_iter()
            .filter(|t| search.map_or(true, |term| t.matches(term)))
            .map(Ticket::from)
            .collect();
        Self {
            tickets,
            total_count,
        }
    }
}
