//! JSON endpoints exposing the ticket store.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use derive_more::From;
use serde::Deserialize;

use crate::{api, store};

pub fn router(store: store::Store) -> Router {
    Router::new()
        .route("/ticket", get(list_tickets).post(add_ticket))
        .route("/ticket/:id", get(get_ticket).patch(edit_ticket))
        .with_state(Arc::new(AppState { store }))
}

type SharedAppState = Arc<AppState>;

struct AppState {
    store: store::Store,
}

#[derive(Deserialize)]
struct ListTicketsInput {
    search: Option<String>,
}

async fn list_tickets(
    State(state): State<SharedAppState>,
    Query(ListTicketsInput { search }): Query<ListTicketsInput>,
) -> Result<Json<api::ticket::List>, ListTicketsError> {
    let tickets = state.store.list_tickets().await?;

    Ok(Json(api::ticket::List::filtered(tickets, search.as_deref())))
}

#[derive(Debug, From)]
pub enum ListTicketsError {
    #[from]
    StoreError(store::Error),
}

impl IntoResponse for ListTicketsError {
    fn into_response(self) -> Response {
        match self {
            Self::StoreError(e) => {
                tracing::error!(error = %e, "failed to list tickets");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
        .into_response()
    }
}

async fn add_ticket(
    State(state): State<SharedAppState>,
    Json(input): Json<api::ticket::NewTicket>,
) -> Result<Json<api::Ticket>, AddTicketError> {
    let ticket = state.store.create_ticket(input).await?;

    Ok(Json(ticket.into()))
}

#[derive(Debug, From)]
pub enum AddTicketError {
    #[from]
    StoreError(store::Error),
}

impl IntoResponse for AddTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::StoreError(store::Error::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            Self::StoreError(e) => {
                tracing::error!(error = %e, "failed to add ticket");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

async fn get_ticket(
    State(state): State<SharedAppState>,
    Path(id): Path<api::ticket::Id>,
) -> Result<Json<api::Ticket>, GetTicketError> {
    use GetTicketError as E;

    let ticket = state
        .store
        .get_ticket(&id)
        .await?
        .ok_or(E::TicketNotFound)?;

    Ok(Json(ticket.into()))
}

#[derive(Debug, From)]
pub enum GetTicketError {
    #[from]
    StoreError(store::Error),
    TicketNotFound,
}

impl IntoResponse for GetTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::TicketNotFound => StatusCode::NOT_FOUND,
            Self::StoreError(e) => {
                tracing::error!(error = %e, "failed to get ticket");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
        .into_response()
    }
}

#[derive(Deserialize)]
#[serde(content = "data", rename_all = "camelCase", tag = "op")]
enum EditTicketInput {
    Resolve,
    Cancel,
    Reopen,
    SetStatus { status: api::ticket::Status },
}

async fn edit_ticket(
    State(state): State<SharedAppState>,
    Path(id): Path<api::ticket::Id>,
    Json(op): Json<EditTicketInput>,
) -> Result<Json<api::Ticket>, EditTicketError> {
    use api::ticket::Status;
    use EditTicketInput as Op;

    let status = match op {
        Op::Resolve => Status::Resolved,
        Op::Cancel => Status::Cancelled,
        Op::Reopen => Status::Pending,
        Op::SetStatus { status } => status,
    };
    let ticket = state.store.update_status(&id, status).await?;

    Ok(Json(ticket.into()))
}

#[derive(Debug, From)]
pub enum EditTicketError {
    #[from]
    StoreError(store::Error),
}

impl IntoResponse for EditTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::StoreError(store::Error::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::StoreError(e) => {
                tracing::error!(error = %e, "failed to edit ticket");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
        .into_response()
    }
}
