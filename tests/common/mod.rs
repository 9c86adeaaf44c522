use reqwest::StatusCode;
use serde_json::json;
use valet_desk::{api, http, store};

pub struct Client {
    inner: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Serves a fresh in-memory store on an ephemeral port and returns a
    /// client talking to it.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind a listener");
        let addr = listener.local_addr().expect("failed to get an address");
        let app = http::router(store::Store::new(store::medium::Memory::new()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server failed");
        });

        Self {
            inner: reqwest::Client::new(),
            base_url: format!("http://{addr}/ticket"),
        }
    }

    pub fn new_ticket(
        title: &str,
        location: &str,
        vehicle_plate: &str,
    ) -> api::ticket::NewTicket {
        api::ticket::NewTicket {
            title: title.into(),
            short_description: String::new(),
            location: location.into(),
            vehicle_plate: vehicle_plate.into(),
            full_details: String::new(),
        }
    }

    pub async fn get_tickets(
        &self,
        search: Option<&str>,
    ) -> Result<api::ticket::List, StatusCode> {
        let url = match search {
            Some(term) => format!("{}?search={term}", self.base_url),
            None => self.base_url.clone(),
        };

        Ok(self
            .inner
            .get(url)
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .json::<api::ticket::List>()
            .await
            .expect("failed to get a response"))
    }

    pub async fn add_ticket(
        &self,
        input: &api::ticket::NewTicket,
    ) -> Result<api::Ticket, StatusCode> {
        Ok(self
            .inner
            .post(&self.base_url)
            .json(input)
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .json::<api::Ticket>()
            .await
            .expect("failed to get a response"))
    }

    pub async fn get_ticket(
        &self,
        id: &api::ticket::Id,
    ) -> Result<api::Ticket, StatusCode> {
        Ok(self
            .inner
            .get(format!("{}/{id}", self.base_url))
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .json::<api::Ticket>()
            .await
            .expect("failed to get a response"))
    }

    pub async fn resolve_ticket(
        &self,
        id: &api::ticket::Id,
    ) -> Result<api::Ticket, StatusCode> {
        self.edit_ticket(id, json!({ "op": "resolve" })).await
    }

    pub async fn cancel_ticket(
        &self,
        id: &api::ticket::Id,
    ) -> Result<api::Ticket, StatusCode> {
        self.edit_ticket(id, json!({ "op": "cancel" })).await
    }

    pub async fn reopen_ticket(
        &self,
        id: &api::ticket::Id,
    ) -> Result<api::Ticket, StatusCode> {
        self.edit_ticket(id, json!({ "op": "reopen" })).await
    }

    pub async fn set_ticket_status(
        &self,
        id: &api::ticket::Id,
        status: api::ticket::Status,
    ) -> Result<api::Ticket, StatusCode> {
        self.edit_ticket(
            id,
            json!({
                "op": "setStatus",
                "data": {
                    "status": status,
                }
            }),
        )
        .await
    }

    async fn edit_ticket(
        &self,
        id: &api::ticket::Id,
        body: serde_json::Value,
    ) -> Result<api::Ticket, StatusCode> {
        Ok(self
            .inner
            .patch(format!("{}/{id}", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .json::<api::Ticket>()
            .await
            .expect("failed to get a response"))
    }
}
