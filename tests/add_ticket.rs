pub mod common;

use reqwest::StatusCode;
use valet_desk::{api::ticket::Status, store::ticket::DEFAULT_FINE};

#[tokio::test]
async fn creates_valid_ticket() {
    let client = common::Client::spawn().await;

    let ticket = client
        .add_ticket(&common::Client::new_ticket(
            "Double Parking",
            "Lot 5",
            "ABC-1234",
        ))
        .await
        .unwrap();
    assert_eq!(ticket.title, "Double Parking");
    assert_eq!(ticket.location, "Lot 5");
    assert_eq!(ticket.vehicle_plate, "ABC-1234");
    assert_eq!(ticket.short_description, "");
    assert_eq!(ticket.full_details, "");
    assert_eq!(ticket.amount, DEFAULT_FINE);
    assert_eq!(ticket.status, Status::Pending);
    assert!(!["1", "2", "3"].contains(&ticket.id.as_str()));

    let list = client.get_tickets(None).await.unwrap();
    assert_eq!(list.tickets[0].id, ticket.id);
}

#[tokio::test]
async fn cant_create_without_title() {
    let client = common::Client::spawn().await;

    let status = client
        .add_ticket(&common::Client::new_ticket("", "Lot 5", "ABC-1234"))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cant_create_without_location() {
    let client = common::Client::spawn().await;

    let status = client
        .add_ticket(&common::Client::new_ticket("Title", "", "ABC-1234"))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cant_create_without_plate() {
    let client = common::Client::spawn().await;

    let status = client
        .add_ticket(&common::Client::new_ticket("Title", "Lot 5", ""))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let list = client.get_tickets(None).await.unwrap();
    assert_eq!(list.total_count, 3);
}
