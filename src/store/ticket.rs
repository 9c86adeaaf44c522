use derive_more::Display;
use serde::{Deserialize, Serialize};
use time::{macros::datetime, OffsetDateTime};
use uuid::Uuid;

/// Fine assigned to every newly issued ticket.
pub const DEFAULT_FINE: f64 = 45.00;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub full_details: String,
    pub location: String,
    pub vehicle_plate: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub amount: f64,
    pub status: Status,
}

impl Ticket {
    /// Issues a new ticket from the provided input.
    ///
    /// The caller is expected to have validated the input already.
    pub(crate) fn issue(input: NewTicket) -> Self {
        Self {
            id: Id::new(),
            title: input.title,
            short_description: input.short_description,
            full_details: input.full_details,
            location: input.location,
            vehicle_plate: input.vehicle_plate,
            date: OffsetDateTime::now_utc(),
            amount: DEFAULT_FINE,
            status: Status::INITIAL,
        }
    }

    /// Checks whether the title or the vehicle plate contains `term`,
    /// ignoring case. An empty `term` matches any ticket.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.vehicle_plate.to_lowercase().contains(&term)
    }
}

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Ticket is issued and awaits payment or dismissal.
    #[display("PENDING")]
    Pending,

    /// Fine is paid or the case is otherwise settled.
    #[display("RESOLVED")]
    Resolved,

    /// Ticket is voided.
    #[display("CANCELLED")]
    Cancelled,
}

impl Status {
    /// Status every ticket is issued with.
    pub const INITIAL: Self = Self::Pending;

    pub const ALL: [Self; 3] = [Self::Pending, Self::Resolved, Self::Cancelled];

    /// Operator actions offered from this status.
    ///
    /// Neither `Resolved` nor `Cancelled` is a dead end: both can be reopened
    /// back to `Pending`. The store itself does not consult this table, any
    /// status may be written over any other.
    pub fn transitions(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Resolved, Self::Cancelled],
            Self::Resolved | Self::Cancelled => &[Self::Pending],
        }
    }
}

/// Input for issuing a new ticket.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    pub location: String,
    pub vehicle_plate: String,
    #[serde(default)]
    pub full_details: String,
}

impl NewTicket {
    /// Rejects input with an empty required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        use ValidationError as E;

        if self.title.is_empty() {
            return Err(E::EmptyTitle);
        }
        if self.location.is_empty() {
            return Err(E::EmptyLocation);
        }
        if self.vehicle_plate.is_empty() {
            return Err(E::EmptyVehiclePlate);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ValidationError {
    #[display("title must not be empty")]
    EmptyTitle,
    #[display("location must not be empty")]
    EmptyLocation,
    #[display("vehicle plate must not be empty")]
    EmptyVehiclePlate,
}

impl std::error::Error for ValidationError {}

/// Example tickets an empty store is seeded with.
pub fn bootstrap() -> Vec<Ticket> {
    vec![
        Ticket {
            id: Id::from("1"),
            title: "Illegal Parking - Zone A".into(),
            short_description: "Vehicle parked in a no-parking emergency \
                                zone."
                .into(),
            full_details: "On 2023-10-25, vehicle was found idling in the \
                           emergency fire hydrant access area of Zone A. No \
                           driver was present at the time of discovery."
                .into(),
            location: "Main St Entrance, Zone A".into(),
            vehicle_plate: "ABC-1234".into(),
            date: datetime!(2023-10-25 14:30:00 UTC),
            amount: 50.00,
            status: Status::Pending,
        },
        Ticket {
            id: Id::from("2"),
            title: "Overtime Parking".into(),
            short_description: "Meter expired for more than 30 minutes."
                .into(),
            full_details: "Parking meter at spot #42 had expired at 11:00 \
                           AM. Observation period of 30 minutes granted, \
                           after which a ticket was issued at 11:35 AM."
                .into(),
            location: "Market Square, Spot #42".into(),
            vehicle_plate: "XYZ-9876".into(),
            date: datetime!(2023-10-24 11:35:00 UTC),
            amount: 25.00,
            status: Status::Resolved,
        },
        Ticket {
            id: Id::from("3"),
            title: "Obstruction of Driveway".into(),
            short_description: "Blocked resident access for over 2 hours."
                .into(),
            full_details: "Resident reported inability to exit their \
                           driveway. Vehicle was towed after 2 hours of \
                           obstruction and failure to contact the owner."
                .into(),
            location: "Oak Avenue, 452".into(),
            vehicle_plate: "LMN-5544".into(),
            date: datetime!(2023-10-23 09:15:00 UTC),
            amount: 150.00,
            status: Status::Pending,
        },
    ]
}
