pub mod ticket;

pub use self::ticket::Ticket;
