pub mod booking;
pub mod seat;

pub use booking::{BookingOutcome, RemovalOutcome};
pub use seat::{GridError, Seat, SeatGrid};
