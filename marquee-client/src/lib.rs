pub mod input;
pub mod session;

pub use input::sanitize_booking_input;
pub use session::{BookingSession, SessionBooking, ShowStatus, TheaterAvailability};
