use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use marquee_catalog::{ShowingDirectory, ShowingHandle, ShowingInventory};
use marquee_domain::BookingOutcome;

use crate::input::sanitize_booking_input;

/// A theater currently showing the selected movie, with seats left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TheaterAvailability {
    pub theater: String,
    pub free_capacity: usize,
}

/// Whether the theater the caller addressed was still reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShowStatus {
    Ok,
    /// The theater was never listed for the selected movie.
    NotFound,
    /// The showing was removed or replaced since it was listed.
    Cancelled,
}

/// Result of a session booking: the lookup status plus the seat partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionBooking {
    pub status: ShowStatus,
    pub booking: BookingOutcome,
}

enum ShowLookup {
    Ok(Arc<ShowingInventory>),
    NotFound,
    Cancelled,
}

/// One caller's view of the directory: pick a movie, see which theaters
/// still have seats, then inspect or book seats there.
///
/// The session caches the handles issued by the last
/// [`theaters_for_movie`](BookingSession::theaters_for_movie) call and
/// revalidates them through the directory on every use, so a showing
/// removed in the meantime surfaces as [`ShowStatus::Cancelled`] rather
/// than as a booking against a vanished seat map.
pub struct BookingSession {
    directory: Arc<ShowingDirectory>,
    current: HashMap<String, ShowingHandle>,
}

impl BookingSession {
    pub fn new(directory: Arc<ShowingDirectory>) -> BookingSession {
        BookingSession {
            directory,
            current: HashMap::new(),
        }
    }

    /// Titles currently playing anywhere.
    pub fn available_movies(&self) -> Vec<String> {
        self.directory.list_movies()
    }

    /// Theaters showing `title` that still have free seats. Replaces the
    /// session's cached handles; theaters listed here can then be
    /// addressed by name in the other calls.
    pub fn theaters_for_movie(&mut self, title: &str) -> Vec<TheaterAvailability> {
        self.current.clear();
        let mut available = Vec::new();
        for handle in self.directory.showings_for_movie(title) {
            let free_capacity = handle.inventory.free_capacity();
            if free_capacity > 0 {
                available.push(TheaterAvailability {
                    theater: handle.theater.clone(),
                    free_capacity,
                });
                self.current.insert(handle.theater.clone(), handle);
            }
        }
        available
    }

    /// Free seats of `theater`'s showing, sorted for presentation. Empty
    /// when the theater was not listed or its showing has been cancelled.
    pub fn free_seats_in(&mut self, theater: &str) -> Vec<String> {
        match self.lookup(theater) {
            ShowLookup::Ok(inventory) => {
                let mut seats = inventory.free_seats();
                seats.sort();
                seats
            }
            ShowLookup::NotFound | ShowLookup::Cancelled => Vec::new(),
        }
    }

    /// Book seats from a raw user string against `theater`'s showing of
    /// the selected movie. When the showing is gone the sanitized input is
    /// echoed back as `invalid` alongside the non-`Ok` status.
    pub fn book(&mut self, theater: &str, raw_seats: &str) -> SessionBooking {
        let input = sanitize_booking_input(raw_seats);
        match self.lookup(theater) {
            ShowLookup::Ok(inventory) => SessionBooking {
                status: ShowStatus::Ok,
                booking: inventory.book(&input),
            },
            ShowLookup::NotFound => SessionBooking {
                status: ShowStatus::NotFound,
                booking: BookingOutcome::rejected(input),
            },
            ShowLookup::Cancelled => SessionBooking {
                status: ShowStatus::Cancelled,
                booking: BookingOutcome::rejected(input),
            },
        }
    }

    fn lookup(&mut self, theater: &str) -> ShowLookup {
        let Some(handle) = self.current.get(theater) else {
            return ShowLookup::NotFound;
        };
        match self.directory.revalidate(handle) {
            Some(inventory) => ShowLookup::Ok(inventory),
            None => {
                self.current.remove(theater);
                debug!(theater, "showing cancelled since it was listed");
                ShowLookup::Cancelled
            }
        }
    }
}
