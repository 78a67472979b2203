use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use marquee_domain::{BookingOutcome, Seat, SeatGrid};

/// Seat assignments for one showing: one movie in one theater.
///
/// This is deliberately not a whole theater building. Giving every showing
/// its own inventory, with its own seat lock, means bookings against
/// unrelated showings never contend.
#[derive(Debug)]
pub struct ShowingInventory {
    theater: String,
    generation: Uuid,
    registered_at: DateTime<Utc>,
    grid: SeatGrid,
    /// Canonical token → free. Guards the check-and-flip in `book`.
    seats: Mutex<HashMap<String, bool>>,
    /// Mirrors the number of `true` entries in `seats`. Written only while
    /// the seat mutex is held, so reads never see a torn count.
    free_count: AtomicUsize,
}

impl ShowingInventory {
    pub fn new(theater: impl Into<String>, grid: SeatGrid) -> ShowingInventory {
        let seats: HashMap<String, bool> = grid.seats().map(|s| (s.token(), true)).collect();
        ShowingInventory {
            theater: theater.into(),
            generation: Uuid::new_v4(),
            registered_at: Utc::now(),
            grid,
            free_count: AtomicUsize::new(seats.len()),
            seats: Mutex::new(seats),
        }
    }

    pub fn theater(&self) -> &str {
        &self.theater
    }

    /// Identity of this registration. A re-registered showing gets a fresh
    /// inventory with a new generation, which is how stale handles are
    /// detected.
    pub fn generation(&self) -> Uuid {
        self.generation
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn grid(&self) -> SeatGrid {
        self.grid
    }

    /// The subset of `tokens` that do not name a seat of this grid, in
    /// input order. Case-insensitive on the row letter; no state is read
    /// or written.
    pub fn validate_seats(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| self.canonical_seat(t).is_none())
            .cloned()
            .collect()
    }

    /// Attempt to reserve every requested seat, all or nothing.
    ///
    /// Rejections are ordered cheapest first: an over-capacity request is
    /// returned whole as `invalid` (it could never succeed), then any
    /// malformed token short-circuits before availability is looked at.
    /// Only the final check-and-flip runs under the seat lock. When some
    /// seats turn out taken the free/taken partition is returned without
    /// reserving anything, so the caller can retry with the free subset.
    pub fn book(&self, tokens: &[String]) -> BookingOutcome {
        if tokens.is_empty() {
            return BookingOutcome::default();
        }
        if tokens.len() > self.free_capacity() {
            return BookingOutcome::rejected(tokens.to_vec());
        }
        let invalid = self.validate_seats(tokens);
        if !invalid.is_empty() {
            return BookingOutcome {
                invalid,
                ..BookingOutcome::default()
            };
        }

        let mut outcome = BookingOutcome::default();
        let mut seats = self.seats.lock().unwrap_or_else(|e| e.into_inner());
        for token in tokens {
            // Validation above guarantees the canonical key exists.
            let key = token.to_ascii_lowercase();
            if seats.get(&key).copied().unwrap_or(false) {
                outcome.success.push(token.clone());
            } else {
                outcome.taken.push(token.clone());
            }
        }
        if outcome.taken.is_empty() {
            let mut reserved = 0;
            for token in tokens {
                let key = token.to_ascii_lowercase();
                if let Some(free) = seats.get_mut(&key) {
                    if *free {
                        *free = false;
                        reserved += 1;
                    }
                }
            }
            // Counted per flip rather than per token, so a duplicated
            // token in one request cannot drive the count below the
            // number of genuinely free seats.
            self.free_count.fetch_sub(reserved, Ordering::Relaxed);
        }
        outcome
    }

    /// Current number of free seats. Safe to call while another thread is
    /// booking; the result is a snapshot.
    pub fn free_capacity(&self) -> usize {
        self.free_count.load(Ordering::Relaxed)
    }

    /// Snapshot of the currently free seat tokens, in no particular order.
    pub fn free_seats(&self) -> Vec<String> {
        let seats = self.seats.lock().unwrap_or_else(|e| e.into_inner());
        seats
            .iter()
            .filter(|(_, &free)| free)
            .map(|(token, _)| token.clone())
            .collect()
    }

    /// Reset every seat to free.
    pub fn clear_seats(&self) {
        let mut seats = self.seats.lock().unwrap_or_else(|e| e.into_inner());
        for free in seats.values_mut() {
            *free = true;
        }
        self.free_count.store(seats.len(), Ordering::Relaxed);
    }

    fn canonical_seat(&self, token: &str) -> Option<Seat> {
        Seat::parse(token).filter(|seat| self.grid.contains(seat))
    }
}
