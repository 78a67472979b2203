use serde::{Deserialize, Serialize};

/// The three-way partition a booking attempt returns.
///
/// Malformed tokens, over-capacity requests and already-taken seats are all
/// ordinary outcomes reported here; a booking never fails with an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOutcome {
    /// Seats that were (or could have been) reserved by this request.
    pub success: Vec<String>,
    /// Seats that were already occupied. Non-empty `taken` means nothing
    /// was reserved; the caller may retry with the `success` subset.
    pub taken: Vec<String>,
    /// Tokens that failed validation, or the whole request when it exceeds
    /// the remaining capacity.
    pub invalid: Vec<String>,
}

impl BookingOutcome {
    /// The whole request rejected as invalid, with nothing checked.
    pub fn rejected(tokens: Vec<String>) -> BookingOutcome {
        BookingOutcome {
            invalid: tokens,
            ..BookingOutcome::default()
        }
    }

    /// True when every requested seat was reserved.
    pub fn is_confirmed(&self) -> bool {
        self.taken.is_empty() && self.invalid.is_empty()
    }
}

/// Outcome of removing a showing from the directory. Callers must handle
/// all four cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[must_use]
pub enum RemovalOutcome {
    Successful,
    MovieNotFound,
    /// The movie was in the catalog with no showings at all. The directory
    /// repairs this by dropping the dangling catalog entry.
    NoTheaterForMovie,
    TheaterNotShowingMovie,
}
