//! # Entry Phase
//!
//! Read-only classification of where a name sits in its auction lifecycle.
//! The registrar alone holds the authoritative status; this view is
//! re-evaluated from `(status, deadline, now, name length)` on every query.
//!
//! ```text
//!              deadline - 24h          deadline           deadline + 24h
//!   Auction  ────────────┼── Reveal ──────┼── Finalize ─────────┼── FinalizeOpen
//!                     (inclusive)    (now == deadline)     (inclusive)
//! ```

use super::entities::EntryStatus;
use super::value_objects::Timestamp;
use serde::{Deserialize, Serialize};

/// Width of the reveal window before, and the finalize window after, the
/// registration deadline.
pub const PHASE_WINDOW_SECS: u64 = 24 * 60 * 60;

/// Derived auction phase of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Too short to register and never auctioned.
    Invalid,
    /// Too short but auctioned anyway; any third party may invalidate it.
    CanInvalidate,
    /// Available; an auction can be started.
    OpenForAuction,
    /// Sealed bids are accepted.
    Auction,
    /// Last day before the deadline; bids must be revealed.
    Reveal,
    /// Deadline passed within the last day; ready to finalize.
    Finalize,
    /// Finalization overdue; a new auction could also be opened.
    FinalizeOpen,
    /// Auction finalized, name held by a deed.
    Owned,
}

impl Phase {
    /// True while new sealed bids are accepted.
    #[must_use]
    pub fn is_bidding_window(self) -> bool {
        self == Self::Auction
    }

    /// True while sealed bids may be revealed.
    #[must_use]
    pub fn accepts_reveal(self) -> bool {
        self == Self::Reveal
    }

    /// True once the auction can be finalized.
    #[must_use]
    pub fn can_finalize(self) -> bool {
        matches!(self, Self::Finalize | Self::FinalizeOpen)
    }
}

/// Classifies an entry.
///
/// Precedence: name length, then status, then the time split for `Bidding`.
/// `now == deadline` counts as past the deadline (`Finalize`).
#[must_use]
pub fn entry_phase(
    status: EntryStatus,
    registration_deadline: Timestamp,
    now: Timestamp,
    name_length: usize,
    min_name_length: usize,
) -> Phase {
    if name_length < min_name_length {
        return if status == EntryStatus::Open {
            Phase::Invalid
        } else {
            Phase::CanInvalidate
        };
    }

    match status {
        EntryStatus::Open => Phase::OpenForAuction,
        EntryStatus::Bidding => bidding_phase(registration_deadline, now),
        EntryStatus::Owned => Phase::Owned,
    }
}

fn bidding_phase(deadline: Timestamp, now: Timestamp) -> Phase {
    if now < deadline {
        if deadline - now > PHASE_WINDOW_SECS {
            Phase::Auction
        } else {
            Phase::Reveal
        }
    } else if now - deadline <= PHASE_WINDOW_SECS {
        Phase::Finalize
    } else {
        Phase::FinalizeOpen
    }
}
