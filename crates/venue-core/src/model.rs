use crate::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// GuestEntry
// ---------------------------------------------------------------------------

/// One invited person on a guest list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestEntry {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub checked_in: bool,
}

// ---------------------------------------------------------------------------
// GuestList
// ---------------------------------------------------------------------------

/// A guest list as seen from its owner: the person who created it counts as
/// one extra guest and is never part of the list's guest array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestList {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub owner_checked_in: bool,
}

// ---------------------------------------------------------------------------
// Reservation
// ---------------------------------------------------------------------------

/// A table reservation. Restaurant-domain reservations may point at a guest
/// list; without one the reservation itself is a single guest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub guest_list_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub checked_in: bool,
}

impl Reservation {
    pub fn is_unlisted(&self) -> bool {
        self.guest_list_id.is_none()
    }
}

// ---------------------------------------------------------------------------
// CheckInStatus
// ---------------------------------------------------------------------------

/// Precomputed per-list aggregate kept by the remote API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInStatus {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_guests: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub guests_checked_in: u64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub owner_checked_in: bool,
}

// ---------------------------------------------------------------------------
// Promoter / lounge entries
// ---------------------------------------------------------------------------

/// A name submitted on a promoter's list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoterEntry {
    #[serde(default)]
    pub name: String,
    /// Status vocabulary from the source system, e.g. `"Check-in"`.
    #[serde(default)]
    pub status: String,
}

/// A lounge or box allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoungeEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub capacity: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub checked_in_count: u64,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Everything known about one venue's table-reservation domain at a point in
/// time. The three guest sources overlap; see `reconcile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationSnapshot {
    #[serde(default)]
    pub table_reservations: Vec<Reservation>,
    #[serde(default)]
    pub restaurant_reservations: Vec<Reservation>,
    #[serde(default)]
    pub guest_lists: Vec<GuestList>,
    /// Explicit flat array of restaurant-domain guests.
    #[serde(default)]
    pub restaurant_guests: Vec<GuestEntry>,
    /// Guests loaded per guest list id.
    #[serde(default)]
    pub loaded_guests: BTreeMap<i64, Vec<GuestEntry>>,
    /// Cached aggregates per guest list id.
    #[serde(default)]
    pub status_cache: BTreeMap<i64, CheckInStatus>,
}

impl ReservationSnapshot {
    /// An owner counts as arrived if either the live cache or the list record
    /// says so.
    pub fn owner_checked_in(&self, list: &GuestList) -> bool {
        list.owner_checked_in
            || self
                .status_cache
                .get(&list.id)
                .is_some_and(|s| s.owner_checked_in)
    }

    pub fn unlisted_reservations(&self) -> impl Iterator<Item = &Reservation> {
        self.restaurant_reservations
            .iter()
            .filter(|r| r.is_unlisted())
    }
}

/// Raw collections for all three attendance domains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceSnapshot {
    #[serde(default)]
    pub reservations: ReservationSnapshot,
    #[serde(default)]
    pub promoter_entries: Vec<PromoterEntry>,
    #[serde(default)]
    pub lounge_entries: Vec<LoungeEntry>,
}
