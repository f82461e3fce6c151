use super::queue_id::{ConductionPayload, EntityType, QueueKey, QueueRef};
use crate::model::ReservationSnapshot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the live escort queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: String,
    pub entity_type: EntityType,
    pub entity_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i64>,
    pub label: String,
    /// Arrived at the door.
    pub checked_in: bool,
    /// Already walked to the table.
    pub conduced: bool,
}

impl QueueItem {
    fn new(
        key: QueueKey,
        reservation_id: Option<i64>,
        label: &str,
        checked_in: bool,
        confirmed: &BTreeSet<String>,
    ) -> Self {
        let id = key.to_string();
        let r = QueueRef::from(key).with_explicit(None, reservation_id);
        Self {
            conduced: confirmed.contains(&id),
            id,
            entity_type: r.entity_type,
            entity_id: r.entity_id,
            guest_list_id: r.guest_list_id,
            reservation_id: r.reservation_id,
            label: label.to_string(),
            checked_in,
        }
    }

    pub fn payload(&self, establishment_id: i64, flow_date: NaiveDate) -> ConductionPayload {
        ConductionPayload {
            establishment_id,
            flow_date,
            queue_item_id: self.id.clone(),
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            guest_list_id: self.guest_list_id,
            reservation_id: self.reservation_id,
        }
    }
}

/// Build the escort queue for a reservation snapshot.
///
/// Each guest list yields its owner followed by its loaded guests; restaurant
/// reservations without a guest list yield one reservation-owner item. An
/// owner item carries the id of the restaurant reservation that references
/// its list, when there is one.
pub fn build_queue(snap: &ReservationSnapshot, confirmed: &BTreeSet<String>) -> Vec<QueueItem> {
    let mut items = Vec::new();

    for list in &snap.guest_lists {
        let reservation_id = snap
            .restaurant_reservations
            .iter()
            .find(|r| r.guest_list_id == Some(list.id))
            .map(|r| r.id);
        items.push(QueueItem::new(
            QueueKey::Owner {
                guest_list_id: list.id,
            },
            reservation_id,
            &list.owner_name,
            snap.owner_checked_in(list),
            confirmed,
        ));

        for guest in snap.loaded_guests.get(&list.id).into_iter().flatten() {
            items.push(QueueItem::new(
                QueueKey::Guest {
                    guest_list_id: list.id,
                    guest_id: guest.id,
                },
                None,
                &guest.name,
                guest.checked_in,
                confirmed,
            ));
        }
    }

    for reservation in snap.unlisted_reservations() {
        items.push(QueueItem::new(
            QueueKey::Reservation {
                reservation_id: reservation.id,
            },
            None,
            &reservation.name,
            reservation.checked_in,
            confirmed,
        ));
    }

    items
}

/// Items that have arrived but have not been conduced yet.
pub fn pending(items: &[QueueItem]) -> impl Iterator<Item = &QueueItem> {
    items.iter().filter(|i| i.checked_in && !i.conduced)
}
