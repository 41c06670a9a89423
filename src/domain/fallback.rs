// Static record set served when live data is unavailable
use super::inventory::{EntityKind, InventoryRecord, Status};
use chrono::{DateTime, SecondsFormat, Utc};

const FALLBACK_ROWS: [(EntityKind, &str, u64, Status); 9] = [
    (EntityKind::Supplier, "Mumbai Manufacturing Hub", 2450, Status::Normal),
    (EntityKind::Supplier, "Chennai Auto Parts", 180, Status::Alert),
    (EntityKind::Warehouse, "Delhi Distribution Center", 8750, Status::Normal),
    (EntityKind::Warehouse, "Bangalore Tech Hub", 1200, Status::Normal),
    (EntityKind::Warehouse, "Pune Logistics Center", 450, Status::Alert),
    (EntityKind::Store, "Kolkata Retail Outlet", 320, Status::Normal),
    (EntityKind::Store, "Hyderabad Mega Store", 25, Status::Alert),
    (EntityKind::Store, "Ahmedabad Branch", 890, Status::Normal),
    (EntityKind::Store, "Jaipur Showroom", 156, Status::Normal),
];

/// Build the fallback record set, every row stamped with `now`.
pub fn fallback_records(now: DateTime<Utc>) -> Vec<InventoryRecord> {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    FALLBACK_ROWS
        .iter()
        .map(|(entity, location, level, status)| {
            InventoryRecord::new(*entity, *location, *level, *status, timestamp.clone())
        })
        .collect()
}
