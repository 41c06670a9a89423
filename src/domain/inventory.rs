// Inventory domain model
use serde::{Deserialize, Serialize};

/// Kind of node in the supply chain. Anything unrecognised collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Supplier,
    Warehouse,
    Store,
    #[serde(other)]
    Other,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Supplier => "supplier",
            EntityKind::Warehouse => "warehouse",
            EntityKind::Store => "store",
            EntityKind::Other => "other",
        }
    }

    /// Role shown under the entity name in the table.
    pub fn role(&self) -> &'static str {
        match self {
            EntityKind::Supplier => "Manufacturing",
            EntityKind::Warehouse => "Distribution",
            EntityKind::Store | EntityKind::Other => "Retail",
        }
    }
}

/// Inventory status as reported by the source. Never derived from the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub entity: EntityKind,
    pub location: String,
    pub inventory_level: u64,
    pub status: Status,
    /// ISO-8601 timestamp, kept as supplied
    pub timestamp: String,
}

impl InventoryRecord {
    pub fn new(
        entity: EntityKind,
        location: impl Into<String>,
        inventory_level: u64,
        status: Status,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            location: location.into(),
            inventory_level,
            status,
            timestamp: timestamp.into(),
        }
    }

    pub fn is_alert(&self) -> bool {
        self.status == Status::Alert
    }
}

/// Body shapes the dashboard accepts: a bare array, or the backend's
/// `{"success": .., "data": [..]}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DashboardPayload {
    Records(Vec<InventoryRecord>),
    Envelope { data: Vec<InventoryRecord> },
}

impl DashboardPayload {
    pub fn into_records(self) -> Vec<InventoryRecord> {
        match self {
            DashboardPayload::Records(records) => records,
            DashboardPayload::Envelope { data } => data,
        }
    }
}
