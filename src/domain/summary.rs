// Derived dashboard views - filtering and aggregate counts
use super::inventory::{InventoryRecord, Status};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Normal,
    Alert,
}

impl StatusFilter {
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Normal => record.status == Status::Normal,
            StatusFilter::Alert => record.status == Status::Alert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Normal => "normal",
            StatusFilter::Alert => "alert",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown status filter: {0}")]
pub struct UnknownFilter(String);

impl FromStr for StatusFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "normal" => Ok(StatusFilter::Normal),
            "alert" => Ok(StatusFilter::Alert),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Records matching `filter`, in source order.
pub fn filter_records(records: &[InventoryRecord], filter: StatusFilter) -> Vec<InventoryRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub total_entities: usize,
    pub normal_count: usize,
    pub alert_count: usize,
    pub total_inventory: u64,
}

impl InventorySummary {
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        records.iter().fold(
            Self {
                total_entities: records.len(),
                ..Self::default()
            },
            |mut summary, record| {
                if record.is_alert() {
                    summary.alert_count += 1;
                } else {
                    summary.normal_count += 1;
                }
                summary.total_inventory =
                    summary.total_inventory.saturating_add(record.inventory_level);
                summary
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::fallback_records;
    use crate::domain::inventory::EntityKind;
    use chrono::Utc;

    fn record(status: Status, level: u64) -> InventoryRecord {
        InventoryRecord::new(EntityKind::Store, "X", level, status, "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_filter_all_is_identity() {
        let records = fallback_records(Utc::now());
        assert_eq!(filter_records(&records, StatusFilter::All), records);
    }

    #[test]
    fn test_filter_by_status() {
        let records = fallback_records(Utc::now());

        let alerts = filter_records(&records, StatusFilter::Alert);
        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|r| r.status == Status::Alert));

        let normal = filter_records(&records, StatusFilter::Normal);
        assert_eq!(normal.len(), 6);
        assert!(normal.iter().all(|r| r.status == Status::Normal));
    }

    #[test]
    fn test_filter_keeps_source_order() {
        let records = vec![
            record(Status::Alert, 1),
            record(Status::Normal, 2),
            record(Status::Alert, 3),
        ];
        let levels: Vec<u64> = filter_records(&records, StatusFilter::Alert)
            .iter()
            .map(|r| r.inventory_level)
            .collect();

        assert_eq!(levels, vec![1, 3]);
    }

    #[test]
    fn test_summary_counts_add_up() {
        let records = fallback_records(Utc::now());
        let summary = InventorySummary::from_records(&records);

        assert_eq!(summary.alert_count + summary.normal_count, records.len());
        assert_eq!(summary.total_entities, 9);
        assert_eq!(summary.alert_count, 3);
        assert_eq!(summary.total_inventory, 14_421);
    }

    #[test]
    fn test_summary_of_empty_set() {
        assert_eq!(InventorySummary::from_records(&[]), InventorySummary::default());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("alert".parse::<StatusFilter>().unwrap(), StatusFilter::Alert);
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert!("critical".parse::<StatusFilter>().is_err());
    }
}
