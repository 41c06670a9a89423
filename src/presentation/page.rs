// Server-rendered dashboard page
use crate::application::dashboard_state::DashboardSnapshot;
use crate::domain::inventory::{EntityKind, InventoryRecord, Status};
use crate::domain::summary::StatusFilter;
use chrono::DateTime;
use std::time::Duration;

const FILTERS: [(StatusFilter, &str); 3] = [
    (StatusFilter::All, "All"),
    (StatusFilter::Normal, "Operational"),
    (StatusFilter::Alert, "Critical"),
];

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 14421 -> "14,421"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn entity_icon(entity: EntityKind) -> &'static str {
    match entity {
        EntityKind::Supplier => "🏭",
        EntityKind::Warehouse => "🏢",
        EntityKind::Store => "🏪",
        EntityKind::Other => "📦",
    }
}

fn display_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn render_row(out: &mut String, record: &InventoryRecord) {
    let (class, badge) = match record.status {
        Status::Normal => ("normal", "✅ Operational"),
        Status::Alert => ("alert", "🚨 Critical"),
    };
    out.push_str(&format!(
        "<tr class=\"{class}\"><td>{icon} <strong>{entity}</strong><br><small>{role}</small></td>\
         <td>{location}</td><td>{level} units</td><td>{badge}</td><td>{timestamp}</td></tr>",
        icon = entity_icon(record.entity),
        entity = record.entity.as_str(),
        role = record.entity.role(),
        location = escape(&record.location),
        level = group_thousands(record.inventory_level),
        timestamp = escape(&display_timestamp(&record.timestamp)),
    ));
}

/// `refresh_interval` drives both the page reload and the footer text.
pub fn render_dashboard(view: &DashboardSnapshot, refresh_interval: Duration) -> String {
    let refresh_secs = refresh_interval.as_secs().max(1);
    let mut out = String::with_capacity(4096);

    out.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <meta http-equiv=\"refresh\" content=\"{}\">\
         <title>Digital Twin Supply Chain Dashboard</title></head><body>",
        refresh_secs
    ));
    out.push_str("<h1>Digital Twin Supply Chain Dashboard</h1>");

    if view.using_mock_data {
        out.push_str(
            "<div class=\"notice\" role=\"status\"><h3>Demo Mode Active</h3>\
             <p>Displaying fallback supply chain data. The live backend is unavailable.</p></div>",
        );
    }

    let summary = &view.summary;
    out.push_str(&format!(
        "<section class=\"summary\"><p>Total Entities: <strong>{}</strong></p>\
         <p>Normal Status: <strong>{}</strong></p><p>Critical Alerts: <strong>{}</strong></p>\
         <p>Total Inventory: <strong>{}</strong></p></section>",
        summary.total_entities,
        summary.normal_count,
        summary.alert_count,
        group_thousands(summary.total_inventory),
    ));

    out.push_str("<nav aria-label=\"Status filter\">Filter by status: ");
    for (filter, label) in FILTERS {
        let pressed = filter == view.status_filter;
        out.push_str(&format!(
            "<a href=\"/?status={}\" aria-pressed=\"{}\">{}</a> ",
            filter, pressed, label
        ));
    }
    out.push_str("</nav>");

    if let Some(error) = &view.error {
        out.push_str(&format!(
            "<div class=\"error\" role=\"alert\"><strong>Connection Error</strong><p>{}</p></div>",
            escape(error)
        ));
    }

    if view.loading && view.summary.total_entities == 0 {
        out.push_str("<p class=\"loading\">Loading supply chain data...</p>");
    } else {
        out.push_str(
            "<table aria-label=\"Supply chain status table\"><thead><tr>\
             <th>Entity Type</th><th>Location</th><th>Inventory Level</th>\
             <th>Status</th><th>Last Updated</th></tr></thead><tbody>",
        );
        if view.records.is_empty() {
            out.push_str("<tr><td colspan=\"5\">No data available</td></tr>");
        }
        for record in &view.records {
            render_row(&mut out, record);
        }
        out.push_str("</tbody></table>");
    }

    out.push_str(&format!(
        "<footer>Auto-refreshes every {} seconds • Last refresh: {}</footer></body></html>",
        refresh_secs,
        view.last_updated.as_deref().unwrap_or("Never")
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::summary::InventorySummary;

    fn snapshot(records: Vec<InventoryRecord>) -> DashboardSnapshot {
        DashboardSnapshot {
            summary: InventorySummary::from_records(&records),
            records,
            loading: false,
            error: None,
            last_updated: None,
            using_mock_data: false,
            status_filter: StatusFilter::All,
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(14_421), "14,421");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_location_is_escaped() {
        let view = snapshot(vec![InventoryRecord::new(
            EntityKind::Store,
            "<script>alert(1)</script>",
            5,
            Status::Alert,
            "2024-01-01T00:00:00Z",
        )]);

        let html = render_dashboard(&view, Duration::from_secs(5));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("🚨 Critical"));
    }

    #[test]
    fn test_empty_and_loading_states() {
        let mut view = snapshot(Vec::new());
        assert!(render_dashboard(&view, Duration::from_secs(5)).contains("No data available"));

        view.loading = true;
        let html = render_dashboard(&view, Duration::from_secs(5));
        assert!(html.contains("Loading supply chain data"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_banners() {
        let mut view = snapshot(Vec::new());
        view.using_mock_data = true;
        view.error = Some("HTTP error! status: 500".to_string());

        let html = render_dashboard(&view, Duration::from_secs(5));

        assert!(html.contains("Demo Mode Active"));
        assert!(html.contains("HTTP error! status: 500"));
    }

    #[test]
    fn test_refresh_interval_follows_config() {
        let view = snapshot(Vec::new());

        let html = render_dashboard(&view, Duration::from_millis(15_000));
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"15\">"));
        assert!(html.contains("Auto-refreshes every 15 seconds"));
        assert!(!html.contains("every 5 seconds"));

        let html = render_dashboard(&view, Duration::from_millis(250));
        assert!(html.contains("content=\"1\""));
    }
}
