//! Timeline rendering.

use chrono::DateTime;
use pv_contract_reader::EventRecord;
use std::fmt::Write;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// `Mon D, YYYY, HH:MM AM` in UTC. Out-of-range values print as the raw number.
pub fn format_event_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%b %-d, %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Age of `timestamp` relative to `now`, both unix seconds.
///
/// Under a week old renders as an age; older renders the absolute date.
pub fn relative_time(timestamp: u64, now: u64) -> String {
    let diff = now as i128 - timestamp as i128;
    let diff = i64::try_from(diff).unwrap_or(i64::MAX);

    if diff < MINUTE {
        "just now".to_string()
    } else if diff < HOUR {
        format!("{} minutes ago", diff / MINUTE)
    } else if diff < DAY {
        format!("{} hours ago", diff / HOUR)
    } else if diff < WEEK {
        format!("{} days ago", diff / DAY)
    } else {
        format_event_timestamp(timestamp)
    }
}

/// One event as a block of text lines.
pub fn render_event(event: &EventRecord, now: u64) -> String {
    let mut out = String::new();
    let kind = if event.event_kind.is_empty() {
        "(unknown)"
    } else {
        &event.event_kind
    };
    let _ = writeln!(
        out,
        "#{:<5} {:<14} {} ({})",
        event.event_id,
        kind,
        format_event_timestamp(event.timestamp),
        relative_time(event.timestamp, now)
    );
    if !event.actor.is_empty() {
        let _ = writeln!(out, "       actor: {}", event.actor);
    }
    if !event.note.is_empty() {
        let _ = writeln!(out, "       note:  {}", event.note);
    }
    if let Some(hash) = &event.data_hash {
        let _ = writeln!(out, "       data:  {}", hash);
    }
    out
}

/// A product's timeline, most recent first as given.
pub fn render_timeline(product_id: &str, events: &[EventRecord], now: u64) -> String {
    if events.is_empty() {
        return format!("No events recorded for {}\n", product_id);
    }
    let mut out = format!("{} - {} events\n", product_id, events.len());
    for event in events {
        out.push_str(&render_event(event, now));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_format_event_timestamp() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_event_timestamp(NOW), "Nov 14, 2023, 10:13 PM");
        assert_eq!(format_event_timestamp(0), "Jan 1, 1970, 12:00 AM");
    }

    #[test]
    fn test_format_out_of_range() {
        assert_eq!(format_event_timestamp(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_relative_time_buckets() {
        assert_eq!(relative_time(NOW - 59, NOW), "just now");
        assert_eq!(relative_time(NOW - 60, NOW), "1 minutes ago");
        assert_eq!(relative_time(NOW - 3_599, NOW), "59 minutes ago");
        assert_eq!(relative_time(NOW - 7_200, NOW), "2 hours ago");
        assert_eq!(relative_time(NOW - 3 * 86_400, NOW), "3 days ago");
        assert_eq!(relative_time(NOW - 7 * 86_400, NOW), "Nov 7, 2023, 10:13 PM");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        assert_eq!(relative_time(NOW + 500, NOW), "just now");
    }

    #[test]
    fn test_render_event() {
        let event = EventRecord {
            event_id: 3,
            product_id: "PROD-001".into(),
            actor: "GABC".into(),
            timestamp: NOW - 120,
            event_kind: "shipped".into(),
            note: String::new(),
            data_hash: Some("q80=".into()),
        };
        let text = render_event(&event, NOW);
        assert!(text.starts_with("#3     shipped"));
        assert!(text.contains("(2 minutes ago)"));
        assert!(text.contains("actor: GABC"));
        assert!(!text.contains("note:"));
        assert!(text.contains("data:  q80="));
    }

    #[test]
    fn test_render_empty_timeline() {
        assert_eq!(render_timeline("PROD-9", &[], NOW), "No events recorded for PROD-9\n");
    }

    #[test]
    fn test_render_timeline_header() {
        let events = vec![EventRecord::default(), EventRecord::default()];
        let text = render_timeline("PROD-1", &events, NOW);
        assert!(text.starts_with("PROD-1 - 2 events\n"));
        assert_eq!(text.matches("(unknown)").count(), 2);
    }
}
