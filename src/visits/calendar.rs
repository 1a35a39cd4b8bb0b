// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! iCalendar rendering for visit reminders. One VEVENT per visit, importable
//! by any calendar client.

use chrono::{DateTime, Duration, Utc};

use super::models::VisitRow;

const EVENT_DURATION_HOURS: i64 = 1;

/// RFC 5545 timestamp, always UTC.
fn format_timestamp(when: DateTime<Utc>) -> String {
    when.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape text for a content line: backslash, comma, semicolon, newline.
fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Render a single-event calendar for a visit.
pub fn build_event(visit: &VisitRow, place_name: &str, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Wanderlist//Visit Calendar//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@wanderlist", visit.id),
        format!("DTSTAMP:{}", format_timestamp(now)),
        format!("DTSTART:{}", format_timestamp(visit.visited_at)),
        format!(
            "DTEND:{}",
            format_timestamp(visit.visited_at + Duration::hours(EVENT_DURATION_HOURS))
        ),
        format!("SUMMARY:Visit {}", escape_text(place_name)),
    ];
    if let Some(text) = visit.review_text.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(format!("DESCRIPTION:{}", escape_text(text)));
    }
    if let Some(minutes) = visit.reminder_minutes_before {
        lines.push("BEGIN:VALARM".to_string());
        lines.push("ACTION:DISPLAY".to_string());
        lines.push(format!("DESCRIPTION:Visit {}", escape_text(place_name)));
        lines.push(format!("TRIGGER:-PT{}M", minutes));
        lines.push("END:VALARM".to_string());
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    // Content lines end with CRLF, including the last.
    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}
