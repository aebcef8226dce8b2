//! iCalendar (RFC 5545) rendering of shifts. Output uses CRLF line endings;
//! times are local wall-clock times tagged with the configured TZID.

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::Shift;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const CRLF: &str = "\r\n";

#[derive(Debug, Clone)]
pub struct IcsOptions {
    pub store_name: String,
    pub location: String,
    pub timezone: String,
}

/// Escapes TEXT values: backslash, semicolon, comma and newlines.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn local_stamp(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format("%Y%m%dT%H%M%S").to_string()
}

/// End date of a shift. DTEND must follow DTSTART, so a shift whose end is
/// not after its start always finishes on the next day, whatever the
/// payroll overnight policy.
fn end_date(shift: &Shift) -> NaiveDate {
    if shift.end_time <= shift.start_time {
        shift.date + Duration::days(1)
    } else {
        shift.date
    }
}

/// Builds a VCALENDAR with one VEVENT per shift. `dtstamp` is a UTC instant.
pub fn build_calendar(shifts: &[Shift], opts: &IcsOptions, dtstamp: NaiveDateTime) -> String {
    let mut ics = String::new();
    let stamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();
    let tz = &opts.timezone;

    let _ = write!(ics, "BEGIN:VCALENDAR{CRLF}");
    let _ = write!(ics, "VERSION:2.0{CRLF}");
    let _ = write!(ics, "PRODID:-//{}//Roster//EN{CRLF}", escape_text(&opts.store_name));
    let _ = write!(ics, "CALSCALE:GREGORIAN{CRLF}");
    let _ = write!(ics, "METHOD:PUBLISH{CRLF}");
    let _ = write!(ics, "X-WR-CALNAME:{} Roster{CRLF}", escape_text(&opts.store_name));
    let _ = write!(ics, "X-WR-TIMEZONE:{tz}{CRLF}");

    for shift in shifts {
        let description = if shift.notes.trim().is_empty() {
            format!("Role: {}", shift.role.label())
        } else {
            format!(
                "Role: {}\\nNotes: {}",
                shift.role.label(),
                escape_text(&shift.notes)
            )
        };

        let _ = write!(ics, "BEGIN:VEVENT{CRLF}");
        let _ = write!(ics, "UID:{}@paprika{CRLF}", shift.id);
        let _ = write!(ics, "DTSTAMP:{stamp}{CRLF}");
        let _ = write!(
            ics,
            "DTSTART;TZID={tz}:{}{CRLF}",
            local_stamp(shift.date, shift.start_time)
        );
        let _ = write!(
            ics,
            "DTEND;TZID={tz}:{}{CRLF}",
            local_stamp(end_date(shift), shift.end_time)
        );
        let _ = write!(ics, "SUMMARY:Work: {}{CRLF}", shift.role.label());
        let _ = write!(ics, "DESCRIPTION:{description}{CRLF}");
        let _ = write!(ics, "LOCATION:{}{CRLF}", escape_text(&opts.location));
        let _ = write!(ics, "STATUS:CONFIRMED{CRLF}");
        let _ = write!(ics, "END:VEVENT{CRLF}");
    }

    let _ = write!(ics, "END:VCALENDAR{CRLF}");
    ics
}

pub(crate) fn export_ics(content: &str, path: &Path) -> AppResult<()> {
    fs::write(path, content)?;
    notify_export_success("ICS", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftRole;

    fn opts() -> IcsOptions {
        IcsOptions {
            store_name: "Paprika".into(),
            location: "Paprika, Main St".into(),
            timezone: "Europe/Amsterdam".into(),
        }
    }

    fn shift(id: i64, start: (u32, u32), end: (u32, u32), notes: &str) -> Shift {
        Shift {
            id,
            employee_id: Some(4),
            date: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            role: ShiftRole::Kitchen,
            notes: notes.into(),
            created_by: 1,
            created_at: String::new(),
        }
    }

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn one_event_per_shift_with_crlf() {
        let ics = build_calendar(
            &[shift(7, (8, 0), (16, 30), ""), shift(8, (17, 0), (21, 0), "")],
            &opts(),
            stamp(),
        );

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT\r\n").count(), 2);
        assert!(ics.contains("UID:7@paprika\r\n"));
        assert!(ics.contains("DTSTAMP:20260201T093000Z\r\n"));
        assert!(ics.contains("DTSTART;TZID=Europe/Amsterdam:20260212T080000\r\n"));
        assert!(ics.contains("DTEND;TZID=Europe/Amsterdam:20260212T163000\r\n"));
        assert!(ics.contains("SUMMARY:Work: Kitchen\r\n"));
        assert!(ics.contains("LOCATION:Paprika\\, Main St\r\n"));
        assert!(ics.contains("STATUS:CONFIRMED\r\n"));
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn notes_are_escaped_into_description() {
        let ics = build_calendar(
            &[shift(1, (8, 0), (16, 0), "Bring keys; gate code 12,34\nthanks")],
            &opts(),
            stamp(),
        );
        assert!(ics.contains(
            "DESCRIPTION:Role: Kitchen\\nNotes: Bring keys\\; gate code 12\\,34\\nthanks\r\n"
        ));
    }

    #[test]
    fn overnight_end_always_moves_to_next_day() {
        let ics = build_calendar(&[shift(1, (22, 0), (2, 0), "")], &opts(), stamp());
        assert!(ics.contains("DTSTART;TZID=Europe/Amsterdam:20260212T220000\r\n"));
        assert!(ics.contains("DTEND;TZID=Europe/Amsterdam:20260213T020000\r\n"));

        let ics = build_calendar(&[shift(2, (9, 0), (9, 0), "")], &opts(), stamp());
        assert!(ics.contains("DTEND;TZID=Europe/Amsterdam:20260213T090000\r\n"));
    }

    #[test]
    fn escape_handles_backslash_first() {
        assert_eq!(escape_text("a\\b;c"), "a\\\\b\\;c");
        assert_eq!(escape_text("line\r\nnext"), "line\\nnext");
    }
}
