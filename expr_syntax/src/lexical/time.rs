//! Timestamp recognition for quoted literals
//!
//! Formats are tried in order and the first successful parse wins. Layouts
//! are documented with the reference-time notation (`2006-01-02 15:04:05`)
//! alongside the chrono pattern that implements each one.

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};

/// One accepted timestamp profile
pub struct TimeFormat {
    pub name: &'static str,
    /// Reference layout as written in documentation
    pub layout: &'static str,
    parse: fn(&str) -> Option<DateTime<FixedOffset>>,
}

impl TimeFormat {
    pub fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        (self.parse)(text)
    }
}

pub static TIME_FORMATS: [TimeFormat; 13] = [
    TimeFormat {
        name: "ANSIC",
        layout: "Mon Jan _2 15:04:05 2006",
        parse: parse_ansic,
    },
    TimeFormat {
        name: "UnixDate",
        layout: "Mon Jan _2 15:04:05 MST 2006",
        parse: parse_unix_date,
    },
    TimeFormat {
        name: "RubyDate",
        layout: "Mon Jan 02 15:04:05 -0700 2006",
        parse: parse_ruby_date,
    },
    TimeFormat {
        name: "Kitchen",
        layout: "3:04PM",
        parse: parse_kitchen,
    },
    TimeFormat {
        name: "RFC3339",
        layout: "2006-01-02T15:04:05Z07:00",
        parse: parse_rfc3339,
    },
    TimeFormat {
        name: "date",
        layout: "2006-01-02",
        parse: parse_date,
    },
    TimeFormat {
        name: "date+minute",
        layout: "2006-01-02 15:04",
        parse: parse_date_minute,
    },
    TimeFormat {
        name: "date+second",
        layout: "2006-01-02 15:04:05",
        parse: parse_date_second,
    },
    TimeFormat {
        name: "date+second+offset",
        layout: "2006-01-02 15:04:05-07:00",
        parse: parse_date_second_offset,
    },
    TimeFormat {
        name: "ISO8601 hour",
        layout: "2006-01-02T15Z0700",
        parse: parse_iso_hour,
    },
    TimeFormat {
        name: "ISO8601 minute",
        layout: "2006-01-02T15:04Z0700",
        parse: parse_iso_minute,
    },
    TimeFormat {
        name: "ISO8601 second",
        layout: "2006-01-02T15:04:05Z0700",
        parse: parse_iso_second,
    },
    TimeFormat {
        name: "ISO8601 nanosecond",
        layout: "2006-01-02T15:04:05.999999999Z0700",
        parse: parse_iso_nanosecond,
    },
];

/// First format that accepts `text`, if any
pub fn try_parse_time(text: &str) -> Option<DateTime<FixedOffset>> {
    TIME_FORMATS.iter().find_map(|format| format.parse(text))
}

/// Interpret a wall-clock time in the local zone; gaps do not match
fn in_local_zone(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(local.with_timezone(local.offset()))
}

fn in_offset(naive: NaiveDateTime, seconds_east: i32) -> Option<DateTime<FixedOffset>> {
    FixedOffset::east_opt(seconds_east)?
        .from_local_datetime(&naive)
        .single()
}

fn parse_ansic(text: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, "%a %b %e %H:%M:%S %Y").ok()?;
    in_local_zone(naive)
}

/// Zone abbreviations carry no offset; they resolve to UTC
fn parse_unix_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 6 || !parts[4].chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let without_zone = format!(
        "{} {} {} {} {}",
        parts[0], parts[1], parts[2], parts[3], parts[5]
    );
    let naive = NaiveDateTime::parse_from_str(&without_zone, "%a %b %e %H:%M:%S %Y").ok()?;
    in_offset(naive, 0)
}

fn parse_ruby_date(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, "%a %b %d %H:%M:%S %z %Y").ok()
}

fn parse_kitchen(text: &str) -> Option<DateTime<FixedOffset>> {
    let time = NaiveTime::parse_from_str(text, "%I:%M%p").ok()?;
    let date = NaiveDate::from_ymd_opt(0, 1, 1)?;
    in_local_zone(date.and_time(time))
}

fn parse_rfc3339(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok()
}

fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    in_local_zone(date.and_hms_opt(0, 0, 0)?)
}

fn parse_date_minute(text: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").ok()?;
    in_local_zone(naive)
}

fn parse_date_second(text: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok()?;
    in_local_zone(naive)
}

fn parse_date_second_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%:z").ok()
}

/// Split a trailing `Z` or `±hhmm` zone designator
fn split_iso_zone(text: &str) -> Option<(&str, i32)> {
    if let Some(rest) = text.strip_suffix('Z') {
        return Some((rest, 0));
    }

    let split = text.len().checked_sub(5)?;
    if !text.is_char_boundary(split) {
        return None;
    }
    let (rest, zone) = text.split_at(split);
    let sign = match zone.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = &zone[1..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    Some((rest, sign * (hours * 3600 + minutes * 60)))
}

fn parse_iso_with(text: &str, pattern: &str, suffix: &str) -> Option<DateTime<FixedOffset>> {
    let (rest, offset) = split_iso_zone(text)?;
    let naive = NaiveDateTime::parse_from_str(&format!("{}{}", rest, suffix), pattern).ok()?;
    in_offset(naive, offset)
}

fn parse_iso_hour(text: &str) -> Option<DateTime<FixedOffset>> {
    parse_iso_with(text, "%Y-%m-%dT%H:%M", ":00")
}

fn parse_iso_minute(text: &str) -> Option<DateTime<FixedOffset>> {
    parse_iso_with(text, "%Y-%m-%dT%H:%M", "")
}

fn parse_iso_second(text: &str) -> Option<DateTime<FixedOffset>> {
    parse_iso_with(text, "%Y-%m-%dT%H:%M:%S", "")
}

fn parse_iso_nanosecond(text: &str) -> Option<DateTime<FixedOffset>> {
    parse_iso_with(text, "%Y-%m-%dT%H:%M:%S%.f", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_plain_text_is_not_a_time() {
        assert!(try_parse_time("not a date").is_none());
        assert!(try_parse_time("").is_none());
        assert!(try_parse_time("12").is_none());
    }

    #[test]
    fn test_bare_date_is_local_midnight() {
        let time = try_parse_time("2023-01-02").unwrap();
        assert_eq!((time.year(), time.month(), time.day()), (2023, 1, 2));
        assert_eq!((time.hour(), time.minute()), (0, 0));
    }

    #[test]
    fn test_rfc3339_keeps_offset_and_fraction() {
        let time = try_parse_time("2014-01-02T14:12:22.5+02:00").unwrap();
        assert_eq!(time.offset().local_minus_utc(), 7200);
        assert_eq!(time.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_date_second_offset() {
        let time = try_parse_time("2014-01-02 14:12:22-07:00").unwrap();
        assert_eq!(time.offset().local_minus_utc(), -7 * 3600);
        assert_eq!(time.second(), 22);
    }

    #[test]
    fn test_iso_variants() {
        let hour = try_parse_time("2014-01-02T14Z").unwrap();
        assert_eq!((hour.hour(), hour.minute()), (14, 0));

        let minute = try_parse_time("2014-01-02T14:12+0130").unwrap();
        assert_eq!(minute.offset().local_minus_utc(), 5400);

        // RFC 3339 requires seconds, so this falls to the ISO second profile
        let second = try_parse_time("2014-01-02T14:12:22-0500").unwrap();
        assert_eq!(second.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_ruby_and_unix_dates() {
        let ruby = try_parse_time("Thu Jan 02 15:04:05 -0700 2014").unwrap();
        assert_eq!(ruby.offset().local_minus_utc(), -7 * 3600);

        let unix = try_parse_time("Thu Jan  2 15:04:05 UTC 2014").unwrap();
        assert_eq!(unix.offset().local_minus_utc(), 0);
        assert_eq!(unix.day(), 2);
    }

    #[test]
    fn test_kitchen_time() {
        let time = try_parse_time("3:04PM").unwrap();
        assert_eq!((time.hour(), time.minute()), (15, 4));
    }

    #[test]
    fn test_zone_splitter() {
        assert_eq!(split_iso_zone("T10Z"), Some(("T10", 0)));
        assert_eq!(split_iso_zone("T10-0100"), Some(("T10", -3600)));
        assert_eq!(split_iso_zone("T10"), None);
        assert_eq!(split_iso_zone("abc+01x0"), None);
    }

    #[test]
    fn test_every_format_is_listed() {
        assert_eq!(TIME_FORMATS.len(), 13);
        assert_eq!(TIME_FORMATS[0].name, "ANSIC");
        assert!(TIME_FORMATS.iter().all(|f| !f.layout.is_empty()));
    }
}
