use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const STAMP_LAYOUT: &str = "%d %b %Y %H:%M:%S";

/// Parse `Mon, 02 Jan 2006 15:04:05 MST`.
///
/// The weekday name is matched case-insensitively and never checked
/// against the date. Surrounding whitespace is rejected. Zone
/// abbreviations outside RFC 822 resolve to +00:00 with the wall clock
/// kept as written; numeric `+hhmm` and `+hh:mm` offsets are honoured.
pub fn parse(raw: &str) -> Result<DateTime<FixedOffset>> {
    let Some((weekday, rest)) = raw.split_once(", ") else {
        bail!("expected `Mon, 02 Jan 2006 15:04:05 MST`, got {raw:?}");
    };
    if !WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(weekday)) {
        bail!("unknown weekday {weekday:?}");
    }
    let Some((stamp, zone)) = rest.rsplit_once(' ') else {
        bail!("missing time zone in {raw:?}");
    };
    let naive = NaiveDateTime::parse_from_str(stamp, STAMP_LAYOUT)
        .with_context(|| format!("invalid date/time {stamp:?}"))?;
    let offset = zone_offset(zone)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .with_context(|| format!("ambiguous local time {stamp:?} in zone {zone}"))
}

/// Render in the same layout `parse` reads back.
pub fn format(at: &DateTime<FixedOffset>) -> String {
    let stamp = at.format("%a, %d %b %Y %H:%M:%S");
    if at.offset().local_minus_utc() == 0 {
        format!("{stamp} UTC")
    } else {
        format!("{stamp} {}", at.format("%z"))
    }
}

pub fn now_local() -> String {
    format(&Local::now().fixed_offset())
}

fn zone_offset(zone: &str) -> Result<FixedOffset> {
    let hours = match zone {
        "UT" | "UTC" | "GMT" | "Z" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ if zone.starts_with(['+', '-']) => return numeric_offset(zone),
        _ if (3..=5).contains(&zone.len()) && zone.bytes().all(|b| b.is_ascii_uppercase()) => 0,
        _ => bail!("unrecognised time zone {zone:?}"),
    };
    FixedOffset::east_opt(hours * 3600).context("time zone offset out of range")
}

fn numeric_offset(zone: &str) -> Result<FixedOffset> {
    let (sign, rest) = zone.split_at(1);
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !matches!(digits.len(), 2 | 4) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("invalid numeric time zone {zone:?}");
    }
    let hours: i32 = digits[..2].parse()?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse()?
    } else {
        0
    };
    if minutes >= 60 {
        bail!("invalid numeric time zone {zone:?}");
    }
    let magnitude = hours * 3600 + minutes * 60;
    let secs = if sign == "-" { -magnitude } else { magnitude };
    FixedOffset::east_opt(secs).with_context(|| format!("time zone {zone:?} out of range"))
}
