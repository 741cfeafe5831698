//! Display formatting for dates, byte sizes and counts.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

use crate::{Error, Result};

pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD";

/// Render `dt` with a token pattern: `YYYY`, `MM`, `DD`, `HH`, `mm`, `ss`.
///
/// Each token is substituted once (first occurrence), in that order.
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String {
  let fields = [
    ("YYYY", dt.year().to_string()),
    ("MM", format!("{:02}", dt.month())),
    ("DD", format!("{:02}", dt.day())),
    ("HH", format!("{:02}", dt.hour())),
    ("mm", format!("{:02}", dt.minute())),
    ("ss", format!("{:02}", dt.second())),
  ];
  fields
    .iter()
    .fold(pattern.to_string(), |acc, (token, value)| {
      acc.replacen(token, value, 1)
    })
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(dt.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
    .ok_or_else(|| Error::InvalidDate(raw.to_string()))
}

/// Human-readable byte size with 1024 steps, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
  const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
  if bytes == 0 {
    return "0 Bytes".to_string();
  }
  let mut exp = 0;
  let mut scaled = bytes as f64;
  while scaled >= 1024.0 && exp < UNITS.len() - 1 {
    scaled /= 1024.0;
    exp += 1;
  }
  let rounded = format!("{scaled:.2}");
  let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
  format!("{trimmed} {}", UNITS[exp])
}

/// Insert `,` thousands separators into the integer part of `n`.
pub fn format_number(n: i64) -> String {
  let digits = n.unsigned_abs().to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
  if n < 0 {
    out.push('-');
  }
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}
