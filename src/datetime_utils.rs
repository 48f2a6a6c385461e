/*!
 * Timestamp formatting and parsing.
 *
 * All timestamps in the library carry their UTC offset
 * (`DateTime<FixedOffset>`). Besides ISO-8601 there are three display
 * patterns:
 *
 * - `MachineLongOffset`: `2024-01-05 10:00:00 GMT+01:00`
 * - `MachineShortOffset`: `2024-01-05 10:00:00 +01:00`
 * - `HumanLongForm`: `Friday, Jan 05, 2024 10:00:00 GMT+01:00`
 *
 * The long offset is written `GMT` alone at UTC, the short one `Z`.
 * Offsets with a seconds component render as `+hh:mm:ss`.
 */

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, TimeZone};
use std::fmt;

use crate::errors::LibraryError;

/// Date and time layout without the offset, machine patterns
const MACHINE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Date and time layout without the offset, human pattern
const HUMAN_LAYOUT: &str = "%A, %b %d, %Y %H:%M:%S";

/// Prefix of the long offset notation
const GMT: &str = "GMT";

/// Custom display patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimePattern {
    /// `yyyy-MM-dd HH:mm:ss GMT+hh:mm`
    MachineLongOffset,
    /// `yyyy-MM-dd HH:mm:ss +hh:mm`
    MachineShortOffset,
    /// `Weekday, Mon dd, yyyy HH:mm:ss GMT+hh:mm`
    HumanLongForm,
}

impl DateTimePattern {
    /// All custom patterns
    pub const ALL: [DateTimePattern; 3] = [
        DateTimePattern::MachineLongOffset,
        DateTimePattern::MachineShortOffset,
        DateTimePattern::HumanLongForm,
    ];

    fn layout(self) -> &'static str {
        match self {
            Self::MachineLongOffset | Self::MachineShortOffset => MACHINE_LAYOUT,
            Self::HumanLongForm => HUMAN_LAYOUT,
        }
    }

    fn long_offset(self) -> bool {
        !matches!(self, Self::MachineShortOffset)
    }
}

impl fmt::Display for DateTimePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MachineLongOffset => write!(f, "yyyy-MM-dd HH:mm:ss OOOO"),
            Self::MachineShortOffset => write!(f, "yyyy-MM-dd HH:mm:ss XXX"),
            Self::HumanLongForm => write!(f, "EEEE, MMM dd, yyyy HH:mm:ss OOOO"),
        }
    }
}

/// Current local time with its offset
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Format as ISO-8601 with offset, keeping sub-second digits
pub fn format_iso(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an ISO-8601 timestamp with offset
pub fn parse_iso(text: &str) -> Result<DateTime<FixedOffset>, LibraryError> {
    DateTime::parse_from_rfc3339(text).map_err(|e| LibraryError::Parse {
        input: text.to_string(),
        pattern: "ISO-8601".to_string(),
        message: e.to_string(),
    })
}

/// Format with one of the custom patterns
pub fn format(value: &DateTime<FixedOffset>, pattern: DateTimePattern) -> String {
    format!(
        "{} {}",
        value.format(pattern.layout()),
        render_offset(value.offset(), pattern.long_offset())
    )
}

/// Format with `MachineLongOffset`
pub fn format_custom1(value: &DateTime<FixedOffset>) -> String {
    format(value, DateTimePattern::MachineLongOffset)
}

/// Format with `MachineShortOffset`
pub fn format_custom2(value: &DateTime<FixedOffset>) -> String {
    format(value, DateTimePattern::MachineShortOffset)
}

/// Format with `HumanLongForm`
pub fn format_custom3(value: &DateTime<FixedOffset>) -> String {
    format(value, DateTimePattern::HumanLongForm)
}

/// Format an optional timestamp with `HumanLongForm`, `NULL` when unset
pub fn format_optional(value: Option<&DateTime<FixedOffset>>) -> String {
    value.map_or_else(|| "NULL".to_string(), format_custom3)
}

/// Parse text written in one of the custom patterns
pub fn parse(text: &str, pattern: DateTimePattern) -> Result<DateTime<FixedOffset>, LibraryError> {
    let parse_error = |message: String| LibraryError::Parse {
        input: text.to_string(),
        pattern: pattern.to_string(),
        message,
    };

    let (local, offset) = text
        .trim()
        .rsplit_once(' ')
        .ok_or_else(|| parse_error("missing offset".to_string()))?;

    let offset = parse_offset(offset, pattern.long_offset()).map_err(parse_error)?;
    let local = NaiveDateTime::parse_from_str(local, pattern.layout())
        .map_err(|e| parse_error(e.to_string()))?;

    offset
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| parse_error("ambiguous local time".to_string()))
}

// `+hh:mm`, with `:ss` appended when the offset has leftover seconds
fn render_offset(offset: &FixedOffset, long: bool) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return if long { GMT.to_string() } else { "Z".to_string() };
    }

    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    let mut short = format!("{}{:02}:{:02}", sign, seconds / 3600, (seconds % 3600) / 60);
    if seconds % 60 != 0 {
        short.push_str(&format!(":{:02}", seconds % 60));
    }

    if long { format!("{}{}", GMT, short) } else { short }
}

// Reads the pattern's offset notation: `GMT`/`Z` or `±hh:mm[:ss]`
fn parse_offset(offset: &str, long: bool) -> Result<FixedOffset, String> {
    let malformed = || format!("malformed offset '{}'", offset);

    let signed = if long {
        let rest = offset
            .strip_prefix(GMT)
            .ok_or_else(|| format!("offset '{}' must start with {}", offset, GMT))?;
        if rest.is_empty() {
            return FixedOffset::east_opt(0).ok_or_else(malformed);
        }
        rest
    } else if offset == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(malformed);
    } else {
        offset
    };

    let (sign, digits) = match signed.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => return Err(malformed()),
    };

    let parts = digits.split(':').collect::<Vec<_>>();
    if !(2..=3).contains(&parts.len())
        || parts.iter().any(|p| p.len() != 2 || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(malformed());
    }
    let field = |i: usize| parts.get(i).map_or(Ok(0), |p| p.parse::<i32>().map_err(|_| malformed()));
    let (hours, minutes, seconds) = (field(0)?, field(1)?, field(2)?);
    if minutes > 59 || seconds > 59 {
        return Err(malformed());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds)).ok_or_else(malformed)
}
