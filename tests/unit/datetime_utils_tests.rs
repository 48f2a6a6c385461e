/*!
 * Tests for timestamp formatting and parsing
 */

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use librarium::datetime_utils::{self, DateTimePattern};
use librarium::ErrorKind;

fn at(offset_secs: i32, nanos: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_secs)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 17, 8, 45, 12)
        .unwrap()
        .with_nanosecond(nanos)
        .unwrap()
}

#[test]
fn test_isoRoundTrip_shouldBeExact() {
    for value in [at(0, 0), at(7200, 123_456_789), at(-4 * 3600, 500_000_000)] {
        let text = datetime_utils::format_iso(&value);
        let parsed = datetime_utils::parse_iso(&text).unwrap();
        assert_eq!(parsed, value);
        assert_eq!(parsed.offset(), value.offset());
    }
}

#[test]
fn test_customRoundTrip_shouldHoldToWholeSeconds() {
    let value = at(5 * 3600 + 30 * 60, 987_654_321);
    let expected = value.with_nanosecond(0).unwrap();

    for pattern in DateTimePattern::ALL {
        let text = datetime_utils::format(&value, pattern);
        let parsed = datetime_utils::parse(&text, pattern).unwrap();
        assert_eq!(parsed, expected, "pattern {}", pattern);
        assert_eq!(parsed.offset(), expected.offset());
    }
}

#[test]
fn test_customRoundTrip_atUtc_shouldParseGmtAndZ() {
    let value = at(0, 0);
    for pattern in DateTimePattern::ALL {
        let text = datetime_utils::format(&value, pattern);
        assert_eq!(datetime_utils::parse(&text, pattern).unwrap(), value);
    }
}

#[test]
fn test_parse_invalidMonth_shouldFailWithParseError() {
    for pattern in DateTimePattern::ALL {
        let error = datetime_utils::parse("2024-13-01 10:00:00 +00:00", pattern)
            .expect_err("month 13 must not parse");
        assert_eq!(error.kind(), ErrorKind::Parse);
    }
}

#[test]
fn test_parse_wrongOffsetNotation_shouldFail() {
    assert!(
        datetime_utils::parse("2024-03-17 08:45:12 +01:00", DateTimePattern::MachineLongOffset)
            .is_err()
    );
    assert!(
        datetime_utils::parse("2024-03-17 08:45:12 GMT+01:00", DateTimePattern::MachineShortOffset)
            .is_err()
    );
    assert!(datetime_utils::parse("2024-03-17", DateTimePattern::MachineShortOffset).is_err());
}

#[test]
fn test_parseIso_withGarbage_shouldFail() {
    let error = datetime_utils::parse_iso("yesterday").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert!(error.to_string().contains("yesterday"));
}

#[test]
fn test_humanLongForm_shouldSpellWeekdayAndMonth() {
    let text = datetime_utils::format_custom3(&at(3600, 0));
    assert_eq!(text, "Sunday, Mar 17, 2024 08:45:12 GMT+01:00");
}

#[test]
fn test_now_shouldBeCloseToSystemTime() {
    let before = chrono::Utc::now().fixed_offset();
    let now = datetime_utils::now();
    let after = chrono::Utc::now().fixed_offset();
    assert!(now >= before && now <= after);
}
