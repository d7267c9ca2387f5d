// Unit tests for domain rules

use super::*;

#[test]
fn test_equal_totals_are_invalid() {
    let pairs = [
        (TimeSpec::zero(), TimeSpec::zero()),
        (TimeSpec::new(0, 1, 0), TimeSpec::new(0, 0, 60)),
        (TimeSpec::new(1, 0, 0), TimeSpec::new(0, 60, 0)),
    ];

    for (start, end) in pairs {
        assert_eq!(
            validate_range(&start, &end),
            Err(DomainError::InvalidRange(INVALID_RANGE_MESSAGE.to_string()))
        );
    }
}

#[test]
fn test_reversed_range_is_invalid() {
    let start = TimeSpec::new(0, 1, 0);
    let end = TimeSpec::new(0, 0, 30);
    let err = validate_range(&start, &end).unwrap_err();
    assert_eq!(err.to_string(), "End time must be greater than start time");
}

#[test]
fn test_valid_range_duration_is_exact_difference() {
    let cases = [
        (TimeSpec::zero(), TimeSpec::new(0, 0, 10), 0, 10),
        (TimeSpec::new(0, 0, 5), TimeSpec::new(0, 0, 12), 5, 7),
        (TimeSpec::new(0, 59, 59), TimeSpec::new(1, 0, 0), 3599, 1),
        (TimeSpec::new(0, 0, 90), TimeSpec::new(0, 2, 5), 90, 35),
    ];

    for (start, end, offset, duration) in cases {
        let range = validate_range(&start, &end).unwrap();
        assert_eq!(range.offset_secs, offset);
        assert_eq!(range.duration_secs, duration);
        assert_eq!(range.end_secs(), end.total_seconds());
    }
}

#[test]
fn test_range_is_not_checked_against_field_bounds() {
    let range = validate_range(&TimeSpec::zero(), &TimeSpec::new(30, 99, 99)).unwrap();
    assert_eq!(range.duration_secs, 30 * 3600 + 99 * 60 + 99);
}

#[test]
fn test_preset_bounds_normalized() {
    let preset = Preset::new("1m", 60).unwrap();
    let (start, end) = preset_bounds(&preset, true);
    assert_eq!(start, TimeSpec::zero());
    assert_eq!(end, TimeSpec::new(0, 1, 0));
    assert_eq!(end.total_seconds(), 60);
}

#[test]
fn test_preset_bounds_raw() {
    let preset = Preset::new("1m", 60).unwrap();
    let (start, end) = preset_bounds(&preset, false);
    assert_eq!(start, TimeSpec::zero());
    assert_eq!(end, TimeSpec::new(0, 0, 60));
}

#[test]
fn test_convert_args() {
    let range = CutRange {
        offset_secs: 5,
        duration_secs: 7,
    };
    assert_eq!(
        convert_args(&range),
        vec!["-i", "test.mp4", "-t", "7", "-ss", "5", "-f", "gif", "out.gif"]
    );
}

#[test]
fn test_duration_known() {
    assert!(is_duration_known(125.0));
    assert!(!is_duration_known(0.0));
    assert!(!is_duration_known(f64::NAN));
    assert!(!is_duration_known(f64::INFINITY));
    assert!(!is_duration_known(-1.0));
}

#[test]
fn test_duration_from_formatted() {
    assert_eq!(
        duration_from_formatted(Some("00:02:05".to_string())).unwrap(),
        TimeSpec::new(0, 2, 5)
    );
    assert!(matches!(
        duration_from_formatted(None),
        Err(DomainError::MalformedDurationFormat(_))
    ));
    assert!(matches!(
        duration_from_formatted(Some("2m5s".to_string())),
        Err(DomainError::MalformedDurationFormat(_))
    ));
}

#[test]
fn test_field_policy_accept() {
    assert_eq!(FieldPolicy::Accept.apply(TimeField::Minutes, 75), Ok(75));
}

#[test]
fn test_field_policy_clamp() {
    assert_eq!(FieldPolicy::Clamp.apply(TimeField::Minutes, 75), Ok(59));
    assert_eq!(FieldPolicy::Clamp.apply(TimeField::Hours, 30), Ok(23));
    assert_eq!(FieldPolicy::Clamp.apply(TimeField::Seconds, 12), Ok(12));
}

#[test]
fn test_field_policy_reject() {
    assert!(FieldPolicy::Reject.apply(TimeField::Seconds, 60).is_err());
    assert_eq!(FieldPolicy::Reject.apply(TimeField::Seconds, 59), Ok(59));
}

#[test]
fn test_find_preset() {
    let presets = Preset::defaults();
    assert_eq!(find_preset(&presets, "30S").unwrap().duration_secs, 30);

    let err = find_preset(&presets, "2h").unwrap_err();
    assert!(err.to_string().contains("10s, 30s, 1m"));
}
