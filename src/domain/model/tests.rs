// Unit tests for domain models

use super::*;

#[test]
fn test_time_spec_total_seconds() {
    let time = TimeSpec::new(1, 2, 3);
    assert_eq!(time.total_seconds(), 3723);
    assert_eq!(TimeSpec::zero().total_seconds(), 0);
}

#[test]
fn test_time_spec_total_seconds_with_overflowing_fields() {
    // Out-of-range fields still count towards the total
    let time = TimeSpec::new(0, 75, 90);
    assert_eq!(time.total_seconds(), 75 * 60 + 90);
}

#[test]
fn test_time_spec_from_total_seconds_normalizes() {
    assert_eq!(TimeSpec::from_total_seconds(125), TimeSpec::new(0, 2, 5));
    assert_eq!(TimeSpec::from_total_seconds(60), TimeSpec::new(0, 1, 0));
    assert_eq!(TimeSpec::from_total_seconds(3661), TimeSpec::new(1, 1, 1));
}

#[test]
fn test_time_spec_from_raw_seconds_keeps_seconds_field() {
    let time = TimeSpec::from_raw_seconds(60);
    assert_eq!(time, TimeSpec::new(0, 0, 60));
    assert_eq!(time.total_seconds(), 60);
}

#[test]
fn test_time_spec_parse_hms() {
    assert_eq!(TimeSpec::parse_hms("00:02:05").unwrap(), TimeSpec::new(0, 2, 5));
    assert_eq!(TimeSpec::parse_hms("101:00:00").unwrap(), TimeSpec::new(101, 0, 0));
}

#[test]
fn test_time_spec_parse_hms_rejects_malformed() {
    for input in ["", "02:05", "a:b:c", "00:02:05:00", "00:-1:05", "00:02:5.5"] {
        assert!(
            matches!(
                TimeSpec::parse_hms(input),
                Err(DomainError::MalformedDurationFormat(_))
            ),
            "expected {:?} to be rejected",
            input
        );
    }
}

#[test]
fn test_time_spec_parse_user_input() {
    assert_eq!(TimeSpec::parse("90").unwrap(), TimeSpec::new(0, 1, 30));
    assert_eq!(TimeSpec::parse("01:30").unwrap(), TimeSpec::new(0, 1, 30));
    assert_eq!(TimeSpec::parse(" 01:02:03 ").unwrap(), TimeSpec::new(1, 2, 3));
    assert!(matches!(TimeSpec::parse("soon"), Err(DomainError::BadArgs(_))));
    assert!(TimeSpec::parse("1:2:3:4").is_err());
    assert!(TimeSpec::parse("-5").is_err());
}

#[test]
fn test_time_spec_display() {
    assert_eq!(TimeSpec::new(0, 2, 5).to_string(), "00:02:05");
    assert_eq!(TimeSpec::new(12, 0, 59).to_string(), "12:00:59");
}

#[test]
fn test_time_spec_with_field() {
    let time = TimeSpec::new(1, 2, 3).with_field(TimeField::Minutes, 40);
    assert_eq!(time, TimeSpec::new(1, 40, 3));
    assert_eq!(time.get(TimeField::Minutes), 40);
    assert_eq!(time.get(TimeField::Hours), 1);
}

#[test]
fn test_time_field_parse_and_max() {
    assert_eq!("hours".parse::<TimeField>().unwrap(), TimeField::Hours);
    assert_eq!("M".parse::<TimeField>().unwrap(), TimeField::Minutes);
    assert!("days".parse::<TimeField>().is_err());
    assert_eq!(TimeField::Hours.max(), 23);
    assert_eq!(TimeField::Seconds.max(), 59);
}

#[test]
fn test_preset_validation() {
    assert!(Preset::new("5s", 5).is_ok());
    assert!(Preset::new("", 5).is_err());
    assert!(Preset::new("zero", 0).is_err());
    assert!(Preset::new("Custom", 5).is_err());
}

#[test]
fn test_default_presets() {
    let presets = Preset::defaults();
    let labels: Vec<&str> = presets.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["10s", "30s", "1m"]);
    assert_eq!(presets[2].duration_secs, 60);
}

#[test]
fn test_cut_selection_label() {
    assert_eq!(CutSelection::default().label(), "custom");
    assert!(CutSelection::default().is_custom());

    let preset = CutSelection::Preset(Preset::new("30s", 30).unwrap());
    assert_eq!(preset.label(), "30s");
    assert!(!preset.is_custom());
}

#[test]
fn test_field_policy_parse() {
    assert_eq!("clamp".parse::<FieldPolicy>().unwrap(), FieldPolicy::Clamp);
    assert_eq!(FieldPolicy::default(), FieldPolicy::Accept);
    assert!("ignore".parse::<FieldPolicy>().is_err());
}

#[test]
fn test_media_source_stem() {
    assert_eq!(MediaSource::new("/tmp/holiday.mp4").stem(), "holiday");
    assert_eq!(MediaSource::new("/").stem(), "clip");
}
