use triage_link::parse::{parse, parse_wait_time};

#[test]
fn test_hours_and_minutes() {
    for (hours, minutes) in [(0u32, 5u32), (1, 0), (2, 12), (7, 59), (12, 30)] {
        let text = format!("{hours} hr {minutes} min");
        assert_eq!(
            parse_wait_time(Some(&text)),
            Some(f64::from(hours * 60 + minutes)),
            "{text}"
        );
    }
}

#[test]
fn test_ranges_average_both_sides() {
    assert_eq!(parse_wait_time(Some("1 hr 0 min to 1 hr 9 min")), Some(64.5));
    assert_eq!(parse_wait_time(Some("30 min TO 1 hr")), Some(45.0));
    assert_eq!(parse_wait_time(Some("2 hr 44 min to4 hr 25 min")), Some(214.5));
    assert_eq!(parse_wait_time(Some("soon to 1 hr")), None);
}

#[test]
fn test_to_inside_a_word_is_not_a_range() {
    assert_eq!(parse_wait_time(Some("Toronto 2 hr")), Some(120.0));
    assert_eq!(parse_wait_time(Some("1 hr 10 min (photo booth)")), Some(70.0));
}

#[test]
fn test_unavailable_inputs() {
    assert_eq!(parse_wait_time(None), None);
    assert_eq!(parse_wait_time(Some("Not available")), None);
    assert_eq!(parse_wait_time(Some("NOT AVAILABLE right now")), None);
    assert_eq!(parse_wait_time(Some("")), None);
    assert_eq!(parse_wait_time(Some("0 hr 0 min")), None);
    assert!(!parse(Some("Not available")).is_available());
    assert!(parse(Some("1 hr 30 min")).is_available());
}

#[test]
fn test_malformed_text_never_panics() {
    for text in ["hr min", "to", " to to ", "99999999999999 hr", "{}", "—"] {
        let _ = parse_wait_time(Some(text));
    }
}
