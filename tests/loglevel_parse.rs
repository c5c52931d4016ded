use flatstash::LogLevel;
use std::str::FromStr;

#[test]
fn every_synonym_maps_to_its_level() {
    let table = [
        ("quiet", LogLevel::Quiet),
        ("ERROR", LogLevel::Quiet),
        ("none", LogLevel::Quiet),
        ("normal", LogLevel::Normal),
        ("Normal", LogLevel::Normal),
        ("info", LogLevel::Info),
        ("verbose", LogLevel::Info),
        ("DETAILED", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("trace", LogLevel::Debug),
    ];
    for (input, expected) in table {
        assert_eq!(LogLevel::parse(input), Some(expected), "input {input:?}");
    }
}

#[test]
fn display_output_parses_back_to_the_same_level() {
    for lvl in [
        LogLevel::Quiet,
        LogLevel::Normal,
        LogLevel::Info,
        LogLevel::Debug,
    ] {
        assert_eq!(LogLevel::from_str(&lvl.to_string()).unwrap(), lvl);
    }
}

#[test]
fn unknown_names_are_rejected() {
    assert_eq!(LogLevel::parse("loud"), None);
    assert!(LogLevel::from_str("").is_err());
}
