//! Property-based tests for leveled_logger using proptest

use leveled_logger::prelude::*;
use leveled_logger::sinks::{JsonSink, LogfmtSink, SharedBuffer};
use proptest::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::Crit),
    ]
}

fn any_format() -> impl Strategy<Value = LogFormat> {
    prop_oneof![
        Just(LogFormat::Logfmt),
        Just(LogFormat::Json),
        Just(LogFormat::Nop),
    ]
}

fn site() -> CallSite {
    CallSite::new("tests/property_tests.rs", 1, "property_tests::site")
}

// ============================================================================
// Level / LogFormat Tests
// ============================================================================

proptest! {
    /// Level tags parse back to the same level, in any case
    #[test]
    fn test_level_tag_roundtrip(level in any_level(), upper in any::<bool>()) {
        let tag = if upper { level.as_str().to_uppercase() } else { level.as_str().to_string() };
        prop_assert_eq!(tag.parse::<Level>().unwrap(), level);
        prop_assert_eq!(format!("{}", level), level.as_str());
    }

    /// Level ordering follows severity
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
    }

    /// Format names and numeric codes agree
    #[test]
    fn test_format_name_and_code(format in any_format()) {
        prop_assert_eq!(format.as_str().parse::<LogFormat>().unwrap(), format);
        prop_assert_eq!(LogFormat::try_from(format as i32).unwrap(), format);
    }

    /// Any other code is rejected
    #[test]
    fn test_unknown_codes_rejected(code in prop::num::i32::ANY.prop_filter("known", |c| !(0..=2).contains(c))) {
        prop_assert!(LogFormat::try_from(code).is_err());
    }
}

// ============================================================================
// Encoding Tests
// ============================================================================

proptest! {
    /// Arbitrary messages stay on one logfmt line
    #[test]
    fn test_logfmt_single_line(msg in any::<String>(), level in any_level()) {
        let buffer = SharedBuffer::new();
        let leveler = Leveler::new(Arc::new(LogfmtSink::new(buffer.clone())));
        leveler.level_at(level, site()).log([("msg", msg.as_str())]);

        let content = buffer.contents();
        prop_assert_eq!(content.matches('\n').count(), 1);
        prop_assert!(content.ends_with('\n'));
        let expected_prefix = format!("level={} ", level);
        prop_assert!(content.starts_with(&expected_prefix));
    }

    /// Arbitrary values survive JSON encoding unchanged
    #[test]
    fn test_json_preserves_values(
        msg in any::<String>(),
        count in any::<i64>(),
        flag in any::<bool>(),
    ) {
        let buffer = SharedBuffer::new();
        let leveler = Leveler::new(Arc::new(JsonSink::new(buffer.clone())));
        leveler.info_at(site()).log([
            ("msg", Binding::from(msg.as_str())),
            ("count", Binding::from(count)),
            ("flag", Binding::from(flag)),
        ]);

        let lines = buffer.lines();
        prop_assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(parsed["msg"].as_str().unwrap(), msg.as_str());
        prop_assert_eq!(parsed["count"].as_i64().unwrap(), count);
        prop_assert_eq!(parsed["flag"].as_bool().unwrap(), flag);
    }
}

// ============================================================================
// Leveler Tests
// ============================================================================

proptest! {
    /// `with` never changes the keys of the Leveler it was called on
    #[test]
    fn test_with_is_persistent(
        base in prop::collection::vec("[a-z]{1,8}", 0..5),
        added in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let root = Leveler::new(Arc::new(leveled_logger::sinks::NopSink))
            .with(base.iter().map(|k| (k.clone(), 1_i32)));
        let before = root.keys();
        let derived = root.with(added.iter().map(|k| (k.clone(), 2_i32)));

        prop_assert_eq!(root.keys(), before.clone());
        let mut expected = before;
        expected.extend(added.iter().cloned());
        prop_assert_eq!(derived.keys(), expected);
    }

    /// A pinned call site always wins over the narrowing site
    #[test]
    fn test_pinned_site_wins(line in 1u32..10_000, level in any_level()) {
        let pinned = CallSite::new("src/origin.rs", line, "origin::f");
        let leveler = Leveler::new(Arc::new(leveled_logger::sinks::NopSink))
            .with_call_site(pinned, Vec::<(String, Binding)>::new());
        prop_assert_eq!(leveler.level_at(level, site()).call_site(), pinned);
    }
}
