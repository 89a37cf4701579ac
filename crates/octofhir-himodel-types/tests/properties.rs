//! Property tests for literal round-trips and truncation

use octofhir_himodel_types::*;
use proptest::prelude::*;

fn offset_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Z".to_string()),
        (prop::bool::ANY, 0u32..14, 0u32..60).prop_map(|(east, h, m)| {
            format!("{}{:02}:{:02}", if east { '+' } else { '-' }, h, m)
        })
        .prop_filter("zero offset renders as Z", |o| &o[1..] != "00:00"),
        Just("+14:00".to_string()),
    ]
}

/// A date-time literal at any precision in canonical form
fn date_time_literal() -> impl Strategy<Value = String> {
    (
        1u32..=9999,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
        0u32..1_000_000_000,
        offset_literal(),
        0usize..6,
    )
        .prop_map(|(y, mo, d, h, mi, s, ns, offset, depth)| match depth {
            0 => format!("{:04}", y),
            1 => format!("{:04}-{:02}", y, mo),
            2 => format!("{:04}-{:02}-{:02}", y, mo, d),
            3 => format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}", y, mo, d, h, mi, s, offset),
            _ => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}{}",
                y, mo, d, h, mi, s, ns, offset
            ),
        })
}

fn time_literal() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60, 0u32..60, 0u32..1_000_000_000, 0usize..4).prop_map(
        |(h, m, s, ns, depth)| match depth {
            0 => format!("{:02}", h),
            1 => format!("{:02}:{:02}", h, m),
            2 => format!("{:02}:{:02}:{:02}", h, m, s),
            _ => format!("{:02}:{:02}:{:02}.{:09}", h, m, s, ns),
        },
    )
}

fn precision() -> impl Strategy<Value = DateTimePrecision> {
    prop::sample::select(DateTimePrecision::ALL.to_vec())
}

proptest! {
    #[test]
    fn date_time_round_trips(literal in date_time_literal()) {
        let parsed = FhirDateTime::parse(&literal).unwrap();
        prop_assert_eq!(parsed.to_string(), literal);
    }

    #[test]
    fn fluent_time_round_trips(literal in time_literal()) {
        let parsed = FhirTime::parse_fluent(&literal).unwrap();
        prop_assert_eq!(parsed.to_string(), literal);
    }

    #[test]
    fn date_round_trips(y in 1i32..=9999, m in 1u32..=12, d in 1u32..=31, depth in 0usize..3) {
        let literal = match depth {
            0 => format!("{:04}", y),
            1 => format!("{:04}-{:02}", y, m),
            _ => format!("{:04}-{:02}-{:02}", y, m, d),
        };
        prop_assert_eq!(FhirDate::parse(&literal).unwrap().to_string(), literal);
    }

    #[test]
    fn truncation_zeroes_only_lower_fields(literal in date_time_literal(), target in precision()) {
        let source = FhirDateTime::parse(&literal).unwrap();
        let truncated = source.truncate(target);
        let kept = |p: DateTimePrecision| truncated.precision() >= p;

        prop_assert_eq!(truncated.precision(), target.min(source.precision()));
        prop_assert_eq!(truncated.year(), source.year());
        prop_assert_eq!(truncated.month(), if kept(DateTimePrecision::Month) { source.month() } else { 1 });
        prop_assert_eq!(truncated.day(), if kept(DateTimePrecision::Day) { source.day() } else { 1 });
        prop_assert_eq!(truncated.hour(), if kept(DateTimePrecision::Hour) { source.hour() } else { 0 });
        prop_assert_eq!(truncated.minute(), if kept(DateTimePrecision::Minute) { source.minute() } else { 0 });
        prop_assert_eq!(truncated.second(), if kept(DateTimePrecision::Second) { source.second() } else { 0 });
        prop_assert_eq!(
            truncated.nanosecond(),
            if kept(DateTimePrecision::Nanosecond) { source.nanosecond() } else { 0 }
        );
    }

    #[test]
    fn truncated_literal_is_a_prefix(literal in date_time_literal(), target in precision()) {
        let source = FhirDateTime::parse(&literal).unwrap();
        let truncated = source.truncate(target).to_string();
        if !truncated.contains('T') {
            prop_assert!(literal.starts_with(&truncated));
        }
    }

    #[test]
    fn equal_implies_equivalent(left in time_literal(), right in time_literal()) {
        let left = FhirValue::from(FhirTime::parse_fluent(&left).unwrap());
        let right = FhirValue::from(FhirTime::parse_fluent(&right).unwrap());
        if left.equal(&right) {
            prop_assert!(left.equivalent(&right));
        }
    }

    #[test]
    fn decimal_equivalence_ignores_trailing_zeros(units in -100_000i64..100_000, zeros in 0usize..5) {
        let plain = FhirDecimal::parse(&format!("{}.5", units)).unwrap();
        let padded = FhirDecimal::parse(&format!("{}.5{}", units, "0".repeat(zeros))).unwrap();
        prop_assert!(FhirValue::from(plain).equivalent(&padded.into()));
    }

    #[test]
    fn wide_decimal_literals_round_trip(
        negative in prop::bool::ANY,
        units in "[1-9][0-9]{0,40}",
        fraction in "[0-9]{1,40}",
    ) {
        let literal = format!("{}{}.{}", if negative { "-" } else { "" }, units, fraction);
        prop_assert_eq!(FhirDecimal::parse(&literal).unwrap().to_string(), literal);
    }
}
