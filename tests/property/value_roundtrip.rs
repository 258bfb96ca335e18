// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Host Value Conversion
//!
//! Converting a host value into a CIM value and back must yield the same
//! host value, and the unsigned wrappers must accept exactly their range.

use cim_provider::domain::{
    Char16, CimDateTime, CimInstance, CimType, CimValue, HostValue, ObjectPath, UnsignedInt16,
    UnsignedInt32, UnsignedInt8,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Scalar host values of every key-capable kind plus reals
fn scalar_host_value() -> impl Strategy<Value = HostValue> {
    prop_oneof![
        any::<bool>().prop_map(HostValue::from),
        any::<u8>().prop_map(HostValue::from),
        any::<i8>().prop_map(HostValue::from),
        any::<u16>().prop_map(HostValue::from),
        any::<i16>().prop_map(HostValue::from),
        any::<u32>().prop_map(HostValue::from),
        any::<i32>().prop_map(HostValue::from),
        any::<u64>().prop_map(HostValue::from),
        any::<i64>().prop_map(HostValue::from),
        prop::num::f32::NORMAL.prop_map(HostValue::from),
        prop::num::f64::NORMAL.prop_map(HostValue::from),
        "[a-zA-Z0-9 ]{0,24}".prop_map(HostValue::from),
    ]
}

/// Valid CIM timestamps and intervals
fn datetime() -> impl Strategy<Value = CimDateTime> {
    let timestamp = (
        1970u32..2100,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
        0u32..1_000_000,
        prop_oneof![Just('+'), Just('-')],
        0u32..=720,
    )
        .prop_map(|(year, month, day, hour, minute, second, micros, sign, offset)| {
            format!(
                "{:04}{:02}{:02}{:02}{:02}{:02}.{:06}{}{:03}",
                year, month, day, hour, minute, second, micros, sign, offset
            )
        });
    let interval = (0u32..100_000_000, 0u32..24, 0u32..60, 0u32..60, 0u32..1_000_000)
        .prop_map(|(days, hour, minute, second, micros)| {
            format!(
                "{:08}{:02}{:02}{:02}.{:06}:000",
                days, hour, minute, second, micros
            )
        });

    prop_oneof![timestamp, interval].prop_map(|text| CimDateTime::new(text).unwrap())
}

/// Keyed instance paths
fn reference() -> impl Strategy<Value = ObjectPath> {
    ("[A-Za-z][A-Za-z0-9_]{0,12}", "[a-zA-Z0-9 ]{0,12}", any::<u8>()).prop_map(
        |(class_name, name, identifier)| {
            ObjectPath::new(class_name)
                .with_namespace("root/SampleProvider")
                .with_key("Name", name)
                .unwrap()
                .with_key("Identifier", identifier)
                .unwrap()
        },
    )
}

/// Small embedded instances
fn embedded_instance() -> impl Strategy<Value = CimInstance> {
    ("[A-Za-z][A-Za-z0-9_]{0,12}", "[a-zA-Z0-9 ]{0,12}", any::<i32>()).prop_map(
        |(class_name, name, count)| {
            CimInstance::new(class_name)
                .with_key_property("Name", name)
                .with_property("Count", count)
        },
    )
}

/// Host values of the non-numeric, non-string CIM types
fn structured_host_value() -> impl Strategy<Value = HostValue> {
    prop_oneof![
        datetime().prop_map(HostValue::from),
        any::<u16>().prop_map(|unit| HostValue::from(Char16::from_code_unit(unit))),
        reference().prop_map(HostValue::from),
        embedded_instance().prop_map(HostValue::from),
    ]
}

/// Non-empty homogeneous sequences
fn homogeneous_sequence() -> impl Strategy<Value = HostValue> {
    prop_oneof![
        prop::collection::vec(any::<u16>(), 1..16).prop_map(HostValue::from),
        prop::collection::vec(any::<i64>(), 1..16).prop_map(HostValue::from),
        prop::collection::vec(any::<bool>(), 1..16).prop_map(HostValue::from),
        prop::collection::vec("[a-z]{0,8}", 1..16).prop_map(HostValue::from),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: scalar conversion is lossless
    #[test]
    fn prop_scalar_round_trip(host in scalar_host_value()) {
        let value = CimValue::construct(host.clone()).unwrap();

        prop_assert!(!value.is_array());
        prop_assert_eq!(value.to_host(false).unwrap(), host.clone());
        prop_assert_eq!(value.to_host(true).unwrap(), host);
    }

    /// Property: datetime, char16, reference and object values convert back unchanged
    #[test]
    fn prop_structured_round_trip(host in structured_host_value()) {
        let value = CimValue::construct(host.clone()).unwrap();
        let expected_type = host.scalar_type().unwrap();

        prop_assert_eq!(value.type_of(), expected_type);
        prop_assert!(!value.is_array());
        prop_assert_eq!(value.to_host(false).unwrap(), host);
    }

    /// Property: arrays of structured values convert back unchanged
    #[test]
    fn prop_structured_array_round_trip(
        dates in prop::collection::vec(datetime(), 1..6),
        paths in prop::collection::vec(reference(), 1..6),
    ) {
        for host in [HostValue::from(dates), HostValue::from(paths)] {
            let value = CimValue::construct(host.clone()).unwrap();
            prop_assert!(value.is_array());
            prop_assert_eq!(value.to_host(true).unwrap(), host.clone());

            let native = value.to_host(false).unwrap();
            prop_assert_eq!(CimValue::construct(native).unwrap(), value);
        }
    }

    /// Property: sequence conversion is lossless when expanded as a sequence
    #[test]
    fn prop_sequence_round_trip(host in homogeneous_sequence()) {
        let value = CimValue::construct(host.clone()).unwrap();

        prop_assert!(value.is_array());
        prop_assert_eq!(value.to_host(true).unwrap(), host);
    }

    /// Property: typed arrays convert back through the typed form
    #[test]
    fn prop_typed_array_round_trip(items in prop::collection::vec(any::<u32>(), 0..16)) {
        let sequence = CimValue::construct(HostValue::from(items.clone()));
        let native = match sequence {
            Ok(value) => value.to_host(false).unwrap(),
            // An empty sequence has no element to dispatch on
            Err(_) => {
                prop_assert!(items.is_empty());
                return Ok(());
            }
        };

        let again = CimValue::construct(native.clone()).unwrap();
        prop_assert_eq!(again.type_of(), CimType::UInt32);
        prop_assert_eq!(again.to_host(false).unwrap(), native);
    }

    /// Property: a sequence whose kinds differ is always rejected
    #[test]
    fn prop_mixed_sequence_rejected(a in any::<u8>(), b in any::<i8>(), first in any::<bool>()) {
        let items = if first {
            vec![HostValue::from(a), HostValue::from(b)]
        } else {
            vec![HostValue::from(b), HostValue::from(a)]
        };
        prop_assert!(CimValue::construct(HostValue::Sequence(items)).is_err());
    }

    /// Property: unsigned wrappers accept exactly [0, 2^n)
    #[test]
    fn prop_unsigned_bounds(value in any::<i64>()) {
        let value = i128::from(value);

        prop_assert_eq!(UnsignedInt8::new(value).is_ok(), (0..=255).contains(&value));
        prop_assert_eq!(UnsignedInt16::new(value).is_ok(), (0..=65_535).contains(&value));
        prop_assert_eq!(
            UnsignedInt32::new(value).is_ok(),
            (0..=i128::from(u32::MAX)).contains(&value)
        );
    }

    /// Property: accepted unsigned values keep their magnitude
    #[test]
    fn prop_unsigned_preserves_value(value in any::<u16>()) {
        let wrapped = UnsignedInt16::new(value).unwrap();
        prop_assert_eq!(wrapped.value(), value);
        prop_assert_eq!(wrapped.to_string(), value.to_string());
    }
}
