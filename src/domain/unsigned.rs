// Copyright (c) 2025 - Cowboy AI, Inc.
//! Unsigned Integer Value Objects with Range Invariants
//!
//! CIM distinguishes unsigned from signed integers of the same width. Each
//! wrapper here accepts any integer magnitude and enforces its range with a
//! mask-then-compare check: the magnitude is masked to the type's width and
//! rejected unless the masked value equals the input. Negative inputs and
//! inputs of 2^n or more never survive the comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::cim_type::CimType;
use super::value::ValueError;

macro_rules! unsigned_value {
    ($(#[$meta:meta])* $name:ident, $repr:ty, $cim_type:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($repr);

        impl $name {
            /// Largest representable value
            pub const MAX: $repr = <$repr>::MAX;

            /// Create from any integer magnitude
            ///
            /// # Invariants
            /// - `0 <= value <= MAX`, checked by masking then comparing
            pub fn new(value: impl Into<i128>) -> Result<Self, ValueError> {
                let value: i128 = value.into();
                let masked = value & (Self::MAX as i128);

                if masked != value {
                    return Err(ValueError::Range {
                        cim_type: $cim_type,
                        value: value.to_string(),
                    });
                }

                Ok(Self(masked as $repr))
            }

            /// Get the native unsigned value
            pub fn value(&self) -> $repr {
                self.0
            }

            /// CIM type represented by this wrapper
            pub fn cim_type() -> CimType {
                $cim_type
            }
        }

        impl From<$repr> for $name {
            fn from(value: $repr) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i128> for $name {
            type Error = ValueError;

            fn try_from(value: i128) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = ValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let magnitude = s.trim().parse::<i128>().map_err(|_| {
                    ValueError::InvalidParameter(format!(
                        "{} is not a valid {} value",
                        s, $cim_type
                    ))
                })?;
                Self::new(magnitude)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

unsigned_value!(
    /// CIM `uint8` value (0..=255)
    UnsignedInt8,
    u8,
    CimType::UInt8
);

unsigned_value!(
    /// CIM `uint16` value (0..=65535)
    UnsignedInt16,
    u16,
    CimType::UInt16
);

unsigned_value!(
    /// CIM `uint32` value (0..=2^32-1)
    UnsignedInt32,
    u32,
    CimType::UInt32
);

unsigned_value!(
    /// CIM `uint64` value (0..=2^64-1)
    UnsignedInt64,
    u64,
    CimType::UInt64
);
