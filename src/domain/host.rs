// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Dynamic Values
//!
//! [`HostValue`] is the dynamically typed value a caller hands to the value
//! model. It covers every shape with a CIM mapping plus a few shapes
//! (`Null`, `Map`) that have none, so unsupported input can be expressed and
//! rejected explicitly. [`HostArray`] is the typed native array form.

use std::collections::BTreeMap;

use super::char16::Char16;
use super::cim_type::CimType;
use super::datetime::CimDateTime;
use super::instance::CimInstance;
use super::object_path::ObjectPath;
use super::unsigned::{UnsignedInt16, UnsignedInt32, UnsignedInt64, UnsignedInt8};
use super::value::{CimScalar, ValueError};

/// Dynamically typed host value
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Boolean(bool),
    UInt8(UnsignedInt8),
    SInt8(i8),
    UInt16(UnsignedInt16),
    SInt16(i16),
    UInt32(UnsignedInt32),
    SInt32(i32),
    UInt64(UnsignedInt64),
    SInt64(i64),
    Real32(f32),
    Real64(f64),
    Char16(Char16),
    String(String),
    DateTime(CimDateTime),
    Reference(ObjectPath),
    Object(Box<CimInstance>),
    /// Generic ordered container; element kinds are checked on construction
    Sequence(Vec<HostValue>),
    /// Typed native array
    Array(HostArray),
    /// Keyed container with no CIM mapping
    Map(BTreeMap<String, HostValue>),
}

impl HostValue {
    /// Runtime type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean(_) => "bool",
            Self::UInt8(_) => "UnsignedInt8",
            Self::SInt8(_) => "i8",
            Self::UInt16(_) => "UnsignedInt16",
            Self::SInt16(_) => "i16",
            Self::UInt32(_) => "UnsignedInt32",
            Self::SInt32(_) => "i32",
            Self::UInt64(_) => "UnsignedInt64",
            Self::SInt64(_) => "i64",
            Self::Real32(_) => "f32",
            Self::Real64(_) => "f64",
            Self::Char16(_) => "Char16",
            Self::String(_) => "String",
            Self::DateTime(_) => "CimDateTime",
            Self::Reference(_) => "ObjectPath",
            Self::Object(_) => "CimInstance",
            Self::Sequence(_) => "Sequence",
            Self::Array(_) => "HostArray",
            Self::Map(_) => "Map",
        }
    }

    /// CIM type of a scalar host value, `None` for containers and nulls
    pub fn scalar_type(&self) -> Option<CimType> {
        Some(match self {
            Self::Boolean(_) => CimType::Boolean,
            Self::UInt8(_) => CimType::UInt8,
            Self::SInt8(_) => CimType::SInt8,
            Self::UInt16(_) => CimType::UInt16,
            Self::SInt16(_) => CimType::SInt16,
            Self::UInt32(_) => CimType::UInt32,
            Self::SInt32(_) => CimType::SInt32,
            Self::UInt64(_) => CimType::UInt64,
            Self::SInt64(_) => CimType::SInt64,
            Self::Real32(_) => CimType::Real32,
            Self::Real64(_) => CimType::Real64,
            Self::Char16(_) => CimType::Char16,
            Self::String(_) => CimType::String,
            Self::DateTime(_) => CimType::DateTime,
            Self::Reference(_) => CimType::Reference,
            Self::Object(_) => CimType::Object,
            Self::Null | Self::Sequence(_) | Self::Array(_) | Self::Map(_) => return None,
        })
    }
}

/// Typed native array
#[derive(Debug, Clone, PartialEq)]
pub enum HostArray {
    Boolean(Vec<bool>),
    UInt8(Vec<UnsignedInt8>),
    SInt8(Vec<i8>),
    UInt16(Vec<UnsignedInt16>),
    SInt16(Vec<i16>),
    UInt32(Vec<UnsignedInt32>),
    SInt32(Vec<i32>),
    UInt64(Vec<UnsignedInt64>),
    SInt64(Vec<i64>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
    Char16(Vec<Char16>),
    String(Vec<String>),
    DateTime(Vec<CimDateTime>),
    Reference(Vec<ObjectPath>),
    Object(Vec<CimInstance>),
}

macro_rules! typed_arrays {
    ($($variant:ident),* $(,)?) => {
        impl HostArray {
            /// Element type of this array
            pub fn element_type(&self) -> CimType {
                match self {
                    $(Self::$variant(_) => CimType::$variant,)*
                    Self::Object(_) => CimType::Object,
                }
            }

            /// Number of elements
            pub fn len(&self) -> usize {
                match self {
                    $(Self::$variant(v) => v.len(),)*
                    Self::Object(v) => v.len(),
                }
            }

            /// Check if the array has no elements
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Unpack into CIM scalars
            pub fn into_elements(self) -> Vec<CimScalar> {
                match self {
                    $(Self::$variant(v) => v.into_iter().map(CimScalar::$variant).collect(),)*
                    Self::Object(v) => v
                        .into_iter()
                        .map(|instance| CimScalar::Object(Box::new(instance)))
                        .collect(),
                }
            }

            /// Pack scalars that must all be `element_type`
            pub fn from_elements(
                element_type: CimType,
                elements: &[CimScalar],
            ) -> Result<Self, ValueError> {
                let mismatch = |index: usize, found: &CimScalar| ValueError::Conversion(format!(
                    "{} array element {} holds {}",
                    element_type,
                    index,
                    found.cim_type()
                ));

                match element_type {
                    $(CimType::$variant => elements
                        .iter()
                        .enumerate()
                        .map(|(index, element)| match element {
                            CimScalar::$variant(v) => Ok(v.clone()),
                            other => Err(mismatch(index, other)),
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map(Self::$variant),)*
                    CimType::Object => elements
                        .iter()
                        .enumerate()
                        .map(|(index, element)| match element {
                            CimScalar::Object(v) => Ok(v.as_ref().clone()),
                            other => Err(mismatch(index, other)),
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map(Self::Object),
                }
            }
        }
    };
}

typed_arrays!(
    Boolean, UInt8, SInt8, UInt16, SInt16, UInt32, SInt32, UInt64, SInt64, Real32, Real64,
    Char16, String, DateTime, Reference,
);

macro_rules! host_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for HostValue {
                fn from(value: $source) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

host_from!(
    bool => Boolean,
    u8 => UInt8,
    i8 => SInt8,
    u16 => UInt16,
    i16 => SInt16,
    u32 => UInt32,
    i32 => SInt32,
    u64 => UInt64,
    i64 => SInt64,
    f32 => Real32,
    f64 => Real64,
    UnsignedInt8 => UInt8,
    UnsignedInt16 => UInt16,
    UnsignedInt32 => UInt32,
    UnsignedInt64 => UInt64,
    Char16 => Char16,
    String => String,
    &str => String,
    CimDateTime => DateTime,
    ObjectPath => Reference,
    HostArray => Array,
);

impl From<CimInstance> for HostValue {
    fn from(instance: CimInstance) -> Self {
        Self::Object(Box::new(instance))
    }
}

impl<T: Into<HostValue>> From<Vec<T>> for HostValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}
