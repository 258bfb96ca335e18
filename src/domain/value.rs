// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM Value Model
//!
//! A [`CimValue`] is either a single [`CimScalar`] or a homogeneous array of
//! scalars sharing one [`CimType`]. Values always carry their declared
//! [`CimDataType`], so an empty array still knows its element type and a
//! bounded array reports its bound.
//!
//! # Construction
//!
//! Values are built from a dynamic [`HostValue`] by a closed dispatch over
//! the host value's kind. Sequences dispatch on their first element and then
//! validate that every element has the same kind.
//!
//! ```rust
//! use cim_provider::domain::{CimType, CimValue, HostValue, UnsignedInt8};
//!
//! let value = CimValue::construct(HostValue::from(vec![1u8, 2, 3])).unwrap();
//! assert!(value.is_array());
//! assert_eq!(value.type_of(), CimType::UInt8);
//!
//! // Heterogeneous sequences are rejected
//! let mixed = HostValue::Sequence(vec![HostValue::from(1u8), HostValue::from("x")]);
//! assert!(CimValue::construct(mixed).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::char16::Char16;
use super::cim_type::{CimDataType, CimType};
use super::datetime::{CimDateTime, DateTimeError};
use super::host::{HostArray, HostValue};
use super::instance::CimInstance;
use super::object_path::ObjectPath;
use super::unsigned::{UnsignedInt16, UnsignedInt32, UnsignedInt64, UnsignedInt8};

/// Value model error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Value out of range for {cim_type}: {value}")]
    Range { cim_type: CimType, value: String },

    #[error("CIMValue: unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error(transparent)]
    DateTime(#[from] DateTimeError),
}

/// Single CIM-typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CimScalar {
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
}

impl CimScalar {
    /// CIM type of this scalar
    pub fn cim_type(&self) -> CimType {
        match self {
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
        }
    }

    /// Convert a scalar host value; sequences, maps and nulls are unsupported
    pub fn from_host(host: HostValue) -> Result<Self, ValueError> {
        Ok(match host {
            HostValue::Boolean(v) => Self::Boolean(v),
            HostValue::UInt8(v) => Self::UInt8(v),
            HostValue::SInt8(v) => Self::SInt8(v),
            HostValue::UInt16(v) => Self::UInt16(v),
            HostValue::SInt16(v) => Self::SInt16(v),
            HostValue::UInt32(v) => Self::UInt32(v),
            HostValue::SInt32(v) => Self::SInt32(v),
            HostValue::UInt64(v) => Self::UInt64(v),
            HostValue::SInt64(v) => Self::SInt64(v),
            HostValue::Real32(v) => Self::Real32(v),
            HostValue::Real64(v) => Self::Real64(v),
            HostValue::Char16(v) => Self::Char16(v),
            HostValue::String(v) => Self::String(v),
            HostValue::DateTime(v) => Self::DateTime(v),
            HostValue::Reference(v) => Self::Reference(v),
            HostValue::Object(v) => Self::Object(v),
            other => return Err(ValueError::UnsupportedType(other.type_name().to_string())),
        })
    }

    /// Convert back to the matching host value
    pub fn to_host(&self) -> HostValue {
        match self {
            Self::Boolean(v) => HostValue::Boolean(*v),
            Self::UInt8(v) => HostValue::UInt8(*v),
            Self::SInt8(v) => HostValue::SInt8(*v),
            Self::UInt16(v) => HostValue::UInt16(*v),
            Self::SInt16(v) => HostValue::SInt16(*v),
            Self::UInt32(v) => HostValue::UInt32(*v),
            Self::SInt32(v) => HostValue::SInt32(*v),
            Self::UInt64(v) => HostValue::UInt64(*v),
            Self::SInt64(v) => HostValue::SInt64(*v),
            Self::Real32(v) => HostValue::Real32(*v),
            Self::Real64(v) => HostValue::Real64(*v),
            Self::Char16(v) => HostValue::Char16(*v),
            Self::String(v) => HostValue::String(v.clone()),
            Self::DateTime(v) => HostValue::DateTime(v.clone()),
            Self::Reference(v) => HostValue::Reference(v.clone()),
            Self::Object(v) => HostValue::Object(v.clone()),
        }
    }

    /// Textual form used in diagnostics
    pub fn render(&self) -> String {
        match self {
            Self::Boolean(true) => "TRUE".to_string(),
            Self::Boolean(false) => "FALSE".to_string(),
            Self::UInt8(v) => v.to_string(),
            Self::SInt8(v) => v.to_string(),
            Self::UInt16(v) => v.to_string(),
            Self::SInt16(v) => v.to_string(),
            Self::UInt32(v) => v.to_string(),
            Self::SInt32(v) => v.to_string(),
            Self::UInt64(v) => v.to_string(),
            Self::SInt64(v) => v.to_string(),
            Self::Real32(v) => v.to_string(),
            Self::Real64(v) => v.to_string(),
            Self::Char16(v) => v.to_string(),
            Self::String(v) => v.clone(),
            Self::DateTime(v) => v.to_string(),
            Self::Reference(v) => v.to_string(),
            Self::Object(v) => v.to_mof(),
        }
    }

    /// Borrow the referenced path if this is a reference
    pub fn as_reference(&self) -> Option<&ObjectPath> {
        match self {
            Self::Reference(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Payload {
    Scalar(CimScalar),
    Array(Vec<CimScalar>),
}

/// CIM-typed scalar or homogeneous array value
///
/// # Invariants
/// - Scalar payloads have the data type's element type and `is_array == false`
/// - Every array element has the data type's element type
/// - Reference elements point at classes the data type accepts
/// - Bounded arrays hold at most `size` elements
///
/// Deserialization rebuilds the value through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCimValue")]
pub struct CimValue {
    data_type: CimDataType,
    payload: Payload,
}

/// Unchecked wire form of [`CimValue`]
#[derive(Deserialize)]
struct RawCimValue {
    data_type: CimDataType,
    payload: Payload,
}

impl TryFrom<RawCimValue> for CimValue {
    type Error = ValueError;

    fn try_from(raw: RawCimValue) -> Result<Self, Self::Error> {
        let value = match raw.payload {
            Payload::Scalar(scalar) => Self::scalar(scalar),
            Payload::Array(elements) => Self::from_elements(raw.data_type.cim_type(), elements)?,
        };
        value.with_data_type(raw.data_type)
    }
}

impl CimValue {
    /// Construct from a dynamic host value
    ///
    /// Scalars dispatch on their kind; sequences dispatch on their first
    /// element and every element must share its kind. Typed host arrays are
    /// homogeneous by construction and are accepted as-is, empty included.
    pub fn construct(host: HostValue) -> Result<Self, ValueError> {
        match host {
            HostValue::Sequence(items) => Self::from_sequence(items),
            HostValue::Array(array) => Ok(Self::from_host_array(array)),
            other => Ok(Self::scalar(CimScalar::from_host(other)?)),
        }
    }

    /// Construct and check the result against a declared data type
    ///
    /// An empty sequence is accepted for array types and yields an empty
    /// array of the declared element type.
    pub fn construct_typed(host: HostValue, data_type: CimDataType) -> Result<Self, ValueError> {
        if data_type.is_array() && matches!(&host, HostValue::Sequence(items) if items.is_empty()) {
            return Ok(Self::empty_array(data_type));
        }

        let value = Self::construct(host)?;
        value.with_data_type(data_type)
    }

    /// Wrap a single scalar
    pub fn scalar(scalar: CimScalar) -> Self {
        Self {
            data_type: CimDataType::scalar(scalar.cim_type()),
            payload: Payload::Scalar(scalar),
        }
    }

    /// Empty array of a declared array type
    pub fn empty_array(data_type: CimDataType) -> Self {
        let data_type = if data_type.is_array() {
            data_type
        } else {
            CimDataType::array(data_type.cim_type())
        };
        Self {
            data_type,
            payload: Payload::Array(Vec::new()),
        }
    }

    /// Build an array from scalars that must all be `element_type`
    pub fn from_elements(element_type: CimType, elements: Vec<CimScalar>) -> Result<Self, ValueError> {
        for (index, element) in elements.iter().enumerate() {
            if element.cim_type() != element_type {
                return Err(ValueError::TypeMismatch {
                    expected: element_type.to_string(),
                    actual: format!("{} at index {}", element.cim_type(), index),
                });
            }
        }
        Ok(Self {
            data_type: CimDataType::array(element_type),
            payload: Payload::Array(elements),
        })
    }

    fn from_sequence(items: Vec<HostValue>) -> Result<Self, ValueError> {
        let first = items
            .first()
            .ok_or_else(|| ValueError::UnsupportedType("empty Sequence".to_string()))?;

        let element_type = first.scalar_type().ok_or_else(|| {
            ValueError::UnsupportedType(format!("Sequence of {}", first.type_name()))
        })?;

        let mut elements = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if item.scalar_type() != Some(element_type) {
                return Err(ValueError::TypeMismatch {
                    expected: element_type.to_string(),
                    actual: format!("{} at index {}", item.type_name(), index),
                });
            }
            elements.push(CimScalar::from_host(item)?);
        }

        Ok(Self {
            data_type: CimDataType::array(element_type),
            payload: Payload::Array(elements),
        })
    }

    fn from_host_array(array: HostArray) -> Self {
        Self {
            data_type: CimDataType::array(array.element_type()),
            payload: Payload::Array(array.into_elements()),
        }
    }

    /// Re-type this value to a declared data type after checking it fits
    pub fn with_data_type(mut self, data_type: CimDataType) -> Result<Self, ValueError> {
        if !self.data_type.same_shape(&data_type) {
            return Err(ValueError::TypeMismatch {
                expected: data_type.to_string(),
                actual: self.data_type.to_string(),
            });
        }

        if data_type.cim_type() == CimType::Reference {
            for path in self.references() {
                if !data_type.accepts_reference_to(path.class_name()) {
                    return Err(ValueError::TypeMismatch {
                        expected: data_type.to_string(),
                        actual: format!("{} ref", path.class_name()),
                    });
                }
            }
        }

        if let Payload::Array(elements) = &self.payload {
            let bound = data_type.size() as usize;
            if bound > 0 && elements.len() > bound {
                return Err(ValueError::InvalidParameter(format!(
                    "{} elements exceed array bound {}",
                    elements.len(),
                    bound
                )));
            }
        }

        self.data_type = data_type;
        Ok(self)
    }

    /// Element type
    pub fn type_of(&self) -> CimType {
        self.data_type.cim_type()
    }

    /// Whether this value is an array
    pub fn is_array(&self) -> bool {
        self.data_type.is_array()
    }

    /// Declared array bound, 0 when unbounded or scalar
    pub fn size_of(&self) -> u32 {
        self.data_type.size()
    }

    /// Full declared data type
    pub fn data_type(&self) -> &CimDataType {
        &self.data_type
    }

    /// Borrow the scalar payload
    pub fn as_scalar(&self) -> Option<&CimScalar> {
        match &self.payload {
            Payload::Scalar(scalar) => Some(scalar),
            Payload::Array(_) => None,
        }
    }

    /// Borrow the array elements
    pub fn elements(&self) -> Option<&[CimScalar]> {
        match &self.payload {
            Payload::Scalar(_) => None,
            Payload::Array(elements) => Some(elements),
        }
    }

    /// Borrow the path of a scalar reference value
    pub fn as_reference(&self) -> Option<&ObjectPath> {
        self.as_scalar().and_then(CimScalar::as_reference)
    }

    /// Borrow the string of a scalar string value
    pub fn as_str(&self) -> Option<&str> {
        match self.as_scalar() {
            Some(CimScalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Every referenced path, scalar or array
    pub fn references(&self) -> impl Iterator<Item = &ObjectPath> {
        let slice: &[CimScalar] = match &self.payload {
            Payload::Scalar(scalar) => std::slice::from_ref(scalar),
            Payload::Array(elements) => elements,
        };
        slice.iter().filter_map(CimScalar::as_reference)
    }

    /// Convert back to a host value
    ///
    /// Arrays become a generic `Sequence` when `expand_arrays_as_sequence`
    /// is set, otherwise the typed native [`HostArray`].
    pub fn to_host(&self, expand_arrays_as_sequence: bool) -> Result<HostValue, ValueError> {
        match &self.payload {
            Payload::Scalar(scalar) => Ok(scalar.to_host()),
            Payload::Array(elements) if expand_arrays_as_sequence => {
                Ok(HostValue::Sequence(elements.iter().map(CimScalar::to_host).collect()))
            }
            Payload::Array(elements) => {
                HostArray::from_elements(self.type_of(), elements).map(HostValue::Array)
            }
        }
    }

    /// Textual form used in diagnostics; not guaranteed to be parseable
    pub fn render(&self) -> String {
        match &self.payload {
            Payload::Scalar(scalar) => scalar.render(),
            Payload::Array(elements) => elements
                .iter()
                .map(CimScalar::render)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for CimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<CimScalar> for CimValue {
    fn from(scalar: CimScalar) -> Self {
        Self::scalar(scalar)
    }
}

macro_rules! scalar_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for CimValue {
                fn from(value: $source) -> Self {
                    Self::scalar(CimScalar::$variant(value.into()))
                }
            }
        )*
    };
}

scalar_from!(
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
);

impl From<CimInstance> for CimValue {
    fn from(instance: CimInstance) -> Self {
        Self::scalar(CimScalar::Object(Box::new(instance)))
    }
}
