// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM Type Taxonomy
//!
//! Defines the closed set of CIM intrinsic types and the declared data type
//! of a property or value (element type, array-ness, array bound and, for
//! references, the referenced class).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CIM intrinsic type
///
/// Every CIM property, key and value is typed by exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CimType {
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 8-bit integer
    SInt8,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 16-bit integer
    SInt16,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 32-bit integer
    SInt32,
    /// Unsigned 64-bit integer
    UInt64,
    /// Signed 64-bit integer
    SInt64,
    /// UCS-2 string
    String,
    /// Boolean
    Boolean,
    /// IEEE 754 single precision
    Real32,
    /// IEEE 754 double precision
    Real64,
    /// CIM datetime (timestamp or interval)
    DateTime,
    /// Single UTF-16 code unit
    Char16,
    /// Embedded object
    Object,
    /// Reference to another instance (object path)
    Reference,
}

impl CimType {
    /// All CIM types in declaration order
    pub const ALL: [CimType; 16] = [
        Self::UInt8,
        Self::SInt8,
        Self::UInt16,
        Self::SInt16,
        Self::UInt32,
        Self::SInt32,
        Self::UInt64,
        Self::SInt64,
        Self::String,
        Self::Boolean,
        Self::Real32,
        Self::Real64,
        Self::DateTime,
        Self::Char16,
        Self::Object,
        Self::Reference,
    ];

    /// Get the canonical (MOF) type name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UInt8 => "uint8",
            Self::SInt8 => "sint8",
            Self::UInt16 => "uint16",
            Self::SInt16 => "sint16",
            Self::UInt32 => "uint32",
            Self::SInt32 => "sint32",
            Self::UInt64 => "uint64",
            Self::SInt64 => "sint64",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Real32 => "real32",
            Self::Real64 => "real64",
            Self::DateTime => "datetime",
            Self::Char16 => "char16",
            Self::Object => "object",
            Self::Reference => "reference",
        }
    }

    /// Check if this is one of the integer types
    pub fn is_integer(&self) -> bool {
        self.is_unsigned() || self.is_signed()
    }

    /// Check if this is an unsigned integer type
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    /// Check if this is a signed integer type
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::SInt8 | Self::SInt16 | Self::SInt32 | Self::SInt64
        )
    }

    /// Check if this is a floating point type
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real32 | Self::Real64)
    }

    /// Check if values of this type may appear as object path keys
    pub fn is_key_type(&self) -> bool {
        !matches!(self, Self::Object | Self::Real32 | Self::Real64)
    }
}

impl fmt::Display for CimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CimType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let name = if lower == "ref" { "reference" } else { lower.as_str() };

        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| format!("Unknown CIM type: {}", s))
    }
}

/// Declared data type of a CIM property or value
///
/// # Invariants
/// - `size` is only present for arrays
/// - A `Reference` type always carries a referenced class name; an empty
///   name means "any class"
/// - Non-reference types never carry a referenced class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CimDataType {
    cim_type: CimType,
    is_array: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    reference_class: Option<String>,
}

impl CimDataType {
    /// Scalar data type
    pub fn scalar(cim_type: CimType) -> Self {
        Self {
            cim_type,
            is_array: false,
            size: None,
            reference_class: Self::default_reference_class(cim_type),
        }
    }

    /// Unbounded array data type
    pub fn array(cim_type: CimType) -> Self {
        Self {
            cim_type,
            is_array: true,
            size: None,
            reference_class: Self::default_reference_class(cim_type),
        }
    }

    /// Bounded array data type
    pub fn bounded_array(cim_type: CimType, size: u32) -> Self {
        Self {
            size: Some(size),
            ..Self::array(cim_type)
        }
    }

    /// Scalar reference to instances of `class_name` (empty for any class)
    pub fn reference(class_name: impl Into<String>) -> Self {
        Self {
            cim_type: CimType::Reference,
            is_array: false,
            size: None,
            reference_class: Some(class_name.into()),
        }
    }

    /// Array of references to instances of `class_name` (empty for any class)
    pub fn reference_array(class_name: impl Into<String>) -> Self {
        Self {
            is_array: true,
            ..Self::reference(class_name)
        }
    }

    fn default_reference_class(cim_type: CimType) -> Option<String> {
        (cim_type == CimType::Reference).then(String::new)
    }

    /// Element type
    pub fn cim_type(&self) -> CimType {
        self.cim_type
    }

    /// Whether this is an array type
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Array bound, 0 when unbounded or scalar
    pub fn size(&self) -> u32 {
        self.size.unwrap_or(0)
    }

    /// Referenced class for reference types
    pub fn reference_class(&self) -> Option<&str> {
        self.reference_class.as_deref()
    }

    /// Check whether a path of class `class_name` may be stored in this type
    pub fn accepts_reference_to(&self, class_name: &str) -> bool {
        match self.reference_class.as_deref() {
            Some("") => true,
            Some(expected) => expected.eq_ignore_ascii_case(class_name),
            None => false,
        }
    }

    /// Same element type and array-ness, ignoring bounds and reference class
    pub fn same_shape(&self, other: &CimDataType) -> bool {
        self.cim_type == other.cim_type && self.is_array == other.is_array
    }
}

impl fmt::Display for CimDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reference_class.as_deref() {
            Some("") | None => write!(f, "{}", self.cim_type)?,
            Some(class) => write!(f, "{} ref", class)?,
        }
        match (self.is_array, self.size) {
            (true, Some(size)) => write!(f, "[{}]", size),
            (true, None) => write!(f, "[]"),
            (false, _) => Ok(()),
        }
    }
}

impl From<CimType> for CimDataType {
    fn from(cim_type: CimType) -> Self {
        Self::scalar(cim_type)
    }
}
