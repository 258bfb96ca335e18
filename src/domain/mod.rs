// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM Domain Models
//!
//! The typed CIM value model and the instance model it lives in, as value
//! objects with validation invariants.
//!
//! # Value Objects with Invariants
//!
//! - [`CimType`] / [`CimDataType`] - CIM type tags with array and reference shape
//! - [`UnsignedInt8`] .. [`UnsignedInt64`] - range-checked unsigned integers
//! - [`Char16`] - single UTF-16 code unit
//! - [`CimDateTime`] - 25 character CIM timestamp or interval
//! - [`CimValue`] - scalar or homogeneous array of a single CIM type
//! - [`ObjectPath`] - canonical, case-insensitively comparable instance name
//!
//! # Entities
//!
//! - [`CimInstance`] - class name plus typed properties
//! - [`CimClass`] - schema used to check instances
//!
//! # Host Boundary
//!
//! - [`HostValue`] / [`HostArray`] - dynamic values converted to and from [`CimValue`]

pub mod char16;
pub mod cim_type;
pub mod class;
pub mod datetime;
pub mod host;
pub mod instance;
pub mod invariants;
pub mod object_path;
pub mod unsigned;
pub mod value;

// Re-export value objects
pub use char16::Char16;
pub use cim_type::{CimDataType, CimType};
pub use class::{CimClass, CimPropertyDecl};
pub use datetime::{CimDateTime, DateTimeError};
pub use host::{HostArray, HostValue};
pub use instance::{CimInstance, CimProperty};
pub use invariants::{ValidationError, ValidationResult};
pub use object_path::{KeyBinding, ObjectPath, ObjectPathError};
pub use unsigned::{UnsignedInt16, UnsignedInt32, UnsignedInt64, UnsignedInt8};
pub use value::{CimScalar, CimValue, ValueError};
