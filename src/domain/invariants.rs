// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Domain Invariants
//!
//! Naming rules for CIM identifiers and the schema checks applied to
//! instances against their class definitions.
//!
//! # Invariant Categories
//!
//! 1. **Lexical Invariants**: legal CIM names, namespaces and hosts
//! 2. **Schema Invariants**: instance properties declared by the class with
//!    matching types, key properties present
//! 3. **Association Invariants**: association classes carry at least two
//!    reference properties
//!
//! All functions are pure and return detailed validation results.

use super::class::CimClass;
use super::instance::{CimInstance, CimProperty};
use super::CimType;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Identifier is not a legal CIM name
    #[error("Illegal CIM name: {0:?}")]
    InvalidName(String),

    /// Namespace is not a '/'-separated list of legal names
    #[error("Illegal namespace name: {0:?}")]
    InvalidNamespace(String),

    /// Host segment contains illegal characters
    #[error("Illegal host name: {0:?}")]
    InvalidHost(String),

    /// Instance class differs from the class it is checked against
    #[error("Instance of {actual} checked against class {expected}")]
    ClassMismatch { expected: String, actual: String },

    /// Instance carries a property its class does not declare
    #[error("Property {property} is not declared by class {class_name}")]
    UndeclaredProperty { class_name: String, property: String },

    /// Property value type differs from the declared type
    #[error("Property {property} declared as {declared}, found {actual}")]
    PropertyTypeMismatch {
        property: String,
        declared: String,
        actual: String,
    },

    /// Key property absent or without a value
    #[error("Key property {key} of class {class_name} has no value")]
    MissingKey { class_name: String, key: String },

    /// Class used as an association is not one
    #[error("Class {0} is not an association")]
    NotAnAssociation(String),

    /// Two properties share a name ignoring case
    #[error("Property {property} appears more than once in {class_name}")]
    DuplicateProperty { class_name: String, property: String },
}

/// Check whether `name` is a legal CIM name
///
/// # Rules
/// - Non-empty
/// - First character is a letter, '_' or non-ASCII
/// - Remaining characters are alphanumeric, '_' or non-ASCII
pub fn is_legal_cim_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || !first.is_ascii() => chars
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()),
        _ => false,
    }
}

/// Validate a class, property or key name
pub fn validate_cim_name(name: &str) -> ValidationResult {
    if !is_legal_cim_name(name) {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Validate a namespace name
///
/// # Rules
/// - One or more '/'-separated segments
/// - Each segment non-empty, alphanumeric or '_'
pub fn validate_namespace(namespace: &str) -> ValidationResult {
    let legal = !namespace.is_empty()
        && namespace.split('/').all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if !legal {
        return Err(ValidationError::InvalidNamespace(namespace.to_string()));
    }
    Ok(())
}

/// Validate a host segment (`name[:port]`, IPv6 literals in brackets)
pub fn validate_host(host: &str) -> ValidationResult {
    let legal = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ':' | '_' | '[' | ']'));

    if !legal {
        return Err(ValidationError::InvalidHost(host.to_string()));
    }
    Ok(())
}

/// Validate the property list of an instance on its own
///
/// # Rules
/// - Class and property names are legal CIM names
/// - Property names are unique ignoring case
/// - Every value has the shape of its property's data type
pub fn validate_instance_properties(class_name: &str, properties: &[CimProperty]) -> ValidationResult {
    validate_cim_name(class_name)?;

    for (index, property) in properties.iter().enumerate() {
        validate_cim_name(property.name())?;

        if properties[..index]
            .iter()
            .any(|earlier| earlier.name().eq_ignore_ascii_case(property.name()))
        {
            return Err(ValidationError::DuplicateProperty {
                class_name: class_name.to_string(),
                property: property.name().to_string(),
            });
        }

        if let Some(value) = property.value() {
            if !value.data_type().same_shape(property.data_type()) {
                return Err(ValidationError::PropertyTypeMismatch {
                    property: property.name().to_string(),
                    declared: property.data_type().to_string(),
                    actual: value.data_type().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Validate an instance against its class definition
///
/// # Rules
/// - Instance class name equals the class name (ignoring case)
/// - Every property is declared by the class
/// - Every property value has the declared type shape, and references
///   point at the declared referenced class
/// - Every key property declared by the class has a value
pub fn validate_instance_against_class(instance: &CimInstance, class: &CimClass) -> ValidationResult {
    if !instance.class_name().eq_ignore_ascii_case(class.class_name()) {
        return Err(ValidationError::ClassMismatch {
            expected: class.class_name().to_string(),
            actual: instance.class_name().to_string(),
        });
    }

    for property in instance.properties() {
        let declared = class.property(property.name()).ok_or_else(|| {
            ValidationError::UndeclaredProperty {
                class_name: class.class_name().to_string(),
                property: property.name().to_string(),
            }
        })?;

        let Some(value) = property.value() else {
            continue;
        };

        let mismatch = || ValidationError::PropertyTypeMismatch {
            property: property.name().to_string(),
            declared: declared.data_type().to_string(),
            actual: value.data_type().to_string(),
        };

        if !value.data_type().same_shape(declared.data_type()) {
            return Err(mismatch());
        }
        if value.type_of() == CimType::Reference
            && !value
                .references()
                .all(|path| declared.data_type().accepts_reference_to(path.class_name()))
        {
            return Err(mismatch());
        }
    }

    for key in class.key_properties() {
        let present = instance
            .property(key.name())
            .map(|p| p.value().is_some())
            .unwrap_or(false);
        if !present {
            return Err(ValidationError::MissingKey {
                class_name: class.class_name().to_string(),
                key: key.name().to_string(),
            });
        }
    }

    Ok(())
}

/// Validate that a class can serve as an association
///
/// # Rules
/// - Flagged as an association
/// - Declares at least two scalar reference properties
pub fn validate_association_class(class: &CimClass) -> ValidationResult {
    let roles = class
        .properties()
        .iter()
        .filter(|p| p.data_type().cim_type() == CimType::Reference && !p.data_type().is_array())
        .count();

    if !class.is_association() || roles < 2 {
        return Err(ValidationError::NotAnAssociation(class.class_name().to_string()));
    }
    Ok(())
}
