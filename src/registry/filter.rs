// Copyright (c) 2025 - Cowboy AI, Inc.
//! Association Filter Engine
//!
//! Pure functions over a slice of association instances. Each function
//! preserves the slice order; nothing is sorted.
//!
//! # Filters
//!
//! - `role` keeps association instances where a reference property with that
//!   name points at the target
//! - `result_role` / `result_class` narrow the far ends of the kept instances
//!
//! A `None` or empty filter matches everything. Names compare ignoring case.
//! Paths compare in localized form (host cleared, provider namespace).

use crate::domain::{CimInstance, ObjectPath, ObjectPathError};

/// Check a property or class name against an optional filter
pub fn matches_filter(filter: Option<&str>, name: &str) -> bool {
    match filter {
        None => true,
        Some(f) if f.is_empty() => true,
        Some(f) => f.eq_ignore_ascii_case(name),
    }
}

/// Association instances with a reference matching `role` that points at `target`
///
/// Each instance appears at most once, however many of its references match.
pub fn filter_by_role<'a>(
    associations: &'a [CimInstance],
    namespace: &str,
    target: &ObjectPath,
    role: Option<&str>,
) -> Vec<&'a CimInstance> {
    let target = target.localized(namespace);
    associations
        .iter()
        .filter(|association| {
            association.reference_properties().any(|(name, path)| {
                matches_filter(role, name) && path.localized(namespace) == target
            })
        })
        .collect()
}

/// Far-end paths of one association instance
///
/// Every reference not equal to `target` whose property name matches
/// `result_role` and whose class matches `result_class`.
pub fn result_paths(
    association: &CimInstance,
    namespace: &str,
    target: &ObjectPath,
    result_class: Option<&str>,
    result_role: Option<&str>,
) -> Vec<ObjectPath> {
    let target = target.localized(namespace);
    association
        .reference_properties()
        .filter(|(name, path)| {
            path.localized(namespace) != target
                && matches_filter(result_role, name)
                && matches_filter(result_class, path.class_name())
        })
        .map(|(_, path)| path.clone())
        .collect()
}

/// Paths of the instances associated with `target`
pub fn associator_names(
    associations: &[CimInstance],
    namespace: &str,
    target: &ObjectPath,
    result_class: Option<&str>,
    role: Option<&str>,
    result_role: Option<&str>,
) -> Vec<ObjectPath> {
    filter_by_role(associations, namespace, target, role)
        .into_iter()
        .flat_map(|association| {
            result_paths(association, namespace, target, result_class, result_role)
        })
        .collect()
}

/// Paths of the association instances that refer to `target`
pub fn reference_names(
    associations: &[CimInstance],
    namespace: &str,
    target: &ObjectPath,
    role: Option<&str>,
) -> Result<Vec<ObjectPath>, ObjectPathError> {
    filter_by_role(associations, namespace, target, role)
        .into_iter()
        .map(|association| association.object_path(namespace))
        .collect()
}
