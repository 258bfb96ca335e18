// Copyright (c) 2025 - Cowboy AI, Inc.
//! Association Registry
//!
//! In-memory store of the sample provider's instances, keyed by a closed
//! [`SampleClass`] enum. Each class keeps its instances in insertion order,
//! and every enumeration and association query preserves that order.
//!
//! # Invariants
//! - Every stored instance belongs to the class it is filed under
//! - Paths within a class are unique (case-insensitive canonical form)
//! - Returned instances are copies; callers never hold registry originals

pub mod filter;
pub mod seed;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::{CimInstance, ObjectPath};
use crate::errors::{ProviderError, ProviderResult};

/// Classes served by the sample association provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SampleClass {
    Teacher,
    Student,
    TeacherStudent,
    AdvisorStudent,
}

impl SampleClass {
    pub const ALL: [SampleClass; 4] = [
        SampleClass::Teacher,
        SampleClass::Student,
        SampleClass::TeacherStudent,
        SampleClass::AdvisorStudent,
    ];

    /// CIM class name
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Teacher => "Sample_Teacher",
            Self::Student => "Sample_Student",
            Self::TeacherStudent => "Sample_TeacherStudent",
            Self::AdvisorStudent => "Sample_AdvisorStudent",
        }
    }

    /// Resolve a class name ignoring case
    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.class_name().eq_ignore_ascii_case(name))
    }

    pub fn is_association(&self) -> bool {
        self.roles().is_some()
    }

    /// Teacher-side and student-side role names of an association class
    pub fn roles(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::TeacherStudent => Some(("Teaches", "TaughtBy")),
            Self::AdvisorStudent => Some(("Advises", "AdvisedBy")),
            Self::Teacher | Self::Student => None,
        }
    }
}

impl fmt::Display for SampleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

impl FromStr for SampleClass {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_class_name(s).ok_or_else(|| ProviderError::InvalidClass(s.to_string()))
    }
}

/// Instances by class for one namespace
#[derive(Debug, Clone, Default)]
pub struct AssociationRegistry {
    namespace: String,
    instances: HashMap<SampleClass, Vec<CimInstance>>,
}

impl AssociationRegistry {
    /// Empty registry for `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            instances: HashMap::new(),
        }
    }

    /// Registry holding the sample seed data
    pub fn seeded(namespace: impl Into<String>) -> ProviderResult<Self> {
        let mut registry = Self::new(namespace);
        for (class, instance) in seed::seed_instances(&registry.namespace)? {
            registry.insert(class, instance)?;
        }
        Ok(registry)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Instances of `class` in insertion order
    pub fn instances(&self, class: SampleClass) -> &[CimInstance] {
        self.instances.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of stored instances
    pub fn len(&self) -> usize {
        self.instances.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paths of every instance of `class`
    pub fn instance_names(&self, class: SampleClass) -> ProviderResult<Vec<ObjectPath>> {
        self.instances(class)
            .iter()
            .map(|instance| instance.object_path(&self.namespace).map_err(ProviderError::from))
            .collect()
    }

    fn position(&self, class: SampleClass, path: &ObjectPath) -> Option<usize> {
        let local = path.localized(&self.namespace);
        self.instances(class).iter().position(|instance| {
            instance
                .object_path(&self.namespace)
                .map(|candidate| candidate.localized(&self.namespace) == local)
                .unwrap_or(false)
        })
    }

    /// Instance of `class` at `path`, compared in localized form
    pub fn find(&self, class: SampleClass, path: &ObjectPath) -> Option<&CimInstance> {
        self.position(class, path)
            .map(|index| &self.instances(class)[index])
    }

    /// Append an instance, returning its path
    pub fn insert(&mut self, class: SampleClass, instance: CimInstance) -> ProviderResult<ObjectPath> {
        check_membership(class, &instance)?;
        let path = instance.object_path(&self.namespace)?;
        if self.position(class, &path).is_some() {
            return Err(ProviderError::AlreadyExists(path.to_string()));
        }
        self.instances.entry(class).or_default().push(instance);
        Ok(path)
    }

    /// Replace the instance at the new instance's path, keeping its position
    pub fn replace(&mut self, class: SampleClass, instance: CimInstance) -> ProviderResult<()> {
        check_membership(class, &instance)?;
        let path = instance.object_path(&self.namespace)?;
        let index = self
            .position(class, &path)
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))?;
        if let Some(slot) = self.instances.get_mut(&class).and_then(|v| v.get_mut(index)) {
            *slot = instance;
        }
        Ok(())
    }

    /// Remove and return the instance at `path`
    pub fn remove(&mut self, class: SampleClass, path: &ObjectPath) -> ProviderResult<CimInstance> {
        let index = self
            .position(class, path)
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))?;
        self.instances
            .get_mut(&class)
            .map(|instances| instances.remove(index))
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))
    }

    /// Far-end paths of `target` through association class `association`
    pub fn associator_names(
        &self,
        association: SampleClass,
        target: &ObjectPath,
        result_class: Option<&str>,
        role: Option<&str>,
        result_role: Option<&str>,
    ) -> Vec<ObjectPath> {
        filter::associator_names(
            self.instances(association),
            &self.namespace,
            target,
            result_class,
            role,
            result_role,
        )
    }

    /// Copies of the far-end instances; paths with no stored instance are skipped
    pub fn associators(
        &self,
        association: SampleClass,
        target: &ObjectPath,
        result_class: Option<&str>,
        role: Option<&str>,
        result_role: Option<&str>,
        property_list: Option<&[String]>,
    ) -> Vec<CimInstance> {
        self.associator_names(association, target, result_class, role, result_role)
            .iter()
            .filter_map(|path| {
                let class = SampleClass::from_class_name(path.class_name())?;
                self.find(class, path)
            })
            .map(|instance| instance.filter_properties(property_list))
            .collect()
    }

    /// Paths of the association instances referring to `target`
    pub fn reference_names(
        &self,
        association: SampleClass,
        target: &ObjectPath,
        role: Option<&str>,
    ) -> ProviderResult<Vec<ObjectPath>> {
        Ok(filter::reference_names(
            self.instances(association),
            &self.namespace,
            target,
            role,
        )?)
    }

    /// Copies of the association instances referring to `target`
    pub fn references(
        &self,
        association: SampleClass,
        target: &ObjectPath,
        role: Option<&str>,
        property_list: Option<&[String]>,
    ) -> Vec<CimInstance> {
        filter::filter_by_role(self.instances(association), &self.namespace, target, role)
            .into_iter()
            .map(|instance| instance.filter_properties(property_list))
            .collect()
    }
}

fn check_membership(class: SampleClass, instance: &CimInstance) -> ProviderResult<()> {
    if !instance.class_name().eq_ignore_ascii_case(class.class_name()) {
        return Err(ProviderError::InvalidClass(format!(
            "instance of {} filed under {}",
            instance.class_name(),
            class
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CimProperty;
    use pretty_assertions::assert_eq;

    const NS: &str = "root/SampleProvider";

    fn registry() -> AssociationRegistry {
        AssociationRegistry::seeded(NS).unwrap()
    }

    fn path_of(instance: CimInstance) -> ObjectPath {
        instance.build_path(NS).unwrap()
    }

    #[test]
    fn test_class_names_resolve_ignoring_case() {
        assert_eq!(
            SampleClass::from_class_name("sample_teacherstudent"),
            Some(SampleClass::TeacherStudent)
        );
        assert_eq!(SampleClass::from_class_name("Sample_Course"), None);
        assert!(matches!(
            "Sample_Course".parse::<SampleClass>(),
            Err(ProviderError::InvalidClass(name)) if name == "Sample_Course"
        ));
    }

    #[test]
    fn test_seeded_registry() {
        let registry = registry();
        assert_eq!(registry.len(), 18);
        assert_eq!(registry.instance_names(SampleClass::Teacher).unwrap().len(), 4);
    }

    #[test]
    fn test_find_localizes_path() {
        let registry = registry();
        let remote = path_of(seed::student(2)).with_host("cimom").with_namespace("elsewhere");
        let found = registry.find(SampleClass::Student, &remote).unwrap();
        assert_eq!(found, &seed::student(2));
        assert!(registry.find(SampleClass::Student, &path_of(seed::student(9))).is_none());
    }

    #[test]
    fn test_teacher1_associators() {
        let registry = registry();
        let names = registry.associator_names(
            SampleClass::TeacherStudent,
            &path_of(seed::teacher(1)),
            None,
            None,
            None,
        );
        assert_eq!(
            names,
            vec![
                path_of(seed::student(1)),
                path_of(seed::student(2)),
                path_of(seed::student(3)),
            ]
        );
    }

    #[test]
    fn test_associators_return_copies() {
        let registry = registry();
        let mut copies = registry.associators(
            SampleClass::AdvisorStudent,
            &path_of(seed::teacher(1)),
            None,
            None,
            None,
            None,
        );
        assert_eq!(copies, vec![seed::student(1), seed::student(2)]);

        copies[0].set_property(CimProperty::new("Name", "Mutated").as_key());
        assert_eq!(
            registry.instances(SampleClass::Student)[0],
            seed::student(1)
        );
    }

    #[test]
    fn test_insert_replace_remove() {
        let mut registry = registry();
        let newcomer = seed::student(4);

        let path = registry.insert(SampleClass::Student, newcomer.clone()).unwrap();
        assert!(matches!(
            registry.insert(SampleClass::Student, newcomer.clone()),
            Err(ProviderError::AlreadyExists(_))
        ));

        let updated = newcomer.clone().with_property("Nickname", "Four");
        registry.replace(SampleClass::Student, updated.clone()).unwrap();
        assert_eq!(registry.find(SampleClass::Student, &path), Some(&updated));

        assert_eq!(registry.remove(SampleClass::Student, &path).unwrap(), updated);
        assert!(matches!(
            registry.remove(SampleClass::Student, &path),
            Err(ProviderError::NotFound(_))
        ));
        assert!(matches!(
            registry.insert(SampleClass::Teacher, seed::student(5)),
            Err(ProviderError::InvalidClass(_))
        ));
    }
}
