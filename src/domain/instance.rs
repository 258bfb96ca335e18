// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM Instance Entity
//!
//! An instance is a class name plus an ordered list of named, typed
//! properties. Its object path is either set explicitly or derived from the
//! key properties.
//!
//! # Invariants
//! - Property names are unique ignoring case
//! - Setting an existing property replaces it in place, keeping its position

use serde::{Deserialize, Serialize};

use super::cim_type::{CimDataType, CimType};
use super::invariants::{validate_instance_properties, ValidationError};
use super::object_path::{ObjectPath, ObjectPathError};
use super::value::CimValue;

/// Named, typed property of an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CimProperty {
    name: String,
    data_type: CimDataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<CimValue>,
    #[serde(default)]
    is_key: bool,
}

impl CimProperty {
    /// Property holding `value`; the data type is taken from the value
    pub fn new(name: impl Into<String>, value: impl Into<CimValue>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            data_type: value.data_type().clone(),
            value: Some(value),
            is_key: false,
        }
    }

    /// Declared property without a value
    pub fn null(name: impl Into<String>, data_type: CimDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            value: None,
            is_key: false,
        }
    }

    /// Builder: mark as a key property
    pub fn as_key(mut self) -> Self {
        self.is_key = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &CimDataType {
        &self.data_type
    }

    pub fn value(&self) -> Option<&CimValue> {
        self.value.as_ref()
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    /// Check if this property holds a scalar reference
    pub fn is_reference(&self) -> bool {
        self.data_type.cim_type() == CimType::Reference && !self.data_type.is_array()
    }

    /// Referenced path of a scalar reference property
    pub fn reference(&self) -> Option<&ObjectPath> {
        self.value.as_ref().and_then(CimValue::as_reference)
    }
}

/// CIM instance
///
/// Deserialized instances are checked with
/// [`validate_instance_properties`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCimInstance")]
pub struct CimInstance {
    class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    object_path: Option<ObjectPath>,
    properties: Vec<CimProperty>,
}

/// Unchecked wire form of [`CimInstance`]
#[derive(Deserialize)]
struct RawCimInstance {
    class_name: String,
    #[serde(default)]
    object_path: Option<ObjectPath>,
    properties: Vec<CimProperty>,
}

impl TryFrom<RawCimInstance> for CimInstance {
    type Error = ValidationError;

    fn try_from(raw: RawCimInstance) -> Result<Self, Self::Error> {
        validate_instance_properties(&raw.class_name, &raw.properties)?;
        Ok(Self {
            class_name: raw.class_name,
            object_path: raw.object_path,
            properties: raw.properties,
        })
    }
}

impl CimInstance {
    /// Create an instance with no properties
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            object_path: None,
            properties: Vec::new(),
        }
    }

    /// Builder: set a non-key property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<CimValue>) -> Self {
        self.set_property(CimProperty::new(name, value));
        self
    }

    /// Builder: set a key property
    pub fn with_key_property(mut self, name: impl Into<String>, value: impl Into<CimValue>) -> Self {
        self.set_property(CimProperty::new(name, value).as_key());
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn properties(&self) -> &[CimProperty] {
        &self.properties
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Look up a property ignoring case
    pub fn property(&self, name: &str) -> Option<&CimProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Look up a property value ignoring case
    pub fn property_value(&self, name: &str) -> Option<&CimValue> {
        self.property(name).and_then(CimProperty::value)
    }

    /// Add a property, replacing one with the same name
    pub fn set_property(&mut self, property: CimProperty) {
        match self
            .properties
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&property.name))
        {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    /// Remove a property by name, returning it
    pub fn remove_property(&mut self, name: &str) -> Option<CimProperty> {
        let index = self
            .properties
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))?;
        Some(self.properties.remove(index))
    }

    /// Key properties in declaration order
    pub fn key_properties(&self) -> impl Iterator<Item = &CimProperty> {
        self.properties.iter().filter(|p| p.is_key)
    }

    /// Scalar reference properties holding a path, in declaration order
    pub fn reference_properties(&self) -> impl Iterator<Item = (&str, &ObjectPath)> {
        self.properties
            .iter()
            .filter(|p| p.is_reference())
            .filter_map(|p| p.reference().map(|path| (p.name.as_str(), path)))
    }

    /// Check if this instance links two or more paths
    pub fn is_association(&self) -> bool {
        self.reference_properties().nth(1).is_some()
    }

    /// Derive a path in `namespace` from the key properties
    pub fn build_path(&self, namespace: &str) -> Result<ObjectPath, ObjectPathError> {
        let mut path = ObjectPath::new(self.class_name.clone()).with_namespace(namespace);
        for key in self.key_properties() {
            if let Some(value) = key.value() {
                path.add_key(key.name.clone(), value.clone())?;
            }
        }
        Ok(path)
    }

    /// Explicit path if set, else the path derived from the key properties
    pub fn object_path(&self, namespace: &str) -> Result<ObjectPath, ObjectPathError> {
        match &self.object_path {
            Some(path) => Ok(path.clone()),
            None => self.build_path(namespace),
        }
    }

    pub fn set_object_path(&mut self, path: ObjectPath) {
        self.object_path = Some(path);
    }

    /// Copy keeping only the listed properties (ignoring case)
    ///
    /// `None` keeps every property; key properties are always kept so the
    /// copy can still be addressed.
    pub fn filter_properties(&self, property_list: Option<&[String]>) -> Self {
        let Some(list) = property_list else {
            return self.clone();
        };

        Self {
            class_name: self.class_name.clone(),
            object_path: self.object_path.clone(),
            properties: self
                .properties
                .iter()
                .filter(|p| p.is_key || list.iter().any(|name| name.eq_ignore_ascii_case(&p.name)))
                .cloned()
                .collect(),
        }
    }

    /// MOF-like rendering for diagnostics
    pub fn to_mof(&self) -> String {
        let mut mof = format!("instance of {} {{", self.class_name);
        for property in &self.properties {
            match property.value() {
                Some(value) if value.type_of().is_integer() || value.type_of() == CimType::Boolean => {
                    mof.push_str(&format!(" {} = {};", property.name, value.render()));
                }
                Some(value) => mof.push_str(&format!(" {} = \"{}\";", property.name, value.render())),
                None => mof.push_str(&format!(" {} = NULL;", property.name)),
            }
        }
        mof.push_str(" };");
        mof
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> CimInstance {
        CimInstance::new("Sample_Student")
            .with_key_property("Name", "Student1")
            .with_key_property("Identifier", 1u8)
    }

    #[test]
    fn test_set_property_replaces_in_place() {
        let mut instance = student().with_property("Grade", 3u8);
        instance.set_property(CimProperty::new("NAME", "Student9").as_key());

        assert_eq!(instance.property_count(), 3);
        assert_eq!(instance.properties()[0].name(), "NAME");
        assert_eq!(instance.property_value("name").unwrap().as_str(), Some("Student9"));
    }

    #[test]
    fn test_build_path_from_keys() {
        let path = student().with_property("Grade", 3u8).build_path("root/SampleProvider").unwrap();
        assert_eq!(
            path.to_string(),
            r#"root/SampleProvider:Sample_Student.Identifier=1,Name="Student1""#
        );
    }

    #[test]
    fn test_explicit_path_wins() {
        let mut instance = student();
        let explicit = ObjectPath::new("Sample_Student").with_key("Name", "Other").unwrap();
        instance.set_object_path(explicit.clone());
        assert_eq!(instance.object_path("root/SampleProvider").unwrap(), explicit);
    }

    #[test]
    fn test_reference_properties_and_association() {
        let teacher = ObjectPath::new("Sample_Teacher").with_key("Name", "Teacher1").unwrap();
        let assoc = CimInstance::new("Sample_TeacherStudent")
            .with_key_property("Teaches", teacher.clone())
            .with_key_property("TaughtBy", student().build_path("").unwrap());

        let roles: Vec<&str> = assoc.reference_properties().map(|(name, _)| name).collect();
        assert_eq!(roles, vec!["Teaches", "TaughtBy"]);
        assert!(assoc.is_association());
        assert!(!student().is_association());
    }

    #[test]
    fn test_filter_properties_keeps_keys() {
        let instance = student().with_property("Grade", 3u8).with_property("Room", "B12");
        let filtered = instance.filter_properties(Some(&["room".to_string()]));
        let names: Vec<&str> = filtered.properties().iter().map(CimProperty::name).collect();
        assert_eq!(names, vec!["Name", "Identifier", "Room"]);
        assert_eq!(instance.filter_properties(None), instance);
    }

    #[test]
    fn test_to_mof() {
        assert_eq!(
            student().to_mof(),
            r#"instance of Sample_Student { Name = "Student1"; Identifier = 1; };"#
        );
    }

    #[test]
    fn test_deserialize_rejects_duplicate_properties() {
        let json = serde_json::json!({
            "class_name": "Sample_Student",
            "properties": [
                CimProperty::new("Name", "Student1").as_key(),
                CimProperty::new("NAME", "Student2").as_key(),
            ]
        });
        assert!(matches!(
            serde_json::from_value::<CimInstance>(json),
            Err(err) if err.to_string().contains("more than once")
        ));
    }

    #[test]
    fn test_deserialize_rejects_mistyped_property() {
        let mut property = serde_json::to_value(CimProperty::new("Identifier", 1u8)).unwrap();
        property["data_type"] = serde_json::to_value(CimDataType::scalar(CimType::String)).unwrap();
        let json = serde_json::json!({
            "class_name": "Sample_Student",
            "properties": [property]
        });
        assert!(serde_json::from_value::<CimInstance>(json).is_err());
    }

    #[test]
    fn test_serde_keeps_valid_instances() {
        let json = serde_json::to_string(&student()).unwrap();
        assert_eq!(serde_json::from_str::<CimInstance>(&json).unwrap(), student());
    }
}
