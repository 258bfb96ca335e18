// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIM Class Schema
//!
//! The schema a CIMOM returns for `getClass`: property declarations and the
//! association flag. Qualifiers beyond `Key` and `Association` are not
//! modeled.

use serde::{Deserialize, Serialize};

use super::cim_type::CimDataType;

/// Property declaration of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CimPropertyDecl {
    name: String,
    data_type: CimDataType,
    #[serde(default)]
    is_key: bool,
}

impl CimPropertyDecl {
    pub fn new(name: impl Into<String>, data_type: CimDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_key: false,
        }
    }

    /// Declaration carrying the `Key` qualifier
    pub fn key(name: impl Into<String>, data_type: CimDataType) -> Self {
        Self {
            is_key: true,
            ..Self::new(name, data_type)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &CimDataType {
        &self.data_type
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }
}

/// Class definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CimClass {
    class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    super_class: Option<String>,
    properties: Vec<CimPropertyDecl>,
    #[serde(default)]
    is_association: bool,
}

impl CimClass {
    /// Plain class with no properties
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            super_class: None,
            properties: Vec::new(),
            is_association: false,
        }
    }

    /// Class carrying the `Association` qualifier
    pub fn association(class_name: impl Into<String>) -> Self {
        Self {
            is_association: true,
            ..Self::new(class_name)
        }
    }

    pub fn with_super_class(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    /// Builder: declare a property, replacing one with the same name
    pub fn with_property(mut self, declaration: CimPropertyDecl) -> Self {
        match self
            .properties
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&declaration.name))
        {
            Some(existing) => *existing = declaration,
            None => self.properties.push(declaration),
        }
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn super_class(&self) -> Option<&str> {
        self.super_class.as_deref()
    }

    pub fn properties(&self) -> &[CimPropertyDecl] {
        &self.properties
    }

    pub fn is_association(&self) -> bool {
        self.is_association
    }

    /// Look up a declaration ignoring case
    pub fn property(&self, name: &str) -> Option<&CimPropertyDecl> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn key_properties(&self) -> impl Iterator<Item = &CimPropertyDecl> {
        self.properties.iter().filter(|p| p.is_key)
    }
}
