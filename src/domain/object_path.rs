// Copyright (c) 2025 - Cowboy AI, Inc.
//! Object Path Value Object
//!
//! An object path names a CIM instance: optional host, namespace, class name
//! and the instance's key bindings. Its canonical string form is
//!
//! ```text
//! //host/namespace:ClassName.Key1="Value1",Key2=Value2
//! ```
//!
//! String-like and reference keys are quoted (with `\` and `"` escaped),
//! numeric keys are bare decimals and boolean keys are `TRUE`/`FALSE`. Keys
//! are rendered sorted case-insensitively by name, so two paths that differ
//! only in key order render identically.
//!
//! Two paths are equal iff their canonical renderings are equal ignoring
//! case.
//!
//! Parsing does not recover key types exactly. Bare numbers come back as
//! `uint64` (or `sint64` when negative). A quoted value that parses as a
//! path with at least one key comes back as a reference, even when it was
//! a string; every other quoted value, including a reference to a keyless
//! path, comes back as a string. Equality is unaffected because both render
//! the same.
//!
//! ```rust
//! use cim_provider::domain::ObjectPath;
//!
//! let path: ObjectPath = r#"root/SampleProvider:Sample_Student.Name="Student1",Identifier=1"#
//!     .parse()
//!     .unwrap();
//! assert_eq!(
//!     path.to_string(),
//!     r#"root/SampleProvider:Sample_Student.Identifier=1,Name="Student1""#
//! );
//!
//! let shouted: ObjectPath = r#"ROOT/SAMPLEPROVIDER:SAMPLE_STUDENT.NAME="STUDENT1",IDENTIFIER=1"#
//!     .parse()
//!     .unwrap();
//! assert_eq!(path, shouted);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use super::invariants::{validate_cim_name, validate_host, validate_namespace, ValidationError};
use super::value::{CimScalar, CimValue};

/// Object path error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjectPathError {
    #[error("Malformed object path {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Key {name} cannot hold a {data_type} value")]
    InvalidKeyValue { name: String, data_type: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Single key binding of an object path
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    name: String,
    value: CimValue,
}

impl KeyBinding {
    /// Key property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key value
    pub fn value(&self) -> &CimValue {
        &self.value
    }
}

/// CIM object path
///
/// # Invariants
/// - Key names are unique ignoring case; adding an existing key replaces it
/// - Key values are scalars of a key-capable type (no arrays, objects or reals)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectPath {
    host: String,
    namespace: String,
    class_name: String,
    keys: Vec<KeyBinding>,
}

impl ObjectPath {
    /// Create a keyless path to `class_name` with no host or namespace
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Builder: set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Builder: set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Builder: add a key binding
    pub fn with_key(
        mut self,
        name: impl Into<String>,
        value: impl Into<CimValue>,
    ) -> Result<Self, ObjectPathError> {
        self.add_key(name, value)?;
        Ok(self)
    }

    /// Host name, empty when local
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Namespace, empty when unset
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Class name
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Key bindings in insertion order
    pub fn keys(&self) -> &[KeyBinding] {
        &self.keys
    }

    /// Look up a key value ignoring case
    pub fn key(&self, name: &str) -> Option<&CimValue> {
        self.keys
            .iter()
            .find(|k| k.name.eq_ignore_ascii_case(name))
            .map(|k| &k.value)
    }

    /// Set the host
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// Set the namespace
    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    /// Set the class name
    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = class_name.into();
    }

    /// Add or replace a key binding
    ///
    /// # Invariants
    /// - Name is a legal CIM name
    /// - Value is a scalar of a key-capable type
    pub fn add_key(
        &mut self,
        name: impl Into<String>,
        value: impl Into<CimValue>,
    ) -> Result<(), ObjectPathError> {
        let name = name.into();
        let value = value.into();

        validate_cim_name(&name)?;
        if value.is_array() || !value.type_of().is_key_type() {
            return Err(ObjectPathError::InvalidKeyValue {
                name,
                data_type: value.data_type().to_string(),
            });
        }

        match self.keys.iter_mut().find(|k| k.name.eq_ignore_ascii_case(&name)) {
            Some(existing) => {
                existing.name = name;
                existing.value = value;
            }
            None => self.keys.push(KeyBinding { name, value }),
        }
        Ok(())
    }

    /// Remove every key binding
    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }

    /// Copy with the host cleared and the namespace replaced
    ///
    /// Paths are compared in this form so that a caller-supplied host or
    /// namespace spelling does not defeat a match.
    pub fn localized(&self, namespace: &str) -> Self {
        Self {
            host: String::new(),
            namespace: namespace.to_string(),
            class_name: self.class_name.clone(),
            keys: self.keys.clone(),
        }
    }

    /// Lowercased canonical rendering; the basis of equality and hashing
    pub fn canonical_form(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Check if the class name matches ignoring case
    pub fn is_class(&self, class_name: &str) -> bool {
        self.class_name.eq_ignore_ascii_case(class_name)
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\\' || ch == '"' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn render_key_value(value: &CimValue) -> String {
    match value.as_scalar() {
        Some(CimScalar::Boolean(true)) => "TRUE".to_string(),
        Some(CimScalar::Boolean(false)) => "FALSE".to_string(),
        Some(scalar) if scalar.cim_type().is_integer() || scalar.cim_type().is_real() => {
            scalar.render()
        }
        Some(scalar) => format!("\"{}\"", escape(&scalar.render())),
        None => format!("\"{}\"", escape(&value.render())),
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.host.is_empty() {
            write!(f, "//{}/", self.host)?;
        }
        if !self.namespace.is_empty() || !self.host.is_empty() {
            write!(f, "{}:", self.namespace)?;
        }
        write!(f, "{}", self.class_name)?;

        if !self.keys.is_empty() {
            let mut sorted: Vec<&KeyBinding> = self.keys.iter().collect();
            sorted.sort_by_key(|k| k.name.to_lowercase());

            write!(f, ".")?;
            for (i, key) in sorted.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key.name, render_key_value(&key.value))?;
            }
        }
        Ok(())
    }
}

impl PartialEq for ObjectPath {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_form() == other.canonical_form()
    }
}

impl Eq for ObjectPath {}

impl Hash for ObjectPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_form().hash(state);
    }
}

/// Recursive-descent parser over the canonical grammar
struct PathParser<'a> {
    input: &'a str,
}

impl<'a> PathParser<'a> {
    fn malformed(&self, reason: &str) -> ObjectPathError {
        ObjectPathError::Malformed {
            path: self.input.to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse(&self) -> Result<ObjectPath, ObjectPathError> {
        let mut rest = self.input;
        let mut path = ObjectPath::default();

        if let Some(after) = rest.strip_prefix("//") {
            let slash = after
                .find('/')
                .ok_or_else(|| self.malformed("missing slash after hostname"))?;
            validate_host(&after[..slash])?;
            path.host = after[..slash].to_string();
            rest = &after[slash + 1..];
        }

        // A ':' only delimits the namespace when it precedes the first '.'
        if let Some(colon) = rest.find(':') {
            if rest.find('.').map_or(true, |dot| colon < dot) {
                validate_namespace(&rest[..colon])?;
                path.namespace = rest[..colon].to_string();
                rest = &rest[colon + 1..];
            }
        }

        if !path.host.is_empty() && path.namespace.is_empty() {
            return Err(self.malformed("host specified, missing namespace"));
        }

        let (class_name, key_part) = match rest.split_once('.') {
            Some((class_name, keys)) => (class_name, Some(keys)),
            None => (rest, None),
        };
        validate_cim_name(class_name)?;
        path.class_name = class_name.to_string();

        if let Some(keys) = key_part {
            self.parse_keys(keys, &mut path)?;
        }
        Ok(path)
    }

    fn parse_keys(&self, mut rest: &str, path: &mut ObjectPath) -> Result<(), ObjectPathError> {
        while !rest.is_empty() {
            let (name, after_eq) = rest
                .split_once('=')
                .ok_or_else(|| self.malformed("invalid key-value pair, missing equal sign"))?;

            let (value, remaining) = match after_eq.strip_prefix('"') {
                Some(quoted) => self.parse_quoted(quoted)?,
                None => self.parse_bare(after_eq)?,
            };
            path.add_key(name, value)?;

            rest = match remaining {
                "" => "",
                more => more.strip_prefix(',').ok_or_else(|| {
                    self.malformed("next key-value pair has to start with comma")
                })?,
            };
        }
        Ok(())
    }

    /// Quoted value: a reference if it parses as a path with keys, else a string
    fn parse_quoted<'b>(&self, quoted: &'b str) -> Result<(CimValue, &'b str), ObjectPathError> {
        let mut text = String::new();
        let mut chars = quoted.char_indices();
        let mut closing = None;

        while let Some((i, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, escaped @ ('\\' | '"'))) => text.push(escaped),
                    _ => return Err(self.malformed("invalid key-value pair, malformed value")),
                },
                '"' => {
                    closing = Some(i);
                    break;
                }
                other => text.push(other),
            }
        }

        let closing = closing
            .ok_or_else(|| self.malformed("invalid key-value pair, missing quote in key value"))?;
        let remaining = &quoted[closing + 1..];

        if text.contains('=') {
            if let Ok(reference) = text.parse::<ObjectPath>() {
                if !reference.keys.is_empty() {
                    return Ok((CimValue::from(reference), remaining));
                }
            }
        }
        Ok((CimValue::from(text), remaining))
    }

    /// Bare value: boolean or decimal integer up to the next ','
    fn parse_bare<'b>(&self, input: &'b str) -> Result<(CimValue, &'b str), ObjectPathError> {
        let end = input.find(',').unwrap_or(input.len());
        let (raw, remaining) = input.split_at(end);

        let value = match raw.chars().next() {
            Some('t' | 'T' | 'f' | 'F') => match raw.to_ascii_uppercase().as_str() {
                "TRUE" => CimValue::from(true),
                "FALSE" => CimValue::from(false),
                _ => {
                    return Err(
                        self.malformed("invalid key-value pair, value should be TRUE or FALSE")
                    )
                }
            },
            Some('-') => raw.parse::<i64>().map(CimValue::from).map_err(|_| {
                self.malformed("invalid key-value pair, invalid negative number value")
            })?,
            _ => raw
                .parse::<u64>()
                .map(CimValue::from)
                .map_err(|_| self.malformed("invalid key-value pair, invalid number value"))?,
        };
        Ok((value, remaining))
    }
}

impl FromStr for ObjectPath {
    type Err = ObjectPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathParser { input: s }.parse()
    }
}

impl TryFrom<String> for ObjectPath {
    type Error = ObjectPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ObjectPath> for String {
    fn from(path: ObjectPath) -> Self {
        path.to_string()
    }
}
