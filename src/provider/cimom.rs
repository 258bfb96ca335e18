// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIMOM Handle
//!
//! Outbound calls a provider makes into its CIM Object Manager. Only schema
//! lookups are needed: the provider resolves its classes during
//! `initialize` and checks its seed data against them.

use async_trait::async_trait;

use crate::domain::{CimClass, ObjectPath};
use crate::errors::{ProviderError, ProviderResult};
use crate::registry::seed;

/// Schema service offered by the CIMOM
#[async_trait]
pub trait CimomHandle: Send + Sync {
    /// Class definition named by `path`
    ///
    /// `local_only` excludes inherited properties.
    async fn get_class(&self, path: &ObjectPath, local_only: bool) -> ProviderResult<CimClass>;

    /// Subclasses of the class named by `path`, or top-level classes when
    /// the class name is empty; `deep` includes every descendant
    async fn enum_class(&self, path: &ObjectPath, deep: bool) -> ProviderResult<Vec<ObjectPath>>;
}

/// In-memory schema for one namespace
#[derive(Debug, Clone)]
pub struct StaticSchemaHandle {
    namespace: String,
    classes: Vec<CimClass>,
}

impl StaticSchemaHandle {
    pub fn new(namespace: impl Into<String>, classes: Vec<CimClass>) -> Self {
        Self {
            namespace: namespace.into(),
            classes,
        }
    }

    /// Handle serving the sample schema
    pub fn sample(namespace: impl Into<String>) -> Self {
        Self::new(namespace, seed::sample_schema())
    }

    fn check_namespace(&self, path: &ObjectPath) -> ProviderResult<()> {
        if !path.namespace().is_empty() && path.namespace() != self.namespace {
            return Err(ProviderError::InvalidNamespace(path.namespace().to_string()));
        }
        Ok(())
    }

    fn find(&self, class_name: &str) -> Option<&CimClass> {
        self.classes
            .iter()
            .find(|c| c.class_name().eq_ignore_ascii_case(class_name))
    }

    fn children<'a>(&'a self, parent: Option<&'a str>) -> impl Iterator<Item = &'a CimClass> + 'a {
        self.classes.iter().filter(move |c| match (c.super_class(), parent) {
            (None, None) => true,
            (Some(sup), Some(parent)) => sup.eq_ignore_ascii_case(parent),
            _ => false,
        })
    }

    /// Own properties only: drop those the superclass also declares
    fn local_view(&self, class: &CimClass) -> CimClass {
        let Some(parent) = class.super_class().and_then(|name| self.find(name)) else {
            return class.clone();
        };

        let mut local = if class.is_association() {
            CimClass::association(class.class_name())
        } else {
            CimClass::new(class.class_name())
        };
        local = local.with_super_class(parent.class_name());
        for declaration in class.properties() {
            if parent.property(declaration.name()).is_none() {
                local = local.with_property(declaration.clone());
            }
        }
        local
    }
}

#[async_trait]
impl CimomHandle for StaticSchemaHandle {
    async fn get_class(&self, path: &ObjectPath, local_only: bool) -> ProviderResult<CimClass> {
        self.check_namespace(path)?;
        let class = self
            .find(path.class_name())
            .ok_or_else(|| ProviderError::InvalidClass(path.class_name().to_string()))?;

        Ok(if local_only {
            self.local_view(class)
        } else {
            class.clone()
        })
    }

    async fn enum_class(&self, path: &ObjectPath, deep: bool) -> ProviderResult<Vec<ObjectPath>> {
        self.check_namespace(path)?;

        let root = if path.class_name().is_empty() {
            None
        } else {
            let class = self
                .find(path.class_name())
                .ok_or_else(|| ProviderError::InvalidClass(path.class_name().to_string()))?;
            Some(class.class_name())
        };

        let mut found = Vec::new();
        let mut frontier: Vec<&CimClass> = self.children(root).collect();
        while let Some(class) = frontier.pop() {
            found.push(class.class_name());
            if deep {
                frontier.extend(self.children(Some(class.class_name())));
            }
        }

        found.sort_unstable_by_key(|name| name.to_lowercase());
        Ok(found
            .into_iter()
            .map(|name| ObjectPath::new(name).with_namespace(self.namespace.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CimDataType, CimPropertyDecl, CimType};

    const NS: &str = "root/SampleProvider";

    fn hierarchy() -> StaticSchemaHandle {
        let name = CimPropertyDecl::key("Name", CimDataType::scalar(CimType::String));
        StaticSchemaHandle::new(
            NS,
            vec![
                CimClass::new("Sample_Person").with_property(name.clone()),
                CimClass::new("Sample_Teacher")
                    .with_super_class("Sample_Person")
                    .with_property(name)
                    .with_property(CimPropertyDecl::new("Subject", CimDataType::scalar(CimType::String))),
                CimClass::new("Sample_HeadTeacher").with_super_class("Sample_Teacher"),
            ],
        )
    }

    #[tokio::test]
    async fn test_get_class() {
        let handle = StaticSchemaHandle::sample(NS);
        let class = handle
            .get_class(&ObjectPath::new("sample_teacherstudent").with_namespace(NS), false)
            .await
            .unwrap();
        assert!(class.is_association());
        assert_eq!(class.properties().len(), 2);

        assert!(matches!(
            handle.get_class(&ObjectPath::new("Sample_Course"), false).await,
            Err(ProviderError::InvalidClass(name)) if name == "Sample_Course"
        ));
        assert!(matches!(
            handle
                .get_class(&ObjectPath::new("Sample_Teacher").with_namespace("root/cimv2"), false)
                .await,
            Err(ProviderError::InvalidNamespace(_))
        ));
    }

    #[tokio::test]
    async fn test_local_only_drops_inherited() {
        let handle = hierarchy();
        let class = handle
            .get_class(&ObjectPath::new("Sample_Teacher"), true)
            .await
            .unwrap();
        let names: Vec<&str> = class.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Subject"]);
    }

    #[tokio::test]
    async fn test_enum_class_shallow_and_deep() {
        let handle = hierarchy();
        let names = |paths: Vec<ObjectPath>| -> Vec<String> {
            paths.iter().map(|p| p.class_name().to_string()).collect()
        };

        let top = handle.enum_class(&ObjectPath::new(""), false).await.unwrap();
        assert_eq!(names(top), vec!["Sample_Person"]);

        let deep = handle
            .enum_class(&ObjectPath::new("Sample_Person"), true)
            .await
            .unwrap();
        assert_eq!(names(deep), vec!["Sample_HeadTeacher", "Sample_Teacher"]);
    }
}
