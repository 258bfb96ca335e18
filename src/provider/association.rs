// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sample Association Provider
//!
//! Serves `Sample_Teacher`, `Sample_Student` and the two association classes
//! linking them from an in-memory [`AssociationRegistry`].
//!
//! # Request Validation
//!
//! Every request is checked in this order:
//! 1. The provider is initialized (`NotInitialized`)
//! 2. The request namespace equals the configured one exactly (`InvalidNamespace`)
//! 3. The class is served (`InvalidClass`)
//!
//! `get_instance` skips step 2: the path is localized to the configured
//! namespace before lookup.
//!
//! # Concurrency
//!
//! State lives behind one `tokio::sync::RwLock`. Queries share the lock;
//! lifecycle changes and modifications take it exclusively. The lock is
//! never held across a call into the CIMOM handle.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{
    AssociationFilter, AssociatorProvider, CimomHandle, InstanceProvider, OperationContext,
    PropertySelection,
};
use crate::config::ProviderConfig;
use crate::domain::invariants::{validate_association_class, validate_instance_against_class};
use crate::domain::{CimClass, CimInstance, ObjectPath};
use crate::errors::{ProviderError, ProviderResult};
use crate::registry::{AssociationRegistry, SampleClass};
use crate::state_machine::{LifecycleInput, ProviderState, StateHistory, StateMachine};

struct ProviderInner {
    lifecycle: StateHistory<ProviderState>,
    registry: Option<AssociationRegistry>,
    schema: HashMap<SampleClass, CimClass>,
    handle: Option<Arc<dyn CimomHandle>>,
}

impl ProviderInner {
    fn serving(&self) -> ProviderResult<&AssociationRegistry> {
        let state = self.lifecycle.current();
        if !state.is_serving() {
            return Err(ProviderError::NotInitialized(format!("provider is {}", state)));
        }
        self.registry
            .as_ref()
            .ok_or_else(|| ProviderError::NotInitialized("registry not loaded".to_string()))
    }

    /// Schema check of a modification against the class loaded at initialize
    fn check_instance(&self, class: SampleClass, instance: &CimInstance) -> ProviderResult<()> {
        let definition = self
            .schema
            .get(&class)
            .ok_or_else(|| ProviderError::InvalidClass(class.class_name().to_string()))?;
        validate_instance_against_class(instance, definition)?;
        Ok(())
    }

    fn serving_mut(&mut self) -> ProviderResult<&mut AssociationRegistry> {
        let state = self.lifecycle.current();
        if !state.is_serving() {
            return Err(ProviderError::NotInitialized(format!("provider is {}", state)));
        }
        self.registry
            .as_mut()
            .ok_or_else(|| ProviderError::NotInitialized("registry not loaded".to_string()))
    }
}

/// Association provider over the sample teacher/student data
pub struct SampleAssociationProvider {
    config: ProviderConfig,
    inner: RwLock<ProviderInner>,
}

impl SampleAssociationProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(ProviderInner {
                lifecycle: StateHistory::new(ProviderState::Uninitialized),
                registry: None,
                schema: HashMap::new(),
                handle: None,
            }),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ProviderState {
        self.inner.read().await.lifecycle.current()
    }

    /// Number of lifecycle transitions taken so far
    pub async fn transition_count(&self) -> usize {
        self.inner.read().await.lifecycle.transitions().len()
    }

    fn check_namespace(&self, path: &ObjectPath) -> ProviderResult<()> {
        if path.namespace() != self.config.namespace {
            warn!(
                namespace = path.namespace(),
                expected = %self.config.namespace,
                "Rejected request for foreign namespace"
            );
            return Err(ProviderError::InvalidNamespace(path.namespace().to_string()));
        }
        Ok(())
    }

    fn member_class(path: &ObjectPath) -> ProviderResult<SampleClass> {
        SampleClass::from_class_name(path.class_name()).ok_or_else(|| {
            warn!(class = path.class_name(), "Rejected request for unknown class");
            ProviderError::InvalidClass(path.class_name().to_string())
        })
    }

    fn association_class(path: &ObjectPath) -> ProviderResult<SampleClass> {
        SampleClass::from_class_name(path.class_name())
            .filter(SampleClass::is_association)
            .ok_or_else(|| {
                warn!(class = path.class_name(), "Rejected unsupported association class");
                ProviderError::InvalidClass(format!("{} is not supported", path.class_name()))
            })
    }

    fn check_modifications(&self, operation: &str) -> ProviderResult<()> {
        if !self.config.enable_modifications {
            warn!(operation, "Modification rejected, provider is read-only");
            return Err(ProviderError::NotSupported(format!(
                "{} is disabled for this provider",
                operation
            )));
        }
        Ok(())
    }

    async fn load_schema(&self, handle: &dyn CimomHandle) -> ProviderResult<Vec<(SampleClass, CimClass)>> {
        let mut schema = Vec::with_capacity(SampleClass::ALL.len());
        for class in SampleClass::ALL {
            let path = ObjectPath::new(class.class_name()).with_namespace(self.config.namespace.clone());
            let definition = handle.get_class(&path, false).await?;
            if class.is_association() {
                validate_association_class(&definition)?;
            }
            schema.push((class, definition));
        }
        Ok(schema)
    }
}

fn selection_flags(selection: &PropertySelection) -> (bool, bool, usize) {
    (
        selection.include_qualifiers,
        selection.include_class_origin,
        selection.property_list().map_or(0, <[String]>::len),
    )
}

#[async_trait]
impl InstanceProvider for SampleAssociationProvider {
    async fn initialize(&self, handle: Arc<dyn CimomHandle>) -> ProviderResult<()> {
        {
            let inner = self.inner.read().await;
            inner
                .lifecycle
                .current()
                .transition(&LifecycleInput::Initialize)?;
        }

        let schema = self.load_schema(handle.as_ref()).await?;

        let registry = AssociationRegistry::seeded(self.config.namespace.clone())?;
        for (class, definition) in &schema {
            for instance in registry.instances(*class) {
                validate_instance_against_class(instance, definition)?;
            }
        }

        let mut inner = self.inner.write().await;
        inner
            .lifecycle
            .apply(LifecycleInput::Initialize, Utc::now())?;
        info!(
            namespace = %self.config.namespace,
            instances = registry.len(),
            modifications = self.config.enable_modifications,
            "Association provider initialized"
        );
        inner.registry = Some(registry);
        inner.schema = schema.into_iter().collect();
        inner.handle = Some(handle);
        Ok(())
    }

    async fn cleanup(&self) -> ProviderResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .lifecycle
            .apply(LifecycleInput::Cleanup, Utc::now())?;
        inner.registry = None;
        inner.schema.clear();
        if inner.handle.take().is_some() {
            debug!("Released CIMOM handle");
        }
        info!("Association provider cleaned up");
        Ok(())
    }

    async fn enumerate_instance_names(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
    ) -> ProviderResult<Vec<ObjectPath>> {
        let inner = self.inner.read().await;
        let _span = ctx.span("enumerate_instance_names").entered();

        let registry = inner.serving()?;
        self.check_namespace(path)?;
        let class = Self::member_class(path)?;

        let names = registry.instance_names(class)?;
        debug!(%class, count = names.len(), "Enumerated instance names");
        Ok(names)
    }

    async fn enumerate_instances(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        selection: &PropertySelection,
    ) -> ProviderResult<Vec<CimInstance>> {
        let inner = self.inner.read().await;
        let _span = ctx.span("enumerate_instances").entered();

        let registry = inner.serving()?;
        self.check_namespace(path)?;
        let class = Self::member_class(path)?;

        let instances: Vec<CimInstance> = registry
            .instances(class)
            .iter()
            .map(|instance| instance.filter_properties(selection.property_list()))
            .collect();
        debug!(%class, count = instances.len(), flags = ?selection_flags(selection), "Enumerated instances");
        Ok(instances)
    }

    async fn get_instance(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        selection: &PropertySelection,
    ) -> ProviderResult<CimInstance> {
        let inner = self.inner.read().await;
        let _span = ctx.span("get_instance").entered();

        let registry = inner.serving()?;
        let local = path.localized(&self.config.namespace);
        let class = Self::member_class(&local)?;

        let instance = registry
            .find(class, &local)
            .map(|instance| instance.filter_properties(selection.property_list()))
            .ok_or_else(|| ProviderError::NotFound(local.to_string()))?;
        debug!(path = %local, "Found instance");
        Ok(instance)
    }

    async fn create_instance(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        instance: CimInstance,
    ) -> ProviderResult<ObjectPath> {
        let mut inner = self.inner.write().await;
        let _span = ctx.span("create_instance").entered();

        inner.serving()?;
        self.check_modifications("createInstance")?;
        self.check_namespace(path)?;
        let class = Self::member_class(path)?;
        inner.check_instance(class, &instance)?;

        let created = inner.serving_mut()?.insert(class, instance)?;
        info!(path = %created, "Created instance");
        Ok(created)
    }

    async fn set_instance(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        instance: CimInstance,
    ) -> ProviderResult<()> {
        let mut inner = self.inner.write().await;
        let _span = ctx.span("set_instance").entered();

        inner.serving()?;
        self.check_modifications("setInstance")?;
        self.check_namespace(path)?;
        let class = Self::member_class(path)?;
        inner.check_instance(class, &instance)?;

        inner.serving_mut()?.replace(class, instance)?;
        info!(path = %path, "Replaced instance");
        Ok(())
    }

    async fn delete_instance(&self, ctx: &OperationContext, path: &ObjectPath) -> ProviderResult<()> {
        let mut inner = self.inner.write().await;
        let _span = ctx.span("delete_instance").entered();

        let registry = inner.serving_mut()?;
        self.check_modifications("deleteInstance")?;
        self.check_namespace(path)?;
        let class = Self::member_class(path)?;

        registry.remove(class, path)?;
        info!(path = %path, "Deleted instance");
        Ok(())
    }

    async fn exec_query(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        query: &str,
        language: &str,
    ) -> ProviderResult<Vec<CimInstance>> {
        let inner = self.inner.read().await;
        let _span = ctx.span("exec_query").entered();

        inner.serving()?;
        debug!(path = %path, query, language, "Query rejected");
        Err(ProviderError::NotSupported(format!(
            "execQuery ({}) is not supported",
            language
        )))
    }
}

#[async_trait]
impl AssociatorProvider for SampleAssociationProvider {
    async fn associator_names(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        filter: &AssociationFilter,
    ) -> ProviderResult<Vec<ObjectPath>> {
        let inner = self.inner.read().await;
        let _span = ctx.span("associator_names").entered();

        let registry = inner.serving()?;
        self.check_namespace(assoc_class)?;
        let association = Self::association_class(assoc_class)?;

        let names = registry.associator_names(
            association,
            target,
            filter.result_class(),
            filter.role(),
            filter.result_role(),
        );
        debug!(%association, target = %target, ?filter, count = names.len(), "Associator names");
        Ok(names)
    }

    async fn associators(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        filter: &AssociationFilter,
        selection: &PropertySelection,
    ) -> ProviderResult<Vec<CimInstance>> {
        let inner = self.inner.read().await;
        let _span = ctx.span("associators").entered();

        let registry = inner.serving()?;
        self.check_namespace(assoc_class)?;
        let association = Self::association_class(assoc_class)?;

        let instances = registry.associators(
            association,
            target,
            filter.result_class(),
            filter.role(),
            filter.result_role(),
            selection.property_list(),
        );
        debug!(
            %association,
            target = %target,
            ?filter,
            flags = ?selection_flags(selection),
            count = instances.len(),
            "Associators"
        );
        Ok(instances)
    }

    async fn reference_names(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        role: Option<&str>,
    ) -> ProviderResult<Vec<ObjectPath>> {
        let inner = self.inner.read().await;
        let _span = ctx.span("reference_names").entered();

        let registry = inner.serving()?;
        self.check_namespace(assoc_class)?;
        let association = Self::association_class(assoc_class)?;

        let names = registry.reference_names(association, target, role)?;
        debug!(%association, target = %target, ?role, count = names.len(), "Reference names");
        Ok(names)
    }

    async fn references(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        role: Option<&str>,
        selection: &PropertySelection,
    ) -> ProviderResult<Vec<CimInstance>> {
        let inner = self.inner.read().await;
        let _span = ctx.span("references").entered();

        let registry = inner.serving()?;
        self.check_namespace(assoc_class)?;
        let association = Self::association_class(assoc_class)?;

        let instances = registry.references(association, target, role, selection.property_list());
        debug!(
            %association,
            target = %target,
            ?role,
            flags = ?selection_flags(selection),
            count = instances.len(),
            "References"
        );
        Ok(instances)
    }
}
