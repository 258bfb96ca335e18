// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Contract
//!
//! The calls a CIM Object Manager makes into a provider, as async traits,
//! plus the per-call context and request options they share.
//!
//! # Architecture
//!
//! ```text
//! CIMOM request
//!     ↓
//! InstanceProvider / AssociatorProvider (this module)
//!     ↓
//! AssociationRegistry → filter engine (pure)
//!     ↑
//! CimomHandle (schema lookups during initialize)
//! ```
//!
//! Every call succeeds or fails as a whole with a [`ProviderError`]; there is
//! no partial result and no retry.
//!
//! [`ProviderError`]: crate::errors::ProviderError

pub mod association;
pub mod cimom;

pub use association::SampleAssociationProvider;
pub use cimom::{CimomHandle, StaticSchemaHandle};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CimInstance, ObjectPath};
use crate::errors::ProviderResult;

/// Per-call context handed in by the CIMOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationContext {
    /// Request id (UUID v7, time-ordered)
    pub request_id: Uuid,
    /// Authenticated caller, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Requested content language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_language: Option<String>,
}

impl OperationContext {
    /// Context with a fresh request id
    pub fn new() -> Self {
        Self {
            request_id: Uuid::now_v7(),
            user_name: None,
            content_language: None,
        }
    }

    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_content_language(mut self, language: impl Into<String>) -> Self {
        self.content_language = Some(language.into());
        self
    }

    /// Span covering one provider operation
    pub fn span(&self, operation: &'static str) -> tracing::Span {
        tracing::debug_span!(
            "provider_operation",
            operation,
            request_id = %self.request_id,
            user = self.user_name.as_deref().unwrap_or(""),
        )
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Role and result filters of an association query
///
/// `None` or an empty string means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationFilter {
    pub role: Option<String>,
    pub result_class: Option<String>,
    pub result_role: Option<String>,
}

impl AssociationFilter {
    /// Filter matching every association
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_result_class(mut self, result_class: impl Into<String>) -> Self {
        self.result_class = Some(result_class.into());
        self
    }

    pub fn with_result_role(mut self, result_role: impl Into<String>) -> Self {
        self.result_role = Some(result_role.into());
        self
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn result_class(&self) -> Option<&str> {
        self.result_class.as_deref()
    }

    pub fn result_role(&self) -> Option<&str> {
        self.result_role.as_deref()
    }
}

/// Which parts of returned instances the caller wants
///
/// Qualifiers and class origin are not modeled; the flags are accepted and
/// logged only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySelection {
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    /// Property names to return (keys are always returned); `None` for all
    pub property_list: Option<Vec<String>>,
}

impl PropertySelection {
    /// Every property
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the named properties plus keys
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property_list: Some(names.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn property_list(&self) -> Option<&[String]> {
        self.property_list.as_deref()
    }
}

/// Instance operations of a provider
#[async_trait]
pub trait InstanceProvider: Send + Sync {
    /// Attach to the CIMOM and load state
    async fn initialize(&self, handle: Arc<dyn CimomHandle>) -> ProviderResult<()>;

    /// Release state; the provider serves nothing afterwards
    async fn cleanup(&self) -> ProviderResult<()>;

    /// Paths of every instance of the class named by `path`
    async fn enumerate_instance_names(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
    ) -> ProviderResult<Vec<ObjectPath>>;

    /// Copies of every instance of the class named by `path`
    async fn enumerate_instances(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        selection: &PropertySelection,
    ) -> ProviderResult<Vec<CimInstance>>;

    /// Copy of the instance at `path`
    async fn get_instance(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        selection: &PropertySelection,
    ) -> ProviderResult<CimInstance>;

    /// Store a new instance, returning its path
    async fn create_instance(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        instance: CimInstance,
    ) -> ProviderResult<ObjectPath>;

    /// Replace an existing instance
    async fn set_instance(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        instance: CimInstance,
    ) -> ProviderResult<()>;

    /// Remove an existing instance
    async fn delete_instance(&self, ctx: &OperationContext, path: &ObjectPath) -> ProviderResult<()>;

    /// Run a query in `language` against the class named by `path`
    async fn exec_query(
        &self,
        ctx: &OperationContext,
        path: &ObjectPath,
        query: &str,
        language: &str,
    ) -> ProviderResult<Vec<CimInstance>>;
}

/// Association traversal operations of a provider
///
/// `assoc_class` names the association class and carries the namespace the
/// request targets; `target` is the source object.
#[async_trait]
pub trait AssociatorProvider: Send + Sync {
    async fn associator_names(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        filter: &AssociationFilter,
    ) -> ProviderResult<Vec<ObjectPath>>;

    async fn associators(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        filter: &AssociationFilter,
        selection: &PropertySelection,
    ) -> ProviderResult<Vec<CimInstance>>;

    async fn reference_names(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        role: Option<&str>,
    ) -> ProviderResult<Vec<ObjectPath>>;

    /// Association instances referring to `target`; only `role` narrows them
    async fn references(
        &self,
        ctx: &OperationContext,
        assoc_class: &ObjectPath,
        target: &ObjectPath,
        role: Option<&str>,
        selection: &PropertySelection,
    ) -> ProviderResult<Vec<CimInstance>>;
}
