//! CIM provider components
//!
//! This crate provides the typed CIM value model, the object path and
//! instance model built on it, and an in-memory association provider that
//! answers `associators`, `associatorNames`, `references` and
//! `referenceNames` for a fixed teacher/student data set.
//!
//! # Modules
//!
//! - [`domain`] - value objects: types, values, object paths, instances, classes
//! - [`registry`] - instance store and the pure association filter engine
//! - [`provider`] - async provider contract, CIMOM handle, sample provider
//! - [`state_machine`] - provider lifecycle
//! - [`config`] - provider configuration
//! - [`errors`] - provider error and CIM status codes

pub mod config;
pub mod domain;
pub mod errors;
pub mod provider;
pub mod registry;
pub mod state_machine;

// Re-export commonly used types
pub use config::{ProviderConfig, SAMPLE_NAMESPACE};
pub use domain::{CimInstance, CimValue, ObjectPath};
pub use errors::{CimStatusCode, ProviderError, ProviderResult};
pub use provider::{
    AssociationFilter, AssociatorProvider, CimomHandle, InstanceProvider, OperationContext,
    PropertySelection, SampleAssociationProvider, StaticSchemaHandle,
};
pub use registry::{AssociationRegistry, SampleClass};
