// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-provider
//!
//! Deterministic paths, instances and providers for the sample
//! teacher/student data set.
//!
//! # Design Principles
//! - Fixtures build paths the same way the seed data does
//! - Every provider fixture is initialized against the in-memory schema
//! - Tests compare against fixtures, never against registry internals
#![allow(dead_code)]

use std::sync::Arc;

use cim_provider::domain::CimInstance;
use cim_provider::registry::seed;
use cim_provider::{
    ObjectPath, OperationContext, ProviderConfig, SampleAssociationProvider, SampleClass,
    StaticSchemaHandle, InstanceProvider,
};
use uuid::Uuid;

pub const NAMESPACE: &str = "root/SampleProvider";

// Fixed request id (UUID v7 layout, deterministic for testing)
pub const REQUEST_ID: &str = "01934f4a-0001-7000-8000-000000000001";

/// Context with a fixed request id
pub fn context() -> OperationContext {
    OperationContext {
        request_id: Uuid::parse_str(REQUEST_ID).expect("Invalid UUID in test fixture"),
        user_name: Some("cimtest".to_string()),
        content_language: None,
    }
}

pub fn teacher(id: u8) -> CimInstance {
    seed::teacher(id)
}

pub fn student(id: u8) -> CimInstance {
    seed::student(id)
}

/// Path of `TeacherN` in the sample namespace
pub fn teacher_path(id: u8) -> ObjectPath {
    teacher(id)
        .build_path(NAMESPACE)
        .expect("Invalid teacher path in test fixture")
}

/// Path of `StudentN` in the sample namespace
pub fn student_path(id: u8) -> ObjectPath {
    student(id)
        .build_path(NAMESPACE)
        .expect("Invalid student path in test fixture")
}

/// Keyless class path in the sample namespace
pub fn class_path(class: SampleClass) -> ObjectPath {
    ObjectPath::new(class.class_name()).with_namespace(NAMESPACE)
}

/// Path of the association instance linking `TeacherT` and `StudentS`
pub fn link_path(class: SampleClass, teacher_id: u8, student_id: u8) -> ObjectPath {
    seed::link(class, teacher_path(teacher_id), student_path(student_id))
        .expect("Not an association class")
        .build_path(NAMESPACE)
        .expect("Invalid association path in test fixture")
}

/// Association instance linking `TeacherT` and `StudentS`
pub fn link(class: SampleClass, teacher_id: u8, student_id: u8) -> CimInstance {
    seed::link(class, teacher_path(teacher_id), student_path(student_id))
        .expect("Not an association class")
}

/// Provider initialized against the sample schema
pub async fn provider_with(config: ProviderConfig) -> SampleAssociationProvider {
    let provider = SampleAssociationProvider::new(config);
    provider
        .initialize(Arc::new(StaticSchemaHandle::sample(NAMESPACE)))
        .await
        .expect("Provider failed to initialize");
    provider
}

/// Read-only provider initialized against the sample schema
pub async fn provider() -> SampleAssociationProvider {
    provider_with(ProviderConfig::default()).await
}
