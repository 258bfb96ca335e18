// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Lifecycle and Modification Tests
//!
//! A provider serves requests only between `initialize` and `cleanup`.
//! Instance modifications are rejected unless the configuration enables
//! them, and accepted modifications are visible to association queries.

mod fixtures;

use std::sync::Arc;

use anyhow::Result;
use cim_provider::domain::CimInstance;
use cim_provider::registry::seed;
use cim_provider::state_machine::ProviderState;
use cim_provider::{
    AssociationFilter, AssociatorProvider, CimStatusCode, InstanceProvider, ObjectPath,
    PropertySelection, ProviderConfig, ProviderError, SampleAssociationProvider, SampleClass,
    StaticSchemaHandle,
};
use pretty_assertions::assert_eq;

use fixtures::*;

fn writable() -> ProviderConfig {
    ProviderConfig::default().with_modifications(true)
}

#[tokio::test]
async fn test_requests_before_initialize_fail() {
    let provider = SampleAssociationProvider::new(ProviderConfig::default());

    // Lifecycle is checked before the namespace
    let foreign = ObjectPath::new("Sample_Teacher").with_namespace("root/cimv2");
    let err = provider
        .enumerate_instance_names(&context(), &foreign)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NotInitialized(_)));
    assert_eq!(err.status_code(), CimStatusCode::Failed);

    let err = provider
        .associator_names(
            &context(),
            &class_path(SampleClass::TeacherStudent),
            &teacher_path(1),
            &AssociationFilter::any(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NotInitialized(_)));
}

#[tokio::test]
async fn test_requests_after_cleanup_fail() -> Result<()> {
    let provider = provider().await;
    assert_eq!(provider.state().await, ProviderState::Initialized);

    provider.cleanup().await?;
    assert_eq!(provider.state().await, ProviderState::CleanedUp);

    let result = provider
        .reference_names(
            &context(),
            &class_path(SampleClass::AdvisorStudent),
            &teacher_path(1),
            None,
        )
        .await;
    assert!(matches!(result, Err(ProviderError::NotInitialized(_))));

    // A cleaned-up provider cannot be revived
    let again = provider
        .initialize(Arc::new(StaticSchemaHandle::sample(NAMESPACE)))
        .await;
    assert!(again.is_err());
    assert!(provider.cleanup().await.is_err());
    assert_eq!(provider.transition_count().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_initialize_against_foreign_schema_fails() {
    let provider = SampleAssociationProvider::new(ProviderConfig::default());

    let result = provider
        .initialize(Arc::new(StaticSchemaHandle::sample("root/cimv2")))
        .await;
    assert!(matches!(result, Err(ProviderError::InvalidNamespace(_))));
    assert_eq!(provider.state().await, ProviderState::Uninitialized);
}

#[test]
fn test_initialize_blocking() {
    let provider = SampleAssociationProvider::new(ProviderConfig::default());
    tokio_test::block_on(provider.initialize(Arc::new(StaticSchemaHandle::sample(NAMESPACE))))
        .expect("initialize");
    assert_eq!(tokio_test::block_on(provider.state()), ProviderState::Initialized);
}

#[tokio::test]
async fn test_modifications_disabled_by_default() {
    let provider = provider().await;
    let path = class_path(SampleClass::Teacher);

    let created = provider.create_instance(&context(), &path, seed::teacher(5)).await;
    assert!(matches!(created, Err(ProviderError::NotSupported(_))));

    let set = provider.set_instance(&context(), &path, teacher(1)).await;
    assert!(matches!(set, Err(ProviderError::NotSupported(_))));

    let deleted = provider.delete_instance(&context(), &teacher_path(1)).await;
    assert!(matches!(deleted, Err(ProviderError::NotSupported(_))));
}

#[tokio::test]
async fn test_create_get_delete_round_trip() -> Result<()> {
    let provider = provider_with(writable()).await;
    let selection = PropertySelection::all();

    let created = provider
        .create_instance(&context(), &class_path(SampleClass::Teacher), teacher(5))
        .await?;
    assert_eq!(created, teacher_path(5));

    let fetched = provider.get_instance(&context(), &created, &selection).await?;
    assert_eq!(fetched, teacher(5));

    let duplicate = provider
        .create_instance(&context(), &class_path(SampleClass::Teacher), teacher(5))
        .await;
    assert!(matches!(duplicate, Err(ProviderError::AlreadyExists(_))));

    provider.delete_instance(&context(), &created).await?;
    let gone = provider.get_instance(&context(), &created, &selection).await;
    assert!(matches!(gone, Err(ProviderError::NotFound(_))));

    let again = provider.delete_instance(&context(), &created).await;
    assert!(matches!(again, Err(ProviderError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_created_link_is_traversable() -> Result<()> {
    let provider = provider_with(writable()).await;

    provider
        .create_instance(
            &context(),
            &class_path(SampleClass::AdvisorStudent),
            link(SampleClass::AdvisorStudent, 3, 1),
        )
        .await?;

    let advisors = provider
        .associator_names(
            &context(),
            &class_path(SampleClass::AdvisorStudent),
            &student_path(1),
            &AssociationFilter::any(),
        )
        .await?;
    assert_eq!(advisors, vec![teacher_path(1), teacher_path(3)]);
    Ok(())
}

#[tokio::test]
async fn test_set_instance_replaces_in_place() -> Result<()> {
    let provider = provider_with(writable()).await;
    let path = class_path(SampleClass::Student);

    let missing = provider.set_instance(&context(), &path, student(9)).await;
    assert!(matches!(missing, Err(ProviderError::NotFound(_))));

    provider.set_instance(&context(), &path, student(2)).await?;
    let names = provider.enumerate_instance_names(&context(), &path).await?;
    assert_eq!(names, vec![student_path(1), student_path(2), student_path(3)]);
    Ok(())
}

#[tokio::test]
async fn test_modifications_checked_against_schema() {
    let provider = provider_with(writable()).await;
    let path = class_path(SampleClass::Student);

    let undeclared = student(4).with_property("Grade", 3u8);
    let result = provider.create_instance(&context(), &path, undeclared).await;
    assert!(matches!(result, Err(ProviderError::InvalidParameter(_))));

    let mistyped = CimInstance::new("Sample_Student")
        .with_key_property("Name", "Student4")
        .with_key_property("Identifier", "four");
    let result = provider.create_instance(&context(), &path, mistyped).await;
    assert!(matches!(result, Err(ProviderError::TypeMismatch(_))));

    let wrong_class = provider.create_instance(&context(), &path, teacher(6)).await;
    assert!(matches!(wrong_class, Err(ProviderError::InvalidClass(_))));
}

#[tokio::test]
async fn test_exec_query_always_rejected() {
    let provider = provider_with(writable()).await;

    let result = provider
        .exec_query(
            &context(),
            &class_path(SampleClass::Teacher),
            "SELECT * FROM Sample_Teacher",
            "WQL",
        )
        .await;
    assert_eq!(
        result.map_err(|e| e.status_code()),
        Err(CimStatusCode::NotSupported)
    );
}
