// Copyright (c) 2025 - Cowboy AI, Inc.
//! Association Query Tool
//!
//! Runs one operation against the seeded sample provider and prints the
//! result as JSON on stdout. Logs go to stderr.
//!
//! ```text
//! cim-assoc-query <operation> <classPath> [targetPath] [role]
//!
//! operations:
//!   associator-names | associators | reference-names | references
//!       <assocClass> <targetPath> [role]
//!   enumerate-names | enumerate   <class>
//!   get                           <instancePath>
//! ```
//!
//! Class arguments without a namespace get the configured one
//! (`CIM_PROVIDER_NAMESPACE`, default `root/SampleProvider`).
//!
//! Run with: cargo run --bin cim-assoc-query -- associator-names Sample_TeacherStudent \
//!     'root/SampleProvider:Sample_Teacher.Name="Teacher1",Identifier=1'

use anyhow::{bail, Context, Result};
use cim_provider::{
    AssociationFilter, AssociatorProvider, InstanceProvider, ObjectPath, OperationContext,
    PropertySelection, ProviderConfig, SampleAssociationProvider, StaticSchemaHandle,
};
use std::sync::Arc;
use tracing::info;

const USAGE: &str = "usage: cim-assoc-query <operation> <classPath> [targetPath] [role]";

fn parse_path(raw: &str, namespace: &str) -> Result<ObjectPath> {
    let path: ObjectPath = raw
        .parse()
        .with_context(|| format!("Invalid object path: {}", raw))?;
    Ok(if path.namespace().is_empty() {
        path.with_namespace(namespace)
    } else {
        path
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (operation, class_arg) = match (args.first(), args.get(1)) {
        (Some(op), Some(class)) => (op.as_str(), class.as_str()),
        _ => bail!(USAGE),
    };

    let config = ProviderConfig::from_env().context("Failed to load provider configuration")?;
    let namespace = config.namespace.clone();

    let provider = SampleAssociationProvider::new(config);
    provider
        .initialize(Arc::new(StaticSchemaHandle::sample(namespace.clone())))
        .await
        .context("Failed to initialize provider")?;

    let ctx = OperationContext::new();
    info!(request_id = %ctx.request_id, operation, "Running query");

    let class_path = parse_path(class_arg, &namespace)?;
    let target = || -> Result<ObjectPath> {
        let raw = args.get(2).context(USAGE)?;
        parse_path(raw, &namespace)
    };
    let role = args.get(3).map(String::as_str);
    let filter = match role {
        Some(role) => AssociationFilter::any().with_role(role),
        None => AssociationFilter::any(),
    };
    let selection = PropertySelection::all();

    let output = match operation {
        "associator-names" => serde_json::to_string_pretty(
            &provider
                .associator_names(&ctx, &class_path, &target()?, &filter)
                .await?,
        )?,
        "associators" => serde_json::to_string_pretty(
            &provider
                .associators(&ctx, &class_path, &target()?, &filter, &selection)
                .await?,
        )?,
        "reference-names" => serde_json::to_string_pretty(
            &provider
                .reference_names(&ctx, &class_path, &target()?, role)
                .await?,
        )?,
        "references" => serde_json::to_string_pretty(
            &provider
                .references(&ctx, &class_path, &target()?, role, &selection)
                .await?,
        )?,
        "enumerate-names" => serde_json::to_string_pretty(
            &provider.enumerate_instance_names(&ctx, &class_path).await?,
        )?,
        "enumerate" => serde_json::to_string_pretty(
            &provider
                .enumerate_instances(&ctx, &class_path, &selection)
                .await?,
        )?,
        "get" => serde_json::to_string_pretty(
            &provider.get_instance(&ctx, &class_path, &selection).await?,
        )?,
        other => bail!("Unknown operation {:?}\n{}", other, USAGE),
    };

    println!("{}", output);

    provider.cleanup().await?;
    Ok(())
}
