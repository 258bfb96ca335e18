// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider configuration

use serde::{Deserialize, Serialize};

use crate::domain::invariants::validate_namespace;
use crate::errors::{ProviderError, ProviderResult};

/// Namespace the sample association provider serves
pub const SAMPLE_NAMESPACE: &str = "root/SampleProvider";

/// Configuration for the association provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Namespace every request path must carry (compared exactly)
    pub namespace: String,
    /// Allow create/set/delete against the in-memory registry
    #[serde(default)]
    pub enable_modifications: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            namespace: SAMPLE_NAMESPACE.to_string(),
            enable_modifications: false,
        }
    }
}

impl ProviderConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_modifications(mut self, enabled: bool) -> Self {
        self.enable_modifications = enabled;
        self
    }

    /// Load from `CIM_PROVIDER_NAMESPACE` and `CIM_PROVIDER_ENABLE_MODIFICATIONS`
    pub fn from_env() -> ProviderResult<Self> {
        let namespace = std::env::var("CIM_PROVIDER_NAMESPACE")
            .unwrap_or_else(|_| SAMPLE_NAMESPACE.to_string());

        let enable_modifications = match std::env::var("CIM_PROVIDER_ENABLE_MODIFICATIONS") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                ProviderError::Configuration(format!(
                    "CIM_PROVIDER_ENABLE_MODIFICATIONS must be a boolean, got {:?}",
                    raw
                ))
            })?,
            Err(_) => false,
        };

        let config = Self {
            namespace,
            enable_modifications,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the namespace is well formed
    pub fn validate(&self) -> ProviderResult<()> {
        validate_namespace(&self.namespace)
            .map_err(|e| ProviderError::Configuration(e.to_string()))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
