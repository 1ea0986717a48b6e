use std::collections::HashMap;

use serde::Deserialize;

use crate::definition::FunctionDefinition;
use crate::result::{FunctionError, FunctionResult};

/// Function definitions known ahead of time, usually read from YAML:
///
/// ```yaml
/// functions:
///   - name: greet
///     uri: http://localhost:8080/greet
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionDiscoveryConfig {
    #[serde(default)]
    pub functions: Vec<FunctionDefinition>,
}

#[crate::async_trait]
pub trait FunctionDiscoveryClient: Send + Sync {
    async fn get_function(&self, name: &str) -> FunctionResult<FunctionDefinition>;
}

/// Resolves functions from a [FunctionDiscoveryConfig].
#[derive(Debug, Default)]
pub struct DefaultFunctionDiscoveryClient {
    definitions: HashMap<String, FunctionDefinition>,
    names: Vec<String>,
}

impl FunctionDiscoveryConfig {
    pub fn from_yaml(text: &str) -> FunctionResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

impl DefaultFunctionDiscoveryClient {
    pub fn new(config: FunctionDiscoveryConfig) -> FunctionResult<Self> {
        let mut client = Self::default();
        for definition in config.functions {
            if client.definitions.contains_key(definition.name()) {
                return Err(FunctionError::FunctionAlreadyExist(definition.name().to_string()));
            }
            client.names.push(definition.name().to_string());
            client.definitions.insert(definition.name().to_string(), definition);
        }
        tracing::debug!(functions = client.names.len(), "function discovery configured");
        Ok(client)
    }

    pub fn from_yaml(text: &str) -> FunctionResult<Self> {
        Self::new(FunctionDiscoveryConfig::from_yaml(text)?)
    }

    pub fn function_names(&self) -> impl Iterator<Item=&str> {
        self.names.iter().map(String::as_str)
    }
}

#[crate::async_trait]
impl FunctionDiscoveryClient for DefaultFunctionDiscoveryClient {
    async fn get_function(&self, name: &str) -> FunctionResult<FunctionDefinition> {
        self.definitions.get(name)
            .cloned()
            .ok_or_else(|| FunctionError::FunctionNotFound(name.to_string()))
    }
}
