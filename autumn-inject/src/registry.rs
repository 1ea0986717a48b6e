use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::bean::{AutumnIdentified, BeanType};
use crate::method::ExecutableMethod;
use crate::result::{AutumnError, AutumnResult};
use crate::types::ArgumentType;

/// Collects executable methods at startup. Frozen into an [ExecutableMethodRegistry] by [Self::build].
#[derive(Default)]
pub struct ExecutableMethodRegistryBuilder {
    method_sources: HashMap<BeanType, ExecutableMethodContainer>,
    count: usize,
}

/// Executable methods keyed by declaring type, method name and argument types.
/// Immutable once built, so it can be shared between threads behind an [Arc].
#[derive(Default)]
pub struct ExecutableMethodRegistry {
    method_sources: HashMap<BeanType, ExecutableMethodContainer>,
    count: usize,
}

#[derive(Default)]
struct ExecutableMethodContainer {
    ordered: Vec<Arc<ExecutableMethod>>,
    names: HashMap<String, Vec<Arc<ExecutableMethod>>>,
}

fn method_key(declaring_type: BeanType, method_name: &str, argument_types: &[ArgumentType]) -> String {
    let argument_types = argument_types.iter()
        .map(ArgumentType::name)
        .collect::<Vec<_>>()
        .join(",");
    format!("{}.{}({})", declaring_type.simple_name(), method_name, argument_types)
}

impl ExecutableMethodContainer {
    fn get(&self, method_name: &str, argument_types: &[ArgumentType]) -> Option<&Arc<ExecutableMethod>> {
        self.names.get(method_name)
            .and_then(|overloads| overloads.iter().find(|method| method.argument_types() == argument_types))
    }

    fn insert(&mut self, method: Arc<ExecutableMethod>) {
        self.names.entry(method.method_name().to_string())
            .or_default()
            .push(method.clone());
        self.ordered.push(method);
    }
}

impl ExecutableMethodRegistryBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn register(&mut self, method: ExecutableMethod) -> AutumnResult<()> {
        let container = self.method_sources.entry(method.declaring_type()).or_default();
        if container.get(method.method_name(), method.argument_types()).is_some() {
            return Err(AutumnError::MethodAlreadyExist(
                method_key(method.declaring_type(), method.method_name(), method.argument_types())
            ));
        }
        tracing::debug!(method = %method, declaring_type = method.declaring_type().name(), "registered executable method");
        container.insert(Arc::new(method));
        self.count += 1;
        Ok(())
    }

    pub fn with(mut self, method: ExecutableMethod) -> AutumnResult<Self> {
        self.register(method)?;
        Ok(self)
    }

    pub fn build(self) -> ExecutableMethodRegistry {
        tracing::debug!(methods = self.count, declaring_types = self.method_sources.len(), "executable method registry built");
        ExecutableMethodRegistry {
            method_sources: self.method_sources,
            count: self.count,
        }
    }
}

impl ExecutableMethodRegistry {
    pub fn builder() -> ExecutableMethodRegistryBuilder {
        ExecutableMethodRegistryBuilder::new()
    }

    pub fn find_method(
        &self,
        declaring_type: BeanType,
        method_name: &str,
        argument_types: &[ArgumentType],
    ) -> Option<&Arc<ExecutableMethod>> {
        self.method_sources.get(&declaring_type)
            .and_then(|container| container.get(method_name, argument_types))
    }

    pub fn get_required_method(
        &self,
        declaring_type: BeanType,
        method_name: &str,
        argument_types: &[ArgumentType],
    ) -> AutumnResult<&Arc<ExecutableMethod>> {
        self.find_method(declaring_type, method_name, argument_types)
            .ok_or_else(|| AutumnError::MethodNotExist(method_key(declaring_type, method_name, argument_types)))
    }

    pub fn find_method_of<B: AutumnIdentified + Any>(&self, method_name: &str, argument_types: &[ArgumentType]) -> Option<&Arc<ExecutableMethod>> {
        self.find_method(BeanType::of::<B>(), method_name, argument_types)
    }

    /// All overloads of the method, in registration order.
    pub fn find_methods(&self, declaring_type: BeanType, method_name: &str) -> impl Iterator<Item=&Arc<ExecutableMethod>> {
        self.method_sources.get(&declaring_type)
            .and_then(|container| container.names.get(method_name))
            .into_iter()
            .flatten()
    }

    pub fn methods_of(&self, declaring_type: BeanType) -> impl Iterator<Item=&Arc<ExecutableMethod>> {
        self.method_sources.get(&declaring_type)
            .map(|container| container.ordered.iter())
            .into_iter()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
