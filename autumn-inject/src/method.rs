use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::annotation::AnnotationMetadata;
use crate::argument::Argument;
use crate::bean::{AutumnIdentified, BeanType, BeanValue};
use crate::result::{AutumnError, AutumnResult};
use crate::return_type::ReturnType;
use crate::types::ArgumentType;
use crate::value::AutumnValue;

/// Method specific invocation step. One implementation exists per target method,
/// it is called only after the arguments were validated against the declared ones.
pub trait MethodDispatch: Send + Sync {
    fn invoke_internal(&self, instance: &dyn Any, arguments: &[AutumnValue]) -> AutumnResult<AutumnValue>;

    /// Declared shape of the target method, if the dispatch step knows it.
    fn target_method(&self) -> Option<TargetMethod> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetMethod {
    pub return_type: Argument,
    pub annotation_metadata: AnnotationMetadata,
}

/// Dispatch step backed by a closure over the declaring bean.
pub struct FnDispatch<B, F> {
    method_name: Cow<'static, str>,
    target_method: Option<TargetMethod>,
    function: F,
    _marker: PhantomData<fn(&B)>,
}

/// Dispatch step whose target method falls back to one given at build time.
struct TargetedDispatch {
    dispatch: Arc<dyn MethodDispatch>,
    target_method: TargetMethod,
}

pub struct ExecutableMethod {
    declaring_type: BeanType,
    method_name: Cow<'static, str>,
    arguments: Vec<Argument>,
    argument_types: Vec<ArgumentType>,
    annotation_metadata: AnnotationMetadata,
    return_type: ReturnType,
    dispatch: Arc<dyn MethodDispatch>,
}

pub struct ExecutableMethodBuilder<B> {
    method_name: Cow<'static, str>,
    arguments: Vec<Argument>,
    generic_return_type: Option<Argument>,
    annotation_metadata: AnnotationMetadata,
    target_method: Option<TargetMethod>,
    _marker: PhantomData<fn(&B)>,
}

impl<B, F> FnDispatch<B, F>
where
    B: AutumnIdentified + Any,
    F: Fn(&B, &[AutumnValue]) -> AutumnResult<AutumnValue> + Send + Sync,
{
    pub fn new(method_name: impl Into<Cow<'static, str>>, function: F) -> Self {
        Self {
            method_name: method_name.into(),
            target_method: None,
            function,
            _marker: PhantomData,
        }
    }

    pub fn with_target_method(mut self, target_method: TargetMethod) -> Self {
        self.target_method = Some(target_method);
        self
    }
}

impl<B, F> MethodDispatch for FnDispatch<B, F>
where
    B: AutumnIdentified + Any,
    F: Fn(&B, &[AutumnValue]) -> AutumnResult<AutumnValue> + Send + Sync,
{
    fn invoke_internal(&self, instance: &dyn Any, arguments: &[AutumnValue]) -> AutumnResult<AutumnValue> {
        let bean = instance.downcast_ref::<B>()
            .ok_or_else(|| AutumnError::InvalidInstance {
                declaring_type: type_name::<B>(),
                method: self.method_name.clone(),
            })?;
        (self.function)(bean, arguments)
    }

    fn target_method(&self) -> Option<TargetMethod> {
        self.target_method.clone()
    }
}

impl MethodDispatch for TargetedDispatch {
    fn invoke_internal(&self, instance: &dyn Any, arguments: &[AutumnValue]) -> AutumnResult<AutumnValue> {
        self.dispatch.invoke_internal(instance, arguments)
    }

    fn target_method(&self) -> Option<TargetMethod> {
        self.dispatch.target_method().or_else(|| Some(self.target_method.clone()))
    }
}

impl ExecutableMethod {
    pub fn new(
        declaring_type: BeanType,
        method_name: impl Into<Cow<'static, str>>,
        generic_return_type: Option<Argument>,
        arguments: Vec<Argument>,
        dispatch: Arc<dyn MethodDispatch>,
    ) -> Self {
        let method_name = method_name.into();
        Self {
            declaring_type,
            argument_types: arguments.iter().map(Argument::argument_type).collect(),
            arguments,
            annotation_metadata: AnnotationMetadata::empty(),
            return_type: ReturnType::new(method_name.clone(), generic_return_type, dispatch.clone()),
            method_name,
            dispatch,
        }
    }

    pub fn builder<B: AutumnIdentified + Any>(method_name: impl Into<Cow<'static, str>>) -> ExecutableMethodBuilder<B> {
        ExecutableMethodBuilder {
            method_name: method_name.into(),
            arguments: Vec::new(),
            generic_return_type: None,
            annotation_metadata: AnnotationMetadata::empty(),
            target_method: None,
            _marker: PhantomData,
        }
    }

    pub fn with_annotation_metadata(mut self, annotation_metadata: AnnotationMetadata) -> Self {
        self.annotation_metadata = annotation_metadata;
        self
    }

    /// Validates the arguments against the declared ones, then hands them to the dispatch step.
    pub fn invoke(&self, instance: &dyn Any, arguments: &[AutumnValue]) -> AutumnResult<AutumnValue> {
        self.validate_arguments(arguments)?;
        tracing::trace!(method = %self.method_name, declaring_type = self.declaring_type.name(), "dispatching");
        self.dispatch.invoke_internal(instance, arguments)
    }

    pub fn invoke_bean(&self, bean: &BeanValue, arguments: &[AutumnValue]) -> AutumnResult<AutumnValue> {
        self.invoke(bean.instance(), arguments)
    }

    fn validate_arguments(&self, values: &[AutumnValue]) -> AutumnResult<()> {
        if self.arguments.len() != values.len() {
            tracing::warn!(method = %self.method_name, required = self.arguments.len(), actual = values.len(), "wrong number of arguments");
            return Err(AutumnError::InvalidArgumentCount {
                method: self.method_name.clone(),
            });
        }
        for (argument, value) in self.arguments.iter().zip(values) {
            if !value.is_null() && !argument.argument_type().wrapper_type().is_instance(value) {
                tracing::warn!(method = %self.method_name, argument = %argument, actual = value.type_name(), "invalid argument type");
                return Err(AutumnError::InvalidArgumentType {
                    argument: argument.to_string(),
                    actual: Cow::Borrowed(value.type_name()),
                    method: self.method_name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn declaring_type(&self) -> BeanType {
        self.declaring_type
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument_types(&self) -> &[ArgumentType] {
        &self.argument_types
    }

    pub fn return_type(&self) -> &ReturnType {
        &self.return_type
    }

    pub fn annotation_metadata(&self) -> &AnnotationMetadata {
        &self.annotation_metadata
    }
}

impl PartialEq for ExecutableMethod {
    fn eq(&self, other: &Self) -> bool {
        self.declaring_type == other.declaring_type
            && self.method_name == other.method_name
            && self.argument_types == other.argument_types
    }
}

impl Eq for ExecutableMethod {}

impl Hash for ExecutableMethod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring_type.hash(state);
        self.method_name.hash(state);
        self.argument_types.hash(state);
    }
}

impl Display for ExecutableMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{} {}({})", self.return_type.argument_type().simple_name(), self.method_name, arguments)
    }
}

impl Debug for ExecutableMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableMethod")
            .field("declaring_type", &self.declaring_type)
            .field("method_name", &self.method_name)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl<B: AutumnIdentified + Any> ExecutableMethodBuilder<B> {
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item=Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn returns(mut self, generic_return_type: Argument) -> Self {
        self.generic_return_type = Some(generic_return_type);
        self
    }

    pub fn annotation_metadata(mut self, annotation_metadata: AnnotationMetadata) -> Self {
        self.annotation_metadata = annotation_metadata;
        self
    }

    pub fn target_method(mut self, target_method: TargetMethod) -> Self {
        self.target_method = Some(target_method);
        self
    }

    pub fn dispatch<F>(self, function: F) -> ExecutableMethod
    where
        F: Fn(&B, &[AutumnValue]) -> AutumnResult<AutumnValue> + Send + Sync + 'static,
    {
        let dispatch = FnDispatch::<B, F>::new(self.method_name.clone(), function);
        self.dispatch_with(Arc::new(dispatch))
    }

    /// A target method set on the builder is used when the dispatch step does not expose its own.
    pub fn dispatch_with(self, dispatch: Arc<dyn MethodDispatch>) -> ExecutableMethod {
        let dispatch: Arc<dyn MethodDispatch> = match self.target_method {
            Some(target_method) => Arc::new(TargetedDispatch { dispatch, target_method }),
            None => dispatch,
        };
        ExecutableMethod::new(
            BeanType::of::<B>(),
            self.method_name,
            self.generic_return_type,
            self.arguments,
            dispatch,
        ).with_annotation_metadata(self.annotation_metadata)
    }
}
