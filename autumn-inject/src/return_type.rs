use std::borrow::Cow;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use crate::annotation::AnnotationMetadata;
use crate::argument::Argument;
use crate::method::MethodDispatch;
use crate::types::ArgumentType;

/// Return slot of an executable method.
///
/// Without an explicit generic return type the slot is resolved from the dispatch step's
/// target method the first time it is queried.
pub struct ReturnType {
    method_name: Cow<'static, str>,
    generic_return_type: Option<Argument>,
    dispatch: Arc<dyn MethodDispatch>,
    resolved: OnceLock<ResolvedReturnType>,
}

struct ResolvedReturnType {
    argument: Argument,
    method_annotation_metadata: Option<AnnotationMetadata>,
}

impl ReturnType {
    pub(crate) fn new(
        method_name: Cow<'static, str>,
        generic_return_type: Option<Argument>,
        dispatch: Arc<dyn MethodDispatch>,
    ) -> Self {
        Self {
            method_name,
            generic_return_type,
            dispatch,
            resolved: OnceLock::new(),
        }
    }

    fn resolved(&self) -> &ResolvedReturnType {
        self.resolved.get_or_init(|| {
            let target_method = self.dispatch.target_method();
            let argument = match (&self.generic_return_type, &target_method) {
                (Some(generic_return_type), _) => generic_return_type.clone(),
                (None, Some(target_method)) => target_method.return_type.clone(),
                (None, None) => {
                    tracing::warn!(method = %self.method_name, "no return type known, falling back to Object");
                    Argument::object()
                }
            };
            ResolvedReturnType {
                argument,
                method_annotation_metadata: target_method.map(|target_method| target_method.annotation_metadata),
            }
        })
    }

    pub fn argument(&self) -> &Argument {
        &self.resolved().argument
    }

    pub fn argument_type(&self) -> ArgumentType {
        self.argument().argument_type()
    }

    pub fn type_parameters(&self) -> impl Iterator<Item=&Argument> {
        self.argument().type_parameters()
    }

    pub fn type_variables(&self) -> impl Iterator<Item=(&str, &Argument)> {
        self.argument().type_variables()
    }

    /// Annotations of the target method when the dispatch step exposes one,
    /// otherwise those of the return argument.
    pub fn annotation_metadata(&self) -> &AnnotationMetadata {
        let resolved = self.resolved();
        resolved.method_annotation_metadata.as_ref()
            .unwrap_or_else(|| resolved.argument.annotation_metadata())
    }
}

impl Debug for ReturnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReturnType").field(self.argument()).finish()
    }
}
