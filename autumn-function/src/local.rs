use std::collections::HashMap;
use std::sync::Arc;

use autumn_inject::argument::Argument;
use autumn_inject::bean::BeanValue;
use autumn_inject::method::ExecutableMethod;
use autumn_inject::result::AutumnError;
use autumn_inject::types::ArgumentType;
use autumn_inject::value::AutumnValue;

use crate::definition::FunctionDefinition;
use crate::invoker::FunctionInvoker;
use crate::result::{FunctionError, FunctionResult};

/// Invokes functions in process by calling an executable method on a bean.
///
/// The input is handed to the method as is when it declares one argument, spread when it
/// declares more (the input must be a list then) and dropped when it declares none (the input
/// must be null then). The result must be null or an instance of the expected output type,
/// it is never coerced.
#[derive(Default)]
pub struct LocalFunctionInvoker {
    functions: HashMap<String, LocalFunction>,
}

struct LocalFunction {
    bean: BeanValue,
    method: Arc<ExecutableMethod>,
}

impl LocalFunctionInvoker {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, bean: BeanValue, method: Arc<ExecutableMethod>) -> FunctionResult<()> {
        let name = name.into();
        if self.functions.contains_key(&name) {
            return Err(FunctionError::FunctionAlreadyExist(name));
        }
        if !method.declaring_type().accepts(bean.bean_type()) {
            return Err(FunctionError::Method(AutumnError::InvalidInstance {
                declaring_type: method.declaring_type().name(),
                method: method.method_name().to_string().into(),
            }));
        }
        tracing::debug!(function = %name, method = %method, "bound local function");
        self.functions.insert(name, LocalFunction { bean, method });
        Ok(())
    }

    pub fn with(mut self, name: impl Into<String>, bean: BeanValue, method: Arc<ExecutableMethod>) -> FunctionResult<Self> {
        self.bind(name, bean, method)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    fn arguments(function: &str, method: &ExecutableMethod, input: AutumnValue) -> FunctionResult<Vec<AutumnValue>> {
        match (method.arguments().len(), input) {
            (0, AutumnValue::Null) => Ok(Vec::new()),
            (0, input) => Err(FunctionError::InvalidInput {
                function: function.to_string(),
                reason: format!("function takes no input but got [{}]", input.type_name()),
            }),
            (1, input) => Ok(vec![input]),
            (_, AutumnValue::List(values)) => Ok(values),
            (count, input) => Err(FunctionError::InvalidInput {
                function: function.to_string(),
                reason: format!("expected a list of {} values but got [{}]", count, input.type_name()),
            }),
        }
    }

    fn check_output(function: &str, output: &AutumnValue, output_type: &Argument) -> FunctionResult<()> {
        let expected = output_type.argument_type();
        let matches = match expected {
            _ if output.is_null() => true,
            ArgumentType::Void => false,
            expected => expected.wrapper_type().is_instance(output),
        };
        match matches {
            true => Ok(()),
            false => Err(FunctionError::OutputTypeMismatch {
                function: function.to_string(),
                expected: output_type.type_string(true),
                actual: output.type_name(),
            }),
        }
    }
}

#[crate::async_trait]
impl FunctionInvoker<AutumnValue, AutumnValue> for LocalFunctionInvoker {
    type Error = FunctionError;

    async fn invoke(&self, definition: &FunctionDefinition, input: AutumnValue, output_type: &Argument) -> FunctionResult<AutumnValue> {
        let name = definition.name();
        let function = self.functions.get(name)
            .ok_or_else(|| FunctionError::FunctionNotFound(name.to_string()))?;
        let arguments = Self::arguments(name, &function.method, input)?;
        tracing::debug!(function = %name, method = %function.method, "invoking local function");
        let output = function.method.invoke_bean(&function.bean, &arguments)?;
        Self::check_output(name, &output, output_type)?;
        Ok(output)
    }
}
