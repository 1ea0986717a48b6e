use autumn_inject::argument::Argument;

use crate::definition::FunctionDefinition;

/// Invokes a function for the given input, producing a value of the expected output type.
///
/// How failures are reported, and whether a result not matching `output_type` is rejected
/// or coerced, is up to the implementation and surfaces through [FunctionInvoker::Error].
#[crate::async_trait]
pub trait FunctionInvoker<I: Send + 'static, O: Send + 'static>: Send + Sync {
    type Error: Send + 'static;

    async fn invoke(&self, definition: &FunctionDefinition, input: I, output_type: &Argument) -> Result<O, Self::Error>;
}
