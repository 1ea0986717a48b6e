use autumn_inject::argument::Argument;

use crate::discovery::FunctionDiscoveryClient;
use crate::invoker::FunctionInvoker;
use crate::result::FunctionError;

/// Calls functions by name: the definition is resolved through discovery, then invoked.
pub struct FunctionClient<D, V> {
    discovery: D,
    invoker: V,
}

impl<D: FunctionDiscoveryClient, V> FunctionClient<D, V> {
    pub fn new(discovery: D, invoker: V) -> Self {
        Self {
            discovery,
            invoker,
        }
    }

    pub fn invoker(&self) -> &V {
        &self.invoker
    }

    pub async fn invoke<I, O>(&self, name: &str, input: I, output_type: &Argument) -> Result<O, <V as FunctionInvoker<I, O>>::Error>
    where
        I: Send + 'static,
        O: Send + 'static,
        V: FunctionInvoker<I, O>,
        <V as FunctionInvoker<I, O>>::Error: From<FunctionError>,
    {
        let definition = self.discovery.get_function(name).await?;
        tracing::debug!(function = %name, uri = ?definition.uri(), "invoking function");
        self.invoker.invoke(&definition, input, output_type).await
    }
}
