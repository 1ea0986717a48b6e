use serde::Deserialize;

/// Deployable function target, known by name and optionally by the URI it is served at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct FunctionDefinition {
    name: String,
    #[serde(default)]
    uri: Option<String>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: None,
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}
