use std::any::Any;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::annotation::AnnotationMetadata;
use crate::bean::AutumnIdentified;
use crate::types::{ArgumentType, PrimitiveType};

/// Describes a parameter or a return slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    argument_type: ArgumentType,
    name: Cow<'static, str>,
    type_parameters: Vec<(Cow<'static, str>, Argument)>,
    annotation_metadata: AnnotationMetadata,
}

impl Argument {
    pub fn of(argument_type: ArgumentType, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            argument_type,
            name: name.into(),
            type_parameters: Vec::new(),
            annotation_metadata: AnnotationMetadata::empty(),
        }
    }

    /// Argument named after its type
    pub fn of_type(argument_type: ArgumentType) -> Self {
        Self::of(argument_type, argument_type.simple_name())
    }

    pub fn of_bean<B: AutumnIdentified + Any>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::of(ArgumentType::bean::<B>(), name)
    }

    pub fn primitive(primitive: PrimitiveType, name: impl Into<Cow<'static, str>>) -> Self {
        Self::of(ArgumentType::Primitive(primitive), name)
    }

    pub fn void() -> Self {
        Self::of_type(ArgumentType::Void)
    }

    pub fn object() -> Self {
        Self::of_type(ArgumentType::Object)
    }

    /// Binds the next type parameter to the given type variable name, e.g. `E` of `List<E>`.
    pub fn type_variable(mut self, variable: impl Into<Cow<'static, str>>, argument: Argument) -> Self {
        self.type_parameters.push((variable.into(), argument));
        self
    }

    pub fn with_annotation_metadata(mut self, annotation_metadata: AnnotationMetadata) -> Self {
        self.annotation_metadata = annotation_metadata;
        self
    }

    pub fn argument_type(&self) -> ArgumentType {
        self.argument_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation_metadata(&self) -> &AnnotationMetadata {
        &self.annotation_metadata
    }

    pub fn type_parameters(&self) -> impl Iterator<Item=&Argument> {
        self.type_parameters.iter().map(|(_, argument)| argument)
    }

    pub fn type_variables(&self) -> impl Iterator<Item=(&str, &Argument)> {
        self.type_parameters.iter().map(|(variable, argument)| (variable.as_ref(), argument))
    }

    pub fn find_type_variable(&self, variable: &str) -> Option<&Argument> {
        self.type_variables()
            .find(|(name, _)| *name == variable)
            .map(|(_, argument)| argument)
    }

    pub fn first_type_variable(&self) -> Option<&Argument> {
        self.type_parameters().next()
    }

    /// Type with its generic parameters, e.g. `List<String>`
    pub fn type_string(&self, simple: bool) -> String {
        let mut text = String::from(match simple {
            true => self.argument_type.simple_name(),
            false => self.argument_type.name(),
        });
        if !self.type_parameters.is_empty() {
            let parameters = self.type_parameters()
                .map(|parameter| parameter.type_string(simple))
                .collect::<Vec<_>>();
            text.push('<');
            text.push_str(&parameters.join(", "));
            text.push('>');
        }
        text
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.type_string(true), self.name)
    }
}
