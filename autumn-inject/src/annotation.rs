use std::borrow::Cow;

use crate::value::AutumnValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    name: Cow<'static, str>,
    members: Vec<(Cow<'static, str>, AutumnValue)>,
}

/// Annotations attached to a method or to an argument slot, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationMetadata {
    annotations: Vec<Annotation>,
}

impl Annotation {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<AutumnValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.members.iter_mut().find(|(member, _)| *member == name) {
            Some((_, existing)) => *existing = value,
            None => self.members.push((name, value)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, member: &str) -> Option<&AutumnValue> {
        self.members.iter()
            .find(|(name, _)| name == member)
            .map(|(_, value)| value)
    }
}

impl AnnotationMetadata {
    pub fn empty() -> Self {
        Default::default()
    }

    /// Adds the annotation, replacing an earlier one with the same name.
    pub fn with(mut self, annotation: Annotation) -> Self {
        match self.annotations.iter_mut().find(|existing| existing.name == annotation.name) {
            Some(existing) => *existing = annotation,
            None => self.annotations.push(annotation),
        }
        self
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|annotation| annotation.name == name)
    }

    pub fn value(&self, annotation: &str, member: &str) -> Option<&AutumnValue> {
        self.annotation(annotation).and_then(|annotation| annotation.value(member))
    }

    pub fn annotation_names(&self) -> impl Iterator<Item=&str> {
        self.annotations.iter().map(Annotation::name)
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
