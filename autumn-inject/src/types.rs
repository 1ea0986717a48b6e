use std::any::Any;
use std::fmt::{Display, Formatter};

use crate::bean::{AutumnIdentified, BeanType};
use crate::value::AutumnValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

/// Declared type of a parameter or return slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    Void,
    Primitive(PrimitiveType),
    Boxed(PrimitiveType),
    String,
    List,
    /// Every non-null value is an instance of it
    Object,
    Bean(BeanType),
}

impl PrimitiveType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    pub const fn wrapper_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Char => "Character",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
        }
    }
}

impl ArgumentType {
    pub fn bean<B: AutumnIdentified + Any>() -> Self {
        Self::Bean(BeanType::of::<B>())
    }

    /// Boxed form of a primitive slot, any other type is returned as is.
    pub const fn wrapper_type(self) -> Self {
        match self {
            Self::Primitive(primitive) => Self::Boxed(primitive),
            other => other,
        }
    }

    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Null is not an instance of anything and primitive slots hold no instances,
    /// so check against [ArgumentType::wrapper_type] when a primitive must accept its boxed value.
    pub fn is_instance(&self, value: &AutumnValue) -> bool {
        match (self, value) {
            (_, AutumnValue::Null) => false,
            (Self::Object, _) => true,
            (Self::Boxed(primitive), value) => value.primitive_type() == Some(*primitive),
            (Self::String, AutumnValue::String(_)) => true,
            (Self::List, AutumnValue::List(_)) => true,
            (Self::Bean(bean_type), AutumnValue::Bean(bean)) => bean_type.accepts(bean.bean_type()),
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Primitive(primitive) => primitive.name(),
            Self::Boxed(primitive) => primitive.wrapper_name(),
            Self::String => "String",
            Self::List => "List",
            Self::Object => "Object",
            Self::Bean(bean_type) => bean_type.name(),
        }
    }

    pub fn simple_name(&self) -> &'static str {
        match self {
            Self::Bean(bean_type) => bean_type.simple_name(),
            other => other.name(),
        }
    }
}

impl Display for ArgumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
