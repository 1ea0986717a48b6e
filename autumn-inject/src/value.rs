use std::any::Any;
use std::borrow::Cow;

use crate::bean::BeanValue;
use crate::types::PrimitiveType;

/// Runtime value passed to and returned from executable methods.
/// Primitive variants are the boxed form, so they may stand in for both primitive and boxed slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AutumnValue {
    #[default]
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Cow<'static, str>),
    List(Vec<AutumnValue>),
    Bean(BeanValue),
}

impl AutumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Self::Boolean(_) => Some(PrimitiveType::Boolean),
            Self::Byte(_) => Some(PrimitiveType::Byte),
            Self::Short(_) => Some(PrimitiveType::Short),
            Self::Char(_) => Some(PrimitiveType::Char),
            Self::Int(_) => Some(PrimitiveType::Int),
            Self::Long(_) => Some(PrimitiveType::Long),
            Self::Float(_) => Some(PrimitiveType::Float),
            Self::Double(_) => Some(PrimitiveType::Double),
            _ => None,
        }
    }

    /// Name of the runtime type, as reported in argument errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Bean(bean) => bean.bean_type().name(),
            primitive => primitive.primitive_type()
                .map(PrimitiveType::wrapper_name)
                .unwrap_or("Object"),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AutumnValue]> {
        match self {
            Self::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_bean<B: Any>(&self) -> Option<&B> {
        match self {
            Self::Bean(bean) => bean.downcast_ref(),
            _ => None,
        }
    }
}

macro_rules! autumn_value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for AutumnValue {
                fn from(value: $source) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

autumn_value_from! {
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    char => Char,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    &'static str => String,
    String => String,
    Vec<AutumnValue> => List,
    BeanValue => Bean,
}

impl<T: Into<AutumnValue>> From<Option<T>> for AutumnValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}
