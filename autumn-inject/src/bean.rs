use std::any::{type_name, Any, TypeId};
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub trait AutumnIdentified {
    /// This identifier will be used to get [std::any::TypeId] from
    type Identifier: Any;
}

pub fn autumn_id<T: AutumnIdentified>() -> TypeId {
    TypeId::of::<T::Identifier>()
}

/// Identity of a user type that declares methods or travels as an argument.
/// Compared by its [AutumnIdentified::Identifier], while instance checks use the concrete type.
#[derive(Clone, Copy)]
pub struct BeanType {
    id: TypeId,
    concrete_id: TypeId,
    name: &'static str,
}

#[derive(Clone)]
pub struct BeanValue {
    bean_type: BeanType,
    instance: Arc<dyn Any + Send + Sync>,
}

impl BeanType {
    pub fn of<B: AutumnIdentified + Any>() -> Self {
        Self {
            id: autumn_id::<B>(),
            concrete_id: TypeId::of::<B>(),
            name: type_name::<B>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Whether a bean of `other` can be downcast to this type.
    pub fn accepts(&self, other: BeanType) -> bool {
        self.concrete_id == other.concrete_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn simple_name(&self) -> &'static str {
        let name = self.name.split('<').next().unwrap_or(self.name);
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl PartialEq for BeanType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BeanType {}

impl Hash for BeanType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl Debug for BeanType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

impl BeanValue {
    pub fn new<B: AutumnIdentified + Any + Send + Sync>(bean: B) -> Self {
        Self::from_arc(Arc::new(bean))
    }

    pub fn from_arc<B: AutumnIdentified + Any + Send + Sync>(bean: Arc<B>) -> Self {
        Self {
            bean_type: BeanType::of::<B>(),
            instance: bean,
        }
    }

    pub fn bean_type(&self) -> BeanType {
        self.bean_type
    }

    pub fn instance(&self) -> &(dyn Any + Send + Sync) {
        self.instance.as_ref()
    }

    pub fn downcast_ref<B: Any>(&self) -> Option<&B> {
        self.instance.downcast_ref::<B>()
    }

    pub fn ptr_eq(&self, other: &BeanValue) -> bool {
        Arc::as_ptr(&self.instance) as *const () == Arc::as_ptr(&other.instance) as *const ()
    }
}

impl PartialEq for BeanValue {
    fn eq(&self, other: &Self) -> bool {
        self.bean_type == other.bean_type && self.ptr_eq(other)
    }
}

impl Debug for BeanValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BeanValue").field(&self.bean_type).finish()
    }
}
