use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::annotation::{Annotation, AnnotationMetadata};
use crate::argument::Argument;
use crate::bean::{AutumnIdentified, BeanValue};
use crate::method::{ExecutableMethod, FnDispatch, MethodDispatch, TargetMethod};
use crate::registry::ExecutableMethodRegistry;
use crate::result::{AutumnError, AutumnResult};
use crate::types::{ArgumentType, PrimitiveType};
use crate::value::AutumnValue;

struct CountService {
    counter: AtomicUsize,
}

impl AutumnIdentified for CountService {
    type Identifier = Self;
}

impl CountService {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }

    pub fn add(&self, amount: usize) -> usize {
        self.counter.fetch_add(amount, Ordering::SeqCst) + amount
    }
}

struct Owner(&'static str);

impl AutumnIdentified for Owner {
    type Identifier = Self;
}

/// Hand written dispatch step, the shape generated adapters take.
struct CountServiceAdd {
    dispatched: AtomicUsize,
}

impl MethodDispatch for CountServiceAdd {
    fn invoke_internal(&self, instance: &dyn Any, arguments: &[AutumnValue]) -> AutumnResult<AutumnValue> {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        let service = instance.downcast_ref::<CountService>()
            .ok_or_else(|| AutumnError::Dispatch("not a CountService".to_string()))?;
        let amount = arguments[0].as_int().unwrap_or(1);
        Ok(AutumnValue::Long(service.add(amount as usize) as i64))
    }

    fn target_method(&self) -> Option<TargetMethod> {
        Some(TargetMethod {
            return_type: Argument::of_type(ArgumentType::Primitive(PrimitiveType::Long)),
            annotation_metadata: AnnotationMetadata::empty().with(Annotation::new("Executable")),
        })
    }
}

fn count_service_add(dispatch: Arc<CountServiceAdd>) -> ExecutableMethod {
    ExecutableMethod::builder::<CountService>("add")
        .argument(Argument::primitive(PrimitiveType::Int, "amount"))
        .dispatch_with(dispatch)
}

fn new_dispatch() -> Arc<CountServiceAdd> {
    Arc::new(CountServiceAdd {
        dispatched: AtomicUsize::new(0),
    })
}

#[test]
fn primitive_argument_accepts_boxed_value_test() {
    let service = CountService::new();
    let method = count_service_add(new_dispatch());
    assert_eq!(method.invoke(&service, &[AutumnValue::Int(2)]).unwrap(), AutumnValue::Long(2));
    assert_eq!(method.invoke(&service, &[AutumnValue::Int(3)]).unwrap(), AutumnValue::Long(5));
}

#[test]
fn null_argument_is_accepted_test() {
    let service = CountService::new();
    let dispatch = new_dispatch();
    let method = count_service_add(dispatch.clone());
    assert_eq!(method.invoke(&service, &[AutumnValue::Null]).unwrap(), AutumnValue::Long(1));
    assert_eq!(dispatch.dispatched.load(Ordering::SeqCst), 1);
}

#[test]
fn rejected_arguments_never_dispatch_test() {
    let service = CountService::new();
    let dispatch = new_dispatch();
    let method = count_service_add(dispatch.clone());
    assert!(matches!(method.invoke(&service, &[]), Err(AutumnError::InvalidArgumentCount { .. })));
    assert!(matches!(method.invoke(&service, &[AutumnValue::Long(1)]), Err(AutumnError::InvalidArgumentType { .. })));
    assert!(matches!(method.invoke(&service, &[AutumnValue::from("1")]), Err(AutumnError::InvalidArgumentType { .. })));
    assert_eq!(dispatch.dispatched.load(Ordering::SeqCst), 0);
}

#[test]
fn arity_is_checked_before_types_test() {
    let method = count_service_add(new_dispatch());
    assert!(matches!(
        method.invoke(&CountService::new(), &[AutumnValue::from("wrong"), AutumnValue::from("types")]),
        Err(AutumnError::InvalidArgumentCount { .. })
    ));
}

#[test]
fn first_type_mismatch_is_reported_test() {
    let method = ExecutableMethod::builder::<Owner>("rename")
        .argument(Argument::of(ArgumentType::String, "first"))
        .argument(Argument::of(ArgumentType::Boxed(PrimitiveType::Boolean), "second"))
        .argument(Argument::of_bean::<Owner>("third"))
        .dispatch(|_, _| Ok(AutumnValue::Null));
    let error = method.invoke(&Owner("jenya"), &["ok".into(), AutumnValue::Int(1), AutumnValue::Int(2)]).unwrap_err();
    assert_eq!(error, AutumnError::InvalidArgumentType {
        argument: "Boolean second".to_string(),
        actual: "Integer".into(),
        method: "rename".into(),
    });

    let owner = AutumnValue::Bean(BeanValue::new(Owner("other")));
    assert!(method.invoke(&Owner("jenya"), &[AutumnValue::Null, true.into(), owner]).is_ok());
    let error = method.invoke(&Owner("jenya"), &[AutumnValue::Null, true.into(), AutumnValue::from("owner")]).unwrap_err();
    assert!(matches!(error, AutumnError::InvalidArgumentType { ref argument, .. } if argument == "Owner third"));
}

#[test]
fn bean_instance_invoke_test() {
    let owner = BeanValue::new(Owner("jenya"));
    let method = ExecutableMethod::builder::<Owner>("name")
        .returns(Argument::of_type(ArgumentType::String))
        .dispatch(|owner, _| Ok(owner.0.into()));
    assert_eq!(method.invoke_bean(&owner, &[]).unwrap(), AutumnValue::from("jenya"));
    assert_eq!(method.to_string(), "String name()");
}

#[test]
fn return_type_from_target_method_test() {
    let method = count_service_add(new_dispatch());
    let return_type = method.return_type();
    assert_eq!(return_type.argument_type(), ArgumentType::Primitive(PrimitiveType::Long));
    assert!(return_type.annotation_metadata().has_annotation("Executable"));
    assert_eq!(method.to_string(), "long add(int amount)");
}

#[test]
fn explicit_return_type_wins_test() {
    let method = ExecutableMethod::builder::<CountService>("add")
        .argument(Argument::primitive(PrimitiveType::Int, "amount"))
        .returns(Argument::of(ArgumentType::List, "counts")
            .type_variable("E", Argument::of_type(ArgumentType::Boxed(PrimitiveType::Long)))
            .with_annotation_metadata(AnnotationMetadata::empty().with(Annotation::new("Nullable"))))
        .dispatch_with(new_dispatch());
    let return_type = method.return_type();
    assert_eq!(return_type.argument_type(), ArgumentType::List);
    assert_eq!(return_type.type_parameters().map(Argument::argument_type).collect::<Vec<_>>(), vec![ArgumentType::Boxed(PrimitiveType::Long)]);
    assert_eq!(return_type.type_variables().map(|(name, _)| name).collect::<Vec<_>>(), vec!["E"]);
    // annotations still come from the target method
    assert!(return_type.annotation_metadata().has_annotation("Executable"));
    assert!(!return_type.annotation_metadata().has_annotation("Nullable"));
}

#[test]
fn return_type_without_target_method_test() {
    let annotated = ExecutableMethod::builder::<Owner>("name")
        .returns(Argument::of_type(ArgumentType::String)
            .with_annotation_metadata(AnnotationMetadata::empty().with(Annotation::new("Nullable"))))
        .dispatch(|_, _| Ok(AutumnValue::Null));
    assert!(annotated.return_type().annotation_metadata().has_annotation("Nullable"));

    let unknown = ExecutableMethod::builder::<Owner>("name")
        .dispatch(|_, _| Ok(AutumnValue::Null));
    assert_eq!(unknown.return_type().argument_type(), ArgumentType::Object);
    assert_eq!(unknown.to_string(), "Object name()");

    let targeted = ExecutableMethod::builder::<Owner>("name")
        .target_method(TargetMethod {
            return_type: Argument::of_type(ArgumentType::String),
            annotation_metadata: AnnotationMetadata::empty(),
        })
        .dispatch(|_, _| Ok(AutumnValue::Null));
    assert_eq!(targeted.return_type().argument_type(), ArgumentType::String);
}

struct OwnerName;

impl MethodDispatch for OwnerName {
    fn invoke_internal(&self, instance: &dyn Any, _: &[AutumnValue]) -> AutumnResult<AutumnValue> {
        let owner = instance.downcast_ref::<Owner>()
            .ok_or_else(|| AutumnError::Dispatch("not an Owner".to_string()))?;
        Ok(owner.0.into())
    }
}

fn string_target_method() -> TargetMethod {
    TargetMethod {
        return_type: Argument::of_type(ArgumentType::String),
        annotation_metadata: AnnotationMetadata::empty().with(Annotation::new("Executable")),
    }
}

#[test]
fn builder_target_method_with_custom_dispatch_test() {
    let method = ExecutableMethod::builder::<Owner>("name")
        .target_method(string_target_method())
        .dispatch_with(Arc::new(OwnerName));
    assert_eq!(method.return_type().argument_type(), ArgumentType::String);
    assert!(method.return_type().annotation_metadata().has_annotation("Executable"));
    assert_eq!(method.to_string(), "String name()");
    assert_eq!(method.invoke(&Owner("jenya"), &[]).unwrap(), AutumnValue::from("jenya"));
}

#[test]
fn dispatch_target_method_wins_over_builder_test() {
    let method = ExecutableMethod::builder::<CountService>("add")
        .argument(Argument::primitive(PrimitiveType::Int, "amount"))
        .target_method(string_target_method())
        .dispatch_with(new_dispatch());
    assert_eq!(method.return_type().argument_type(), ArgumentType::Primitive(PrimitiveType::Long));

    let dispatch = FnDispatch::new("name", |owner: &Owner, _: &[AutumnValue]| Ok(owner.0.into()))
        .with_target_method(TargetMethod {
            return_type: Argument::of_type(ArgumentType::Object),
            annotation_metadata: AnnotationMetadata::empty(),
        });
    let method = ExecutableMethod::builder::<Owner>("name")
        .target_method(string_target_method())
        .dispatch_with(Arc::new(dispatch));
    assert_eq!(method.return_type().argument_type(), ArgumentType::Object);
    assert!(!method.return_type().annotation_metadata().has_annotation("Executable"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_invoke_test() {
    let service = Arc::new(CountService::new());
    let dispatch = new_dispatch();
    let registry = Arc::new(
        ExecutableMethodRegistry::builder()
            .with(count_service_add(dispatch.clone())).unwrap()
            .build()
    );
    let argument_types = [ArgumentType::Primitive(PrimitiveType::Int)];
    let tasks = (0..16)
        .map(|task| {
            let service = service.clone();
            let registry = registry.clone();
            tokio::spawn(async move {
                let method = registry.find_method_of::<CountService>("add", &argument_types).unwrap();
                for _ in 0..100 {
                    method.invoke(&*service, &[AutumnValue::Int(1)]).unwrap();
                    assert!(method.invoke(&*service, &[AutumnValue::Int(task), AutumnValue::Int(task)]).is_err());
                }
            })
        })
        .collect::<Vec<_>>();
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(service.counter.load(Ordering::SeqCst), 1600);
    assert_eq!(dispatch.dispatched.load(Ordering::SeqCst), 1600);
}
