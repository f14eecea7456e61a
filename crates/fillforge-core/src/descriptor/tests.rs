use std::any::TypeId;
use std::sync::OnceLock;

use super::*;
use crate::fill::Fill;

#[derive(Clone, Debug, Default, PartialEq)]
struct Sample {
    id: u32,
    label: String,
}

impl Sample {
    fn with_label(label: String) -> Self {
        Sample { id: 0, label }
    }
}

impl Fill for Sample {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Sample>("Sample")
                .with_default(Sample::default)
                .with_property(PropertyDescriptor::of("id", |s: &mut Sample, v: u32| s.id = v))
                .with_property(PropertyDescriptor::of("label", |s: &mut Sample, v: String| {
                    s.label = v
                }))
                .with_constructor(ConstructorDescriptor::new(
                    vec![TypeRef::of::<String>()],
                    |mut args: ArgList| {
                        let label: String = args.take()?;
                        Ok(Box::new(Sample::with_label(label)) as Value)
                    },
                ))
        })
    }
}

#[test]
fn test_composite_descriptor_identity() {
    let descriptor = Sample::descriptor();
    assert_eq!(descriptor.type_id(), TypeId::of::<Sample>());
    assert_eq!(descriptor.type_name(), "Sample");
    assert!(descriptor.has_default());
}

#[test]
fn test_property_assignment() {
    let descriptor = Sample::descriptor();
    let TypeShape::Composite(shape) = descriptor.shape() else {
        panic!("expected a composite shape");
    };
    assert_eq!(shape.properties.len(), 2);

    let mut sample = Sample::default();
    let id = shape
        .properties
        .iter()
        .find(|p| p.name() == "id")
        .unwrap();
    assert_eq!(id.declared().type_id(), TypeId::of::<u32>());
    id.assign(&mut sample, Box::new(42u32)).unwrap();
    assert_eq!(sample.id, 42);
}

#[test]
fn test_property_assignment_type_mismatch() {
    let descriptor = Sample::descriptor();
    let TypeShape::Composite(shape) = descriptor.shape() else {
        panic!("expected a composite shape");
    };
    let mut sample = Sample::default();
    let outcome = shape.properties[0].assign(&mut sample, Box::new("wrong".to_string()));
    assert!(matches!(outcome, Err(crate::error::FillError::Internal(_))));
}

#[test]
fn test_constructor_invocation() {
    let descriptor = Sample::descriptor();
    let TypeShape::Composite(shape) = descriptor.shape() else {
        panic!("expected a composite shape");
    };
    let constructor = &shape.constructors[0];
    assert_eq!(constructor.arity(), 1);
    assert_eq!(constructor.params()[0].type_id(), TypeId::of::<String>());

    let value = constructor
        .invoke(vec![Box::new("report".to_string())])
        .unwrap();
    let sample = value.downcast::<Sample>().unwrap();
    assert_eq!(sample.label, "report");
}

#[test]
fn test_constructor_rejects_wrong_arity() {
    let descriptor = Sample::descriptor();
    let TypeShape::Composite(shape) = descriptor.shape() else {
        panic!("expected a composite shape");
    };
    let outcome = shape.constructors[0].invoke(Vec::new());
    assert!(outcome.is_err());
}

#[test]
fn test_replace_overwrites_instance() {
    let descriptor = Sample::descriptor();
    let TypeShape::Composite(shape) = descriptor.shape() else {
        panic!("expected a composite shape");
    };
    let mut sample = Sample::default();
    let replacement = Sample {
        id: 9,
        label: "fixed".to_string(),
    };
    (shape.replace)(&mut sample, Box::new(replacement.clone())).unwrap();
    assert_eq!(sample, replacement);
}

#[test]
fn test_type_ref_equality_is_by_type() {
    assert_eq!(TypeRef::of::<Sample>(), TypeRef::of::<Sample>());
    assert_ne!(TypeRef::of::<Sample>(), TypeRef::of::<u32>());
}
