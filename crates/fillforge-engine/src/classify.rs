//! Type classification.
//!
//! Classification is a pure function of a type's descriptor and the
//! effective setup; the graph filler dispatches exclusively on its result.

use fillforge_core::{Setup, TypeDescriptor, TypeShape};

/// Classification outcome for a type under a given setup.
///
/// Evaluation order is first-match-wins: a registered value source beats
/// every structural fact, and collection shapes only classify as such when
/// their type parameters are themselves fillable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// A value source is registered for the exact type.
    Generated,
    /// Key-value map with fillable key and value types.
    Map,
    /// Sequence with a fillable element type.
    Sequence,
    /// Interface-like type requiring a concrete substitute.
    Polymorphic,
    /// Enumeration.
    Enumeration,
    /// Composite type with at least one settable property.
    Composite,
    /// Nothing applies; resolved by the unknown-type policy.
    Unclassified,
}

/// Classifies a type. Wrapper shapes are transparent: the inner type's
/// classification is returned unless a source is registered for the
/// wrapper itself.
pub fn classify(descriptor: &TypeDescriptor, setup: &Setup) -> Category {
    if setup.has_generator(descriptor.type_id()) {
        return Category::Generated;
    }
    match descriptor.shape() {
        TypeShape::Wrapper(ops) => classify(ops.inner.descriptor(), setup),
        TypeShape::Map(ops) => {
            if valid_for_filling(ops.key.descriptor(), setup)
                && valid_for_filling(ops.value.descriptor(), setup)
            {
                Category::Map
            } else {
                Category::Unclassified
            }
        }
        TypeShape::Sequence(ops) => {
            if valid_for_filling(ops.element.descriptor(), setup) {
                Category::Sequence
            } else {
                Category::Unclassified
            }
        }
        TypeShape::Polymorphic => Category::Polymorphic,
        TypeShape::Enumeration(_) => Category::Enumeration,
        TypeShape::Composite(shape) => {
            if shape.properties.is_empty() {
                Category::Unclassified
            } else {
                Category::Composite
            }
        }
        TypeShape::Scalar => Category::Unclassified,
    }
}

/// Returns whether a value of the type can be produced under the setup:
/// a source is registered, or the type is a fillable collection, a
/// composite with properties, an enumeration, or a polymorphic type with a
/// registered implementation or a mocker present.
pub fn valid_for_filling(descriptor: &TypeDescriptor, setup: &Setup) -> bool {
    if setup.has_generator(descriptor.type_id()) {
        return true;
    }
    match descriptor.shape() {
        TypeShape::Wrapper(ops) => valid_for_filling(ops.inner.descriptor(), setup),
        TypeShape::Sequence(ops) => valid_for_filling(ops.element.descriptor(), setup),
        TypeShape::Map(ops) => {
            valid_for_filling(ops.key.descriptor(), setup)
                && valid_for_filling(ops.value.descriptor(), setup)
        }
        TypeShape::Composite(shape) => !shape.properties.is_empty(),
        TypeShape::Enumeration(_) => true,
        TypeShape::Polymorphic => {
            setup.implementation(descriptor.type_id()).is_some() || setup.mocker().is_some()
        }
        TypeShape::Scalar => false,
    }
}

/// Follows wrapper indirection to the terminal descriptor.
pub(crate) fn unwrap_terminal(descriptor: &'static TypeDescriptor) -> &'static TypeDescriptor {
    match descriptor.shape() {
        TypeShape::Wrapper(ops) => unwrap_terminal(ops.inner.descriptor()),
        _ => descriptor,
    }
}
