//! Instance construction for composite types.

use tracing::trace;

use fillforge_core::{CompositeShape, ConstructorDescriptor, FillError, Result, Setup, TypeDescriptor, Value};

use crate::classify::valid_for_filling;
use crate::context::FillContext;
use crate::fill::create_and_fill;

/// Produces a bare instance of a composite type.
///
/// A default factory is the zero-argument constructor and is preferred
/// unconditionally; property values are assigned afterward by the graph
/// filler. Otherwise parameterized constructors are considered in
/// ascending arity order and the first whose every parameter is fillable
/// wins, its arguments produced through the full create-and-fill path.
pub(crate) fn construct(
    descriptor: &'static TypeDescriptor,
    shape: &CompositeShape,
    setup: &Setup,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    if let Some(instance) = descriptor.default_value() {
        return Ok(instance);
    }

    let mut candidates: Vec<&ConstructorDescriptor> = shape.constructors.iter().collect();
    candidates.sort_by_key(|constructor| constructor.arity());

    for constructor in candidates {
        let usable = constructor
            .params()
            .iter()
            .all(|param| valid_for_filling(param.descriptor(), setup));
        if !usable {
            continue;
        }
        trace!(
            type_name = descriptor.type_name(),
            arity = constructor.arity(),
            "selected constructor"
        );
        let mut arguments = Vec::with_capacity(constructor.arity());
        for param in constructor.params() {
            arguments.push(create_and_fill(param.descriptor(), ctx)?);
        }
        return constructor.invoke(arguments);
    }

    Err(FillError::NoUsableConstructor(descriptor.type_name()))
}
