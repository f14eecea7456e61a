//! Graph-filling orchestration.

use std::any::Any;

use tracing::{debug, trace};

use fillforge_core::{
    CircularReferencePolicy, CompositeShape, EnumVariant, FillError, PropertyDescriptor,
    PropertyKey, PropertyPosition, RandomSource, Result, Setup, SetupRegistry, TypeDescriptor,
    TypeShape, Value, WrapperOps,
};

use crate::classify::{classify, unwrap_terminal, Category};
use crate::collections::{fill_map, fill_sequence};
use crate::construct::construct;
use crate::context::FillContext;

/// Creates and fully fills a value of the given type. A fresh
/// construction-path tracker is used for the call.
pub fn create_value(
    descriptor: &'static TypeDescriptor,
    registry: &SetupRegistry,
    random: &mut dyn RandomSource,
) -> Result<Value> {
    let mut ctx = FillContext::new(registry, random);
    create_and_fill(descriptor, &mut ctx)
}

/// Fills an existing composite instance's properties in place.
///
/// The root type is pushed on the tracker for the duration, so
/// self-referential properties resolve exactly as they do in
/// [`create_value`].
pub fn fill_in_place(
    instance: &mut dyn Any,
    descriptor: &'static TypeDescriptor,
    registry: &SetupRegistry,
    random: &mut dyn RandomSource,
) -> Result<()> {
    let TypeShape::Composite(shape) = descriptor.shape() else {
        return Err(FillError::internal(format!(
            "fill target `{}` is not a composite type",
            descriptor.type_name()
        )));
    };
    let mut ctx = FillContext::new(registry, random);
    ctx.tracker().push(descriptor.type_id());
    let outcome = fill_properties(instance, descriptor, shape, &mut ctx);
    ctx.tracker().pop();
    outcome
}

/// The recursive entry point: classifies the type and dispatches on the
/// result, guarding recursion depth on the way down.
pub(crate) fn create_and_fill(
    descriptor: &'static TypeDescriptor,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    ctx.descend(descriptor)?;
    let outcome = dispatch(descriptor, ctx);
    ctx.ascend();
    outcome
}

fn dispatch(descriptor: &'static TypeDescriptor, ctx: &mut FillContext<'_>) -> Result<Value> {
    let registry = ctx.registry();
    let setup = registry.for_type(descriptor.type_id());
    let category = classify(descriptor, setup);
    trace!(type_name = descriptor.type_name(), ?category, "classified");

    match category {
        // A Generated verdict can come from a wrapper's inner type; only
        // produce here when the source is registered for the exact type,
        // otherwise the wrapper arm below recurses to the inner one.
        Category::Generated if setup.has_generator(descriptor.type_id()) => setup
            .generator(descriptor.type_id())
            .ok_or_else(|| {
                FillError::internal(format!(
                    "classifier reported a source for `{}` that is not registered",
                    descriptor.type_name()
                ))
            })?
            .produce(),
        Category::Unclassified => resolve_unclassified(descriptor, setup),
        _ => match descriptor.shape() {
            TypeShape::Wrapper(ops) => fill_wrapped(descriptor, ops, setup, ctx),
            TypeShape::Sequence(ops) => fill_sequence(descriptor, ops, setup, ctx),
            TypeShape::Map(ops) => fill_map(descriptor, ops, setup, ctx),
            TypeShape::Polymorphic => resolve_polymorphic(descriptor, setup, ctx),
            TypeShape::Enumeration(variants) => pick_variant(descriptor, variants, ctx),
            TypeShape::Composite(shape) => fill_composite(descriptor, shape, setup, ctx),
            TypeShape::Scalar => resolve_unclassified(descriptor, setup),
        },
    }
}

/// Wrappers re-wrap their recursively produced inner value. The cycle
/// check happens here against the terminal inner composite, so that the
/// substitute policy can use the wrapper's own default (`None` for an
/// `Option` property) rather than the cyclic type's.
fn fill_wrapped(
    descriptor: &'static TypeDescriptor,
    ops: &WrapperOps,
    setup: &Setup,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    let inner = ops.inner.descriptor();
    let terminal = unwrap_terminal(inner);
    if matches!(terminal.shape(), TypeShape::Composite(_)) && ctx.on_path(terminal.type_id()) {
        return resolve_cycle(descriptor, terminal, setup);
    }
    let value = create_and_fill(inner, ctx)?;
    (ops.wrap)(value)
}

fn resolve_cycle(
    declared: &TypeDescriptor,
    cyclic: &TypeDescriptor,
    setup: &Setup,
) -> Result<Value> {
    match setup.circular_reference_policy() {
        CircularReferencePolicy::Fail => Err(FillError::CircularReference(cyclic.type_name())),
        CircularReferencePolicy::SubstituteDefault => {
            debug!(
                declared = declared.type_name(),
                cyclic = cyclic.type_name(),
                "substituting default for circular reference"
            );
            declared
                .default_value()
                .ok_or(FillError::CircularReference(cyclic.type_name()))
        }
    }
}

fn fill_composite(
    descriptor: &'static TypeDescriptor,
    shape: &CompositeShape,
    setup: &Setup,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    if ctx.on_path(descriptor.type_id()) {
        return resolve_cycle(descriptor, descriptor, setup);
    }
    ctx.tracker().push(descriptor.type_id());
    let outcome = construct_and_fill(descriptor, shape, setup, ctx);
    ctx.tracker().pop();
    outcome
}

fn construct_and_fill(
    descriptor: &'static TypeDescriptor,
    shape: &CompositeShape,
    setup: &Setup,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    let mut instance = construct(descriptor, shape, setup, ctx)?;
    fill_properties(instance.as_mut(), descriptor, shape, ctx)?;
    Ok(instance)
}

/// Assigns every non-ignored settable property of a constructed composite.
///
/// A type-level source registered for the instance's own type
/// short-circuits the whole pass: its output replaces the instance
/// outright. Properties fill in three groups: those marked first (in
/// registration order), unmarked ones (in declaration order), then those
/// marked last.
pub(crate) fn fill_properties(
    instance: &mut dyn Any,
    descriptor: &'static TypeDescriptor,
    shape: &CompositeShape,
    ctx: &mut FillContext<'_>,
) -> Result<()> {
    let registry = ctx.registry();
    let setup = registry.for_type(descriptor.type_id());

    if let Some(source) = setup.generator(descriptor.type_id()) {
        trace!(
            type_name = descriptor.type_name(),
            "type-level source replaces the instance"
        );
        return (shape.replace)(instance, source.produce()?);
    }

    for property in ordered_properties(descriptor, shape, setup) {
        let declared = property.declared();
        if setup.is_type_ignored(declared.type_id()) {
            trace!(
                type_name = descriptor.type_name(),
                property = property.name(),
                "skipping property of ignored type"
            );
            continue;
        }
        let key = PropertyKey::from_parts(descriptor.type_id(), property.name());
        if setup.is_property_ignored(key) {
            trace!(
                type_name = descriptor.type_name(),
                property = property.name(),
                "skipping ignored property"
            );
            continue;
        }
        if let Some(source) = setup.property_generator(key) {
            property.assign(instance, source.produce()?)?;
            continue;
        }
        let value = create_and_fill(declared.descriptor(), ctx)?;
        property.assign(instance, value)?;
    }
    Ok(())
}

fn ordered_properties<'s>(
    descriptor: &TypeDescriptor,
    shape: &'s CompositeShape,
    setup: &Setup,
) -> Vec<&'s PropertyDescriptor> {
    let mut first = Vec::new();
    let mut last = Vec::new();
    for (key, position) in setup.property_order() {
        if key.declaring_type() != descriptor.type_id() {
            continue;
        }
        let Some(property) = shape
            .properties
            .iter()
            .find(|property| property.name() == key.property())
        else {
            continue;
        };
        match position {
            PropertyPosition::First => first.push(property),
            PropertyPosition::Last => last.push(property),
        }
    }
    let unmarked = shape.properties.iter().filter(|property| {
        !setup.has_property_order(PropertyKey::from_parts(descriptor.type_id(), property.name()))
    });
    first.into_iter().chain(unmarked).chain(last).collect()
}

/// Resolution priority for polymorphic types: a type-level source (already
/// covered by the Generated category), then a registered implementation
/// constructed and filled exactly as a composite, then the mocker.
fn resolve_polymorphic(
    descriptor: &'static TypeDescriptor,
    setup: &Setup,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    if let Some(binding) = setup.implementation(descriptor.type_id()) {
        trace!(
            type_name = descriptor.type_name(),
            concrete = binding.concrete().type_name(),
            "resolving polymorphic type through its binding"
        );
        let concrete = create_and_fill(binding.concrete().descriptor(), ctx)?;
        return binding.convert(concrete);
    }
    if let Some(mocker) = setup.mocker() {
        if let Some(value) = mocker.create(descriptor) {
            trace!(type_name = descriptor.type_name(), "resolved through the mocker");
            return Ok(value);
        }
    }
    Err(FillError::UnresolvedPolymorphicType(descriptor.type_name()))
}

fn pick_variant(
    descriptor: &TypeDescriptor,
    variants: &[EnumVariant],
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    if variants.is_empty() {
        return Err(FillError::internal(format!(
            "enumeration `{}` declares no variants",
            descriptor.type_name()
        )));
    }
    let index = ctx.random().pick(variants.len());
    Ok(variants[index].instantiate())
}

fn resolve_unclassified(descriptor: &TypeDescriptor, setup: &Setup) -> Result<Value> {
    if setup.ignore_unknown_types() {
        if let Some(value) = descriptor.default_value() {
            debug!(
                type_name = descriptor.type_name(),
                "unregistered type resolved to its default value"
            );
            return Ok(value);
        }
    }
    Err(FillError::UnregisteredType(descriptor.type_name()))
}
