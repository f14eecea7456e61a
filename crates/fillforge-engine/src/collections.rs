//! Sequence and map builders.

use tracing::{debug, trace};

use fillforge_core::{
    CircularReferencePolicy, FillError, MapOps, Result, SequenceOps, Setup, TypeDescriptor,
    TypeShape, Value,
};

use crate::classify::unwrap_terminal;
use crate::context::FillContext;
use crate::fill::create_and_fill;

/// Builds a sequence: a cycle on the element type resolves per policy
/// (empty collection under substitute, error under fail); otherwise the
/// element count is drawn from the setup's range and elements are produced
/// through the full create-and-fill path in insertion order.
pub(crate) fn fill_sequence(
    descriptor: &'static TypeDescriptor,
    ops: &SequenceOps,
    setup: &Setup,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    let element = ops.element.descriptor();
    let mut sequence = (ops.new_instance)();

    let terminal = unwrap_terminal(element);
    if matches!(terminal.shape(), TypeShape::Composite(_)) && ctx.on_path(terminal.type_id()) {
        return match setup.circular_reference_policy() {
            CircularReferencePolicy::Fail => {
                Err(FillError::CircularReference(terminal.type_name()))
            }
            CircularReferencePolicy::SubstituteDefault => {
                debug!(
                    sequence = descriptor.type_name(),
                    element = terminal.type_name(),
                    "cycle on element type, leaving sequence empty"
                );
                Ok(sequence)
            }
        };
    }

    let count = ctx.random().from_range(setup.sequence_count_range());
    trace!(sequence = descriptor.type_name(), count, "populating sequence");
    for _ in 0..count {
        let value = create_and_fill(element, ctx)?;
        (ops.push)(sequence.as_mut(), value)?;
    }
    Ok(sequence)
}

/// Builds a map. Enumeration keys are sampled without replacement, with
/// the requested count clamped to the number of declared values, so
/// uniqueness holds by construction. Other key types are generated
/// up-front through the full create-and-fill path; a key already present
/// at insertion fails with `DuplicateKey` and is not retried.
pub(crate) fn fill_map(
    descriptor: &'static TypeDescriptor,
    ops: &MapOps,
    setup: &Setup,
    ctx: &mut FillContext<'_>,
) -> Result<Value> {
    let key_descriptor = ops.key.descriptor();
    let value_descriptor = ops.value.descriptor();
    let mut map = (ops.new_instance)();

    if let TypeShape::Enumeration(variants) = key_descriptor.shape() {
        let bound = variants.len();
        let requested = setup.map_key_count_range();
        let count = ctx
            .random()
            .from_range(requested.start.min(bound)..requested.end.min(bound));
        trace!(
            map = descriptor.type_name(),
            key = key_descriptor.type_name(),
            count,
            "sampling enumeration keys without replacement"
        );
        let mut pool: Vec<usize> = (0..variants.len()).collect();
        for _ in 0..count {
            let slot = ctx.random().pick(pool.len());
            let variant = &variants[pool.swap_remove(slot)];
            let value = create_and_fill(value_descriptor, ctx)?;
            (ops.insert)(map.as_mut(), variant.instantiate(), value)?;
        }
        return Ok(map);
    }

    let count = ctx.random().from_range(setup.map_key_count_range());
    trace!(map = descriptor.type_name(), count, "generating map keys");
    let mut keys = Vec::with_capacity(count);
    for _ in 0..count {
        keys.push(create_and_fill(key_descriptor, ctx)?);
    }
    for key in keys {
        if (ops.contains_key)(map.as_ref(), key.as_ref())? {
            return Err(FillError::DuplicateKey(key_descriptor.type_name()));
        }
        let value = create_and_fill(value_descriptor, ctx)?;
        (ops.insert)(map.as_mut(), key, value)?;
    }
    Ok(map)
}
