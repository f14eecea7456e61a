//! Circular-reference handling, depth limits, and in-place refills.

use fillforge::prelude::*;
use fillforge::FillError;

#[derive(Fill, Clone, Debug, Default, PartialEq)]
struct Node {
    label: u32,
    next: Option<Box<Node>>,
}

#[derive(Fill, Clone, Debug, Default, PartialEq)]
struct Ring {
    label: u32,
    inner: Vec<Ring>,
}

#[test]
fn test_self_reference_fails_under_fail_policy() {
    let mut filler = Filler::<Node>::new()
        .setup(Setup::new().with_circular_reference_policy(CircularReferencePolicy::Fail))
        .with_seed(6);
    let outcome = filler.create();
    assert!(matches!(outcome, Err(FillError::CircularReference("Node"))));
}

#[test]
fn test_self_reference_substitutes_default() {
    let mut filler = Filler::<Node>::new().with_seed(6);
    let node = filler.create().unwrap();
    assert!(node.next.is_none());
}

#[test]
fn test_sequence_element_cycle_yields_empty_sequence() {
    let mut filler = Filler::<Ring>::new().with_seed(6);
    let ring = filler.create().unwrap();
    assert!(ring.inner.is_empty());
}

#[test]
fn test_depth_limit_guards_deep_recursion() {
    let mut filler = Filler::<Node>::new()
        .setup(Setup::new().with_max_depth(1))
        .with_seed(6);
    let outcome = filler.create();
    assert!(matches!(
        outcome,
        Err(FillError::DepthLimitExceeded { limit: 1, .. })
    ));
}

#[test]
fn test_refill_is_idempotent_with_deterministic_sources() {
    let mut filler = Filler::<Node>::new()
        .setup(Setup::new().with_generator(|| 11u32))
        .with_seed(6);

    let mut node = Node::default();
    filler.fill(&mut node).unwrap();
    let first = node.clone();
    filler.fill(&mut node).unwrap();

    assert_eq!(node, first);
    assert_eq!(node.label, 11);
}

#[test]
fn test_fill_replaces_cyclic_property_with_default() {
    let mut filler = Filler::<Node>::new().with_seed(6);
    let mut node = Node {
        label: 3,
        next: Some(Box::new(Node::default())),
    };
    filler.fill(&mut node).unwrap();
    assert!(node.next.is_none());
}

#[test]
fn test_type_level_source_replaces_filled_instance() {
    let fixed = Node {
        label: 99,
        next: None,
    };
    let produced = fixed.clone();
    let mut filler = Filler::<Node>::new()
        .setup(Setup::new().with_generator(move || produced.clone()))
        .with_seed(6);

    let mut node = Node::default();
    filler.fill(&mut node).unwrap();
    assert_eq!(node, fixed);
}
