//! Self-referential fixtures for cycle tests.

use std::sync::OnceLock;

use fillforge_core::{Fill, PropertyDescriptor, TypeDescriptor};

/// Singly-linked node whose tail refers back to its own type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub label: u32,
    pub next: Option<Box<Node>>,
}

impl Fill for Node {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Node>("Node")
                .with_default(Node::default)
                .with_property(PropertyDescriptor::of("label", |n: &mut Node, v: u32| {
                    n.label = v
                }))
                .with_property(PropertyDescriptor::of(
                    "next",
                    |n: &mut Node, v: Option<Box<Node>>| n.next = v,
                ))
        })
    }
}

/// Self-referential through a sequence; exercises element-type cycles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ring {
    pub label: u32,
    pub inner: Vec<Ring>,
}

impl Fill for Ring {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Ring>("Ring")
                .with_default(Ring::default)
                .with_property(PropertyDescriptor::of("label", |r: &mut Ring, v: u32| {
                    r.label = v
                }))
                .with_property(PropertyDescriptor::of(
                    "inner",
                    |r: &mut Ring, v: Vec<Ring>| r.inner = v,
                ))
        })
    }
}
