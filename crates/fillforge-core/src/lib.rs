//! Fillforge Core - descriptors and configuration model for graph filling
//!
//! This crate provides the fundamental abstractions for fillforge:
//! - Type descriptors carrying runtime metadata over `dyn Any` values
//! - The `Fill` trait wiring a type to its descriptor
//! - The setup model read by the filling engine
//! - The construction-path tracker used for cycle detection
//! - The randomness abstraction used for count and value sampling

pub mod descriptor;
pub mod error;
pub mod fill;
pub mod random;
pub mod setup;
pub mod tracker;

pub use descriptor::{
    ArgList, CompositeShape, ConstructorDescriptor, EnumVariant, MapOps, PropertyDescriptor,
    SequenceOps, TypeDescriptor, TypeRef, TypeShape, Value, WrapperOps,
};
pub use error::{FillError, Result};
pub use fill::Fill;
pub use random::{EntropyRandom, RandomSource, SeededRandom};
pub use setup::{
    CircularReferencePolicy, ImplementationBinding, Mocker, PropertyKey, PropertyPosition, Setup,
    SetupRegistry, StaticMocker, ValueSource,
};
pub use tracker::ConstructionPathTracker;
