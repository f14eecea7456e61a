//! Fillforge - fills object graphs with synthetic test data
//!
//! Derive [`Fill`] on your domain types and let a [`Filler`] build fully
//! populated instances: scalars come from registered value sources, nested
//! composites are constructed recursively, and collections are populated
//! with configurable counts. Circular type references are detected and
//! resolved per policy.
//!
//! # Example
//!
//! ```
//! use fillforge::prelude::*;
//!
//! #[derive(Fill, Clone, Debug, Default)]
//! struct Address {
//!     street: String,
//!     zip: u32,
//! }
//!
//! #[derive(Fill, Clone, Debug, Default)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     address: Address,
//!     nicknames: Vec<String>,
//! }
//!
//! let mut filler = Filler::<Person>::new().with_seed(42);
//! let person = filler.create().unwrap();
//! assert!(!person.name.is_empty());
//! assert!(!person.address.street.is_empty());
//! ```

// User-facing derive macro
pub use fillforge_macros::Fill;

// The trait behind the derive (same name, different namespace)
pub use fillforge_core::Fill;

// Trait-object registration
pub use fillforge_core::polymorphic;

// Setup and randomness surface
pub use fillforge_core::{
    CircularReferencePolicy, EntropyRandom, FillError, Mocker, PropertyPosition, RandomSource,
    Result, SeededRandom, Setup, SetupRegistry, StaticMocker, ValueSource,
};

// File-based configuration
pub use fillforge_config::{ConfigError, CountRange, CyclePolicy, FillConfig};

mod filler;
pub use filler::Filler;

/// Internal types for macro-generated code. Do not use directly.
#[doc(hidden)]
pub mod __internal {
    pub use fillforge_core::{
        ArgList, ConstructorDescriptor, EnumVariant, Fill, PropertyDescriptor, TypeDescriptor,
        TypeRef, Value,
    };
}

pub mod prelude {
    pub use super::{polymorphic, Fill, Filler, Setup};
    pub use super::{CircularReferencePolicy, PropertyPosition, SeededRandom, StaticMocker};
}
