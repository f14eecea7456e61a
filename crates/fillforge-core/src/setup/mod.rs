//! Setup model: the per-root-type configuration read by the engine.
//!
//! A [`Setup`] is built once through its consuming `with_*` methods and is
//! treated as immutable for the duration of a fill call. The
//! [`SetupRegistry`] holds the main setup plus per-type overrides; the
//! engine resolves the effective setup for each visited type through
//! [`SetupRegistry::for_type`].

mod sources;

#[cfg(test)]
mod tests;

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Range;
use std::sync::Mutex;

use indexmap::IndexMap;

use crate::descriptor::{TypeDescriptor, TypeRef, Value};
use crate::error::{FillError, Result};
use crate::fill::Fill;

/// How a detected circular reference is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CircularReferencePolicy {
    /// Raise [`FillError::CircularReference`].
    Fail,
    /// Resolve the cyclic value to the declared type's default.
    #[default]
    SubstituteDefault,
}

/// Placement of a property in the fill order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyPosition {
    /// Fill before all unmarked properties.
    First,
    /// Fill after all unmarked properties.
    Last,
}

/// Identity of a property: its declaring type plus its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    type_id: TypeId,
    property: &'static str,
}

impl PropertyKey {
    /// Creates a key for a property of `T`.
    pub fn of<T: Any>(property: &'static str) -> Self {
        PropertyKey {
            type_id: TypeId::of::<T>(),
            property,
        }
    }

    /// Creates a key from an already-known type identity.
    pub fn from_parts(type_id: TypeId, property: &'static str) -> Self {
        PropertyKey { type_id, property }
    }

    /// The declaring type.
    pub fn declaring_type(&self) -> TypeId {
        self.type_id
    }

    /// The property name.
    pub fn property(&self) -> &'static str {
        self.property
    }
}

/// A zero-argument value producer.
///
/// Closure-backed sources never run dry; iterator-backed sources produce
/// their values in order and then fail with
/// [`FillError::ExhaustedValueSource`].
pub struct ValueSource {
    produce: Box<dyn Fn() -> Result<Value> + Send + Sync>,
}

impl ValueSource {
    /// Creates a source backed by a closure.
    pub fn new<T, F>(produce: F) -> Self
    where
        T: Any,
        F: Fn() -> T + Send + Sync + 'static,
    {
        ValueSource {
            produce: Box::new(move || Ok(Box::new(produce()) as Value)),
        }
    }

    /// Creates a source that yields the given values in order.
    pub fn from_values<T, I>(values: I) -> Self
    where
        T: Any,
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        let remaining = Mutex::new(values.into_iter());
        ValueSource {
            produce: Box::new(move || {
                let mut remaining = remaining
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                remaining
                    .next()
                    .map(|value| Box::new(value) as Value)
                    .ok_or(FillError::ExhaustedValueSource(std::any::type_name::<T>()))
            }),
        }
    }

    /// Produces the next value.
    pub fn produce(&self) -> Result<Value> {
        (self.produce)()
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueSource")
    }
}

/// Fallback capability producing instances of polymorphic types that have
/// no explicit implementation binding.
pub trait Mocker: Send + Sync {
    /// Produces an instance of the polymorphic `target` type, or `None` if
    /// this mocker does not support it.
    fn create(&self, target: &TypeDescriptor) -> Option<Value>;
}

/// Table-backed [`Mocker`] with one registered factory per polymorphic type.
#[derive(Default)]
pub struct StaticMocker {
    factories: HashMap<TypeId, Box<dyn Fn() -> Value + Send + Sync>>,
}

impl StaticMocker {
    /// Creates an empty mocker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for the polymorphic type `T`.
    pub fn with_factory<T, F>(mut self, factory: F) -> Self
    where
        T: Fill,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.factories
            .insert(TypeId::of::<T>(), Box::new(move || Box::new(factory()) as Value));
        self
    }
}

impl Mocker for StaticMocker {
    fn create(&self, target: &TypeDescriptor) -> Option<Value> {
        self.factories.get(&target.type_id()).map(|factory| factory())
    }
}

/// Binds a polymorphic type to the concrete composite instantiated in its
/// place.
pub struct ImplementationBinding {
    concrete: TypeRef,
    convert: Box<dyn Fn(Value) -> Result<Value> + Send + Sync>,
}

impl ImplementationBinding {
    fn new<P, C, F>(convert: F) -> Self
    where
        P: Fill,
        C: Fill,
        F: Fn(C) -> P + Send + Sync + 'static,
    {
        ImplementationBinding {
            concrete: TypeRef::of::<C>(),
            convert: Box::new(move |value| {
                let concrete = crate::descriptor::downcast_value::<C>(value)?;
                Ok(Box::new(convert(concrete)) as Value)
            }),
        }
    }

    /// The concrete type constructed and filled in place of the
    /// polymorphic one.
    pub fn concrete(&self) -> TypeRef {
        self.concrete
    }

    /// Converts a filled concrete value into the polymorphic value.
    pub fn convert(&self, value: Value) -> Result<Value> {
        (self.convert)(value)
    }
}

impl fmt::Debug for ImplementationBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationBinding")
            .field("concrete", &self.concrete)
            .finish()
    }
}

/// Resolved configuration for one fill, read-only during the call.
///
/// `Setup::new()` pre-registers random value sources for the primitive
/// scalars, so a fresh setup can fill any graph of plain data types.
pub struct Setup {
    generators: HashMap<TypeId, ValueSource>,
    property_generators: HashMap<PropertyKey, ValueSource>,
    ignored_types: HashSet<TypeId>,
    ignored_properties: HashSet<PropertyKey>,
    property_order: IndexMap<PropertyKey, PropertyPosition>,
    sequence_count_range: Range<usize>,
    map_key_count_range: Range<usize>,
    implementations: HashMap<TypeId, ImplementationBinding>,
    mocker: Option<Box<dyn Mocker>>,
    circular_reference_policy: CircularReferencePolicy,
    ignore_unknown_types: bool,
    max_depth: usize,
}

impl Setup {
    /// Creates a setup with default value sources and count bounds.
    pub fn new() -> Self {
        let mut generators = HashMap::new();
        sources::register_defaults(&mut generators);
        Setup {
            generators,
            property_generators: HashMap::new(),
            ignored_types: HashSet::new(),
            ignored_properties: HashSet::new(),
            property_order: IndexMap::new(),
            sequence_count_range: 1..25,
            map_key_count_range: 1..10,
            implementations: HashMap::new(),
            mocker: None,
            circular_reference_policy: CircularReferencePolicy::default(),
            ignore_unknown_types: false,
            max_depth: 256,
        }
    }

    /// Registers a value source for the exact type `T`.
    pub fn with_generator<T, F>(self, produce: F) -> Self
    where
        T: Any,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.with_source::<T>(ValueSource::new(produce))
    }

    /// Registers a finite value source for `T`, yielding the given values
    /// in order.
    pub fn with_values<T, I>(self, values: I) -> Self
    where
        T: Any,
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        self.with_source::<T>(ValueSource::from_values(values))
    }

    /// Registers an already-built value source for `T`.
    pub fn with_source<T: Any>(mut self, source: ValueSource) -> Self {
        self.generators.insert(TypeId::of::<T>(), source);
        self
    }

    /// Registers a value source for one property of `O`; takes precedence
    /// over `O`'s type-level sources for that property.
    pub fn with_property_generator<O, T, F>(mut self, property: &'static str, produce: F) -> Self
    where
        O: Any,
        T: Any,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.property_generators
            .insert(PropertyKey::of::<O>(property), ValueSource::new(produce));
        self
    }

    /// Registers a finite value source for one property of `O`.
    pub fn with_property_values<O, T, I>(mut self, property: &'static str, values: I) -> Self
    where
        O: Any,
        T: Any,
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        self.property_generators
            .insert(PropertyKey::of::<O>(property), ValueSource::from_values(values));
        self
    }

    /// Excludes every property whose declared type is `T` from filling.
    pub fn with_ignored_type<T: Any>(mut self) -> Self {
        self.ignored_types.insert(TypeId::of::<T>());
        self
    }

    /// Excludes one property of `O` from filling.
    pub fn with_ignored_property<O: Any>(mut self, property: &'static str) -> Self {
        self.ignored_properties.insert(PropertyKey::of::<O>(property));
        self
    }

    /// Places one property of `O` in the first or last fill group.
    /// Properties registered for the same group fill in registration order.
    pub fn with_property_order<O: Any>(
        mut self,
        property: &'static str,
        position: PropertyPosition,
    ) -> Self {
        self.property_order
            .insert(PropertyKey::of::<O>(property), position);
        self
    }

    /// Sets the `[min, max)` bounds for sequence population.
    pub fn with_sequence_count_range(mut self, range: Range<usize>) -> Self {
        self.sequence_count_range = range;
        self
    }

    /// Fixes the element count for sequence population.
    pub fn with_sequence_count(self, count: usize) -> Self {
        self.with_sequence_count_range(count..count + 1)
    }

    /// Sets the `[min, max)` bounds for map key generation.
    pub fn with_map_key_count_range(mut self, range: Range<usize>) -> Self {
        self.map_key_count_range = range;
        self
    }

    /// Fixes the key count for map generation.
    pub fn with_map_key_count(self, count: usize) -> Self {
        self.with_map_key_count_range(count..count + 1)
    }

    /// Binds the polymorphic type `P` to the concrete composite `C`;
    /// `convert` lifts a filled `C` into a `P` value.
    pub fn with_implementation<P, C, F>(mut self, convert: F) -> Self
    where
        P: Fill,
        C: Fill,
        F: Fn(C) -> P + Send + Sync + 'static,
    {
        self.implementations
            .insert(TypeId::of::<P>(), ImplementationBinding::new::<P, C, F>(convert));
        self
    }

    /// Installs the fallback mocker for unbound polymorphic types.
    pub fn with_mocker(mut self, mocker: impl Mocker + 'static) -> Self {
        self.mocker = Some(Box::new(mocker));
        self
    }

    /// Sets the circular-reference policy.
    pub fn with_circular_reference_policy(mut self, policy: CircularReferencePolicy) -> Self {
        self.circular_reference_policy = policy;
        self
    }

    /// Resolves unregistered, unclassifiable types to their default value
    /// instead of failing.
    pub fn with_ignore_unknown_types(mut self, ignore: bool) -> Self {
        self.ignore_unknown_types = ignore;
        self
    }

    /// Sets the construction depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The value source registered for a type, if any.
    pub fn generator(&self, type_id: TypeId) -> Option<&ValueSource> {
        self.generators.get(&type_id)
    }

    /// Returns whether a value source is registered for the type.
    pub fn has_generator(&self, type_id: TypeId) -> bool {
        self.generators.contains_key(&type_id)
    }

    /// The value source registered for a property, if any.
    pub fn property_generator(&self, key: PropertyKey) -> Option<&ValueSource> {
        self.property_generators.get(&key)
    }

    /// Returns whether the type is excluded from filling.
    pub fn is_type_ignored(&self, type_id: TypeId) -> bool {
        self.ignored_types.contains(&type_id)
    }

    /// Returns whether the property is excluded from filling.
    pub fn is_property_ignored(&self, key: PropertyKey) -> bool {
        self.ignored_properties.contains(&key)
    }

    /// Iterates the registered property placements in registration order.
    pub fn property_order(&self) -> impl Iterator<Item = (PropertyKey, PropertyPosition)> + '_ {
        self.property_order.iter().map(|(key, position)| (*key, *position))
    }

    /// Returns whether the property has a registered placement.
    pub fn has_property_order(&self, key: PropertyKey) -> bool {
        self.property_order.contains_key(&key)
    }

    /// The `[min, max)` bounds for sequence population.
    pub fn sequence_count_range(&self) -> Range<usize> {
        self.sequence_count_range.clone()
    }

    /// The `[min, max)` bounds for map key generation.
    pub fn map_key_count_range(&self) -> Range<usize> {
        self.map_key_count_range.clone()
    }

    /// The implementation binding for a polymorphic type, if any.
    pub fn implementation(&self, type_id: TypeId) -> Option<&ImplementationBinding> {
        self.implementations.get(&type_id)
    }

    /// The fallback mocker, if installed.
    pub fn mocker(&self) -> Option<&dyn Mocker> {
        self.mocker.as_deref()
    }

    /// The circular-reference policy.
    pub fn circular_reference_policy(&self) -> CircularReferencePolicy {
        self.circular_reference_policy
    }

    /// Returns whether unknown types resolve to defaults.
    pub fn ignore_unknown_types(&self) -> bool {
        self.ignore_unknown_types
    }

    /// The construction depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("generators", &self.generators.len())
            .field("property_generators", &self.property_generators.len())
            .field("ignored_types", &self.ignored_types.len())
            .field("ignored_properties", &self.ignored_properties.len())
            .field("sequence_count_range", &self.sequence_count_range)
            .field("map_key_count_range", &self.map_key_count_range)
            .field("implementations", &self.implementations.len())
            .field("has_mocker", &self.mocker.is_some())
            .field("circular_reference_policy", &self.circular_reference_policy)
            .field("ignore_unknown_types", &self.ignore_unknown_types)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Holds the main setup plus per-type overrides.
#[derive(Debug, Default)]
pub struct SetupRegistry {
    main: Setup,
    overrides: HashMap<TypeId, Setup>,
}

impl SetupRegistry {
    /// Creates a registry with the given main setup.
    pub fn new(main: Setup) -> Self {
        SetupRegistry {
            main,
            overrides: HashMap::new(),
        }
    }

    /// Replaces the main setup.
    pub fn set_main(&mut self, main: Setup) {
        self.main = main;
    }

    /// Registers a setup override for the type `T`.
    pub fn register<T: Any>(&mut self, setup: Setup) {
        self.overrides.insert(TypeId::of::<T>(), setup);
    }

    /// The main setup.
    pub fn main(&self) -> &Setup {
        &self.main
    }

    /// The effective setup for a type: its override if registered, else
    /// the main setup.
    pub fn for_type(&self, type_id: TypeId) -> &Setup {
        self.overrides.get(&type_id).unwrap_or(&self.main)
    }
}
