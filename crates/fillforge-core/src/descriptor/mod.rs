//! Type descriptors: runtime metadata that drives graph filling.
//!
//! A [`TypeDescriptor`] records a type's identity plus the structural facts
//! the engine classifies on, expressed as a closed [`TypeShape`] variant.
//! Descriptors are built once per type (usually inside a `OnceLock` by the
//! derive macro or a hand-written [`Fill`](crate::fill::Fill) impl) and are
//! never mutated afterwards.

mod constructor;
mod interner;
mod property;

#[cfg(test)]
mod tests;

pub use constructor::{ArgList, ConstructorDescriptor};
pub use property::PropertyDescriptor;

pub(crate) use interner::intern;

use std::any::{Any, TypeId};
use std::fmt;

use crate::error::{FillError, Result};
use crate::fill::Fill;

/// A type-erased produced value, owned by the caller once a fill returns.
pub type Value = Box<dyn Any>;

/// Factory producing a fresh type-erased value.
pub type MakeValueFn = Box<dyn Fn() -> Value + Send + Sync>;
/// Writes a type-erased value into a type-erased target.
pub type SetValueFn = Box<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;
/// Re-wraps an inner value into its wrapper type.
pub type WrapValueFn = Box<dyn Fn(Value) -> Result<Value> + Send + Sync>;
/// Inserts a key/value pair into a type-erased map.
pub type InsertPairFn = Box<dyn Fn(&mut dyn Any, Value, Value) -> Result<()> + Send + Sync>;
/// Tests whether a type-erased map already contains a key.
pub type ContainsKeyFn = Box<dyn Fn(&dyn Any, &dyn Any) -> Result<bool> + Send + Sync>;

/// A cheap copyable handle to another type's descriptor.
///
/// The descriptor itself is resolved through a lazy `fn` pointer, which is
/// what permits descriptor graphs with cycles (a composite referring,
/// possibly indirectly, to itself).
#[derive(Clone, Copy)]
pub struct TypeRef {
    type_id: TypeId,
    type_name: &'static str,
    resolve: fn() -> &'static TypeDescriptor,
}

impl TypeRef {
    /// Creates a handle to `T`'s descriptor.
    pub fn of<T: Fill>() -> Self {
        TypeRef {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            resolve: T::descriptor,
        }
    }

    /// The referenced type's identity.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The referenced type's name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Resolves the referenced descriptor.
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.resolve)()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeRef {}

impl std::hash::Hash for TypeRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// One declared value of an enumeration.
pub struct EnumVariant {
    name: &'static str,
    make: MakeValueFn,
}

impl EnumVariant {
    /// Creates a variant entry from a factory for the variant value.
    pub fn new<T, F>(name: &'static str, make: F) -> Self
    where
        T: Any,
        F: Fn() -> T + Send + Sync + 'static,
    {
        EnumVariant {
            name,
            make: Box::new(move || Box::new(make()) as Value),
        }
    }

    /// Name of the variant.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Produces the variant value.
    pub fn instantiate(&self) -> Value {
        (self.make)()
    }
}

impl fmt::Debug for EnumVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumVariant").field("name", &self.name).finish()
    }
}

/// Operations and element metadata for a sequence type.
pub struct SequenceOps {
    /// Element type of the sequence.
    pub element: TypeRef,
    /// Creates an empty instance of the sequence's concrete type.
    pub new_instance: MakeValueFn,
    /// Appends an element, preserving insertion order.
    pub push: SetValueFn,
}

/// Operations and key/value metadata for a key-value map type.
pub struct MapOps {
    /// Key type of the map.
    pub key: TypeRef,
    /// Value type of the map.
    pub value: TypeRef,
    /// Creates an empty instance of the map's concrete type.
    pub new_instance: MakeValueFn,
    /// Inserts a key/value pair.
    pub insert: InsertPairFn,
    /// Tests whether a key is already present.
    pub contains_key: ContainsKeyFn,
}

/// Operations for a transparent wrapper type (`Option<T>`, `Box<T>`).
///
/// Classification sees through wrappers; the engine re-wraps produced inner
/// values and uses the wrapper's own default when substituting for a cycle.
pub struct WrapperOps {
    /// The wrapped type.
    pub inner: TypeRef,
    /// Lifts an inner value into the wrapper.
    pub wrap: WrapValueFn,
}

/// Properties, constructors, and the whole-instance replace op of a
/// composite type.
pub struct CompositeShape {
    /// Settable properties in declaration order.
    pub properties: Vec<PropertyDescriptor>,
    /// Registered parameterized constructors.
    pub constructors: Vec<ConstructorDescriptor>,
    /// Overwrites a whole instance with a produced value of the same type.
    pub replace: SetValueFn,
}

/// Structural facts of a type, as a closed variant.
pub enum TypeShape {
    /// Primitive-like type; fillable only through a registered source.
    Scalar,
    /// Enumeration with its declared values.
    Enumeration(Vec<EnumVariant>),
    /// Ordered sequence of one element type.
    Sequence(SequenceOps),
    /// Key-value map with two type parameters.
    Map(MapOps),
    /// Transparent single-type wrapper.
    Wrapper(WrapperOps),
    /// Plain composite type with settable properties.
    Composite(CompositeShape),
    /// Interface-like type requiring a concrete substitute.
    Polymorphic,
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Scalar => f.write_str("Scalar"),
            TypeShape::Enumeration(variants) => {
                f.debug_tuple("Enumeration").field(&variants.len()).finish()
            }
            TypeShape::Sequence(ops) => f.debug_tuple("Sequence").field(&ops.element).finish(),
            TypeShape::Map(ops) => f.debug_tuple("Map").field(&ops.key).field(&ops.value).finish(),
            TypeShape::Wrapper(ops) => f.debug_tuple("Wrapper").field(&ops.inner).finish(),
            TypeShape::Composite(shape) => {
                f.debug_tuple("Composite").field(&shape.properties.len()).finish()
            }
            TypeShape::Polymorphic => f.write_str("Polymorphic"),
        }
    }
}

/// Describes a type at runtime: identity, structural facts, and an optional
/// default-value factory.
///
/// For composites the default factory doubles as the zero-argument
/// constructor; for every shape it is what cycle substitution and the
/// unknown-type policy fall back to.
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    shape: TypeShape,
    default_value: Option<MakeValueFn>,
}

impl TypeDescriptor {
    /// Creates a scalar descriptor for `T`.
    pub fn scalar<T: Any>(type_name: &'static str) -> Self {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name,
            shape: TypeShape::Scalar,
            default_value: None,
        }
    }

    /// Creates an enumeration descriptor for `T` with no variants; add them
    /// with [`with_variant`](Self::with_variant).
    pub fn enumeration<T: Any>(type_name: &'static str) -> Self {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name,
            shape: TypeShape::Enumeration(Vec::new()),
            default_value: None,
        }
    }

    /// Creates a sequence descriptor for the collection type `C` with
    /// element type `E`.
    pub fn sequence<C, E, N, P>(type_name: &'static str, new_instance: N, push: P) -> Self
    where
        C: Any,
        E: Fill,
        N: Fn() -> C + Send + Sync + 'static,
        P: Fn(&mut C, E) + Send + Sync + 'static,
    {
        TypeDescriptor {
            type_id: TypeId::of::<C>(),
            type_name,
            shape: TypeShape::Sequence(SequenceOps {
                element: TypeRef::of::<E>(),
                new_instance: Box::new(move || Box::new(new_instance()) as Value),
                push: Box::new(move |sequence, element| {
                    let sequence = downcast_target::<C>(sequence)?;
                    push(sequence, downcast_value::<E>(element)?);
                    Ok(())
                }),
            }),
            default_value: None,
        }
    }

    /// Creates a map descriptor for the collection type `C` with key type
    /// `K` and value type `V`.
    pub fn map<C, K, V, N, I, Q>(
        type_name: &'static str,
        new_instance: N,
        insert: I,
        contains_key: Q,
    ) -> Self
    where
        C: Any,
        K: Fill,
        V: Fill,
        N: Fn() -> C + Send + Sync + 'static,
        I: Fn(&mut C, K, V) + Send + Sync + 'static,
        Q: Fn(&C, &K) -> bool + Send + Sync + 'static,
    {
        TypeDescriptor {
            type_id: TypeId::of::<C>(),
            type_name,
            shape: TypeShape::Map(MapOps {
                key: TypeRef::of::<K>(),
                value: TypeRef::of::<V>(),
                new_instance: Box::new(move || Box::new(new_instance()) as Value),
                insert: Box::new(move |map, key, value| {
                    let map = downcast_target::<C>(map)?;
                    insert(map, downcast_value::<K>(key)?, downcast_value::<V>(value)?);
                    Ok(())
                }),
                contains_key: Box::new(move |map, key| {
                    let map = downcast_shared::<C>(map)?;
                    let key = downcast_shared::<K>(key)?;
                    Ok(contains_key(map, key))
                }),
            }),
            default_value: None,
        }
    }

    /// Creates a wrapper descriptor for `W` around the inner type `I`.
    pub fn wrapper<W, I, F>(type_name: &'static str, wrap: F) -> Self
    where
        W: Any,
        I: Fill,
        F: Fn(I) -> W + Send + Sync + 'static,
    {
        TypeDescriptor {
            type_id: TypeId::of::<W>(),
            type_name,
            shape: TypeShape::Wrapper(WrapperOps {
                inner: TypeRef::of::<I>(),
                wrap: Box::new(move |value| Ok(Box::new(wrap(downcast_value::<I>(value)?)) as Value)),
            }),
            default_value: None,
        }
    }

    /// Creates a composite descriptor for `T` with no properties; add them
    /// with [`with_property`](Self::with_property).
    pub fn composite<T: Any>(type_name: &'static str) -> Self {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name,
            shape: TypeShape::Composite(CompositeShape {
                properties: Vec::new(),
                constructors: Vec::new(),
                replace: Box::new(|target, value| {
                    let target = downcast_target::<T>(target)?;
                    *target = downcast_value::<T>(value)?;
                    Ok(())
                }),
            }),
            default_value: None,
        }
    }

    /// Creates a polymorphic descriptor for the interface-like type `T`.
    pub fn polymorphic<T: Any>(type_name: &'static str) -> Self {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name,
            shape: TypeShape::Polymorphic,
            default_value: None,
        }
    }

    /// Adds a settable property. Only valid on composite descriptors.
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        match &mut self.shape {
            TypeShape::Composite(shape) => shape.properties.push(property),
            _ => panic!("with_property is only valid on composite descriptors"),
        }
        self
    }

    /// Adds a parameterized constructor. Only valid on composite descriptors.
    pub fn with_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        match &mut self.shape {
            TypeShape::Composite(shape) => shape.constructors.push(constructor),
            _ => panic!("with_constructor is only valid on composite descriptors"),
        }
        self
    }

    /// Adds an enumeration variant. Only valid on enumeration descriptors.
    pub fn with_variant(mut self, variant: EnumVariant) -> Self {
        match &mut self.shape {
            TypeShape::Enumeration(variants) => variants.push(variant),
            _ => panic!("with_variant is only valid on enumeration descriptors"),
        }
        self
    }

    /// Sets the default-value factory.
    pub fn with_default<T, F>(mut self, make: F) -> Self
    where
        T: Any,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.default_value = Some(Box::new(move || Box::new(make()) as Value));
        self
    }

    /// The described type's identity.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The described type's name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The structural facts used for classification.
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Produces the type's default value, if a factory was registered.
    pub fn default_value(&self) -> Option<Value> {
        self.default_value.as_ref().map(|make| make())
    }

    /// Returns whether a default-value factory was registered.
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("shape", &self.shape)
            .field("has_default", &self.default_value.is_some())
            .finish()
    }
}

pub(crate) fn downcast_value<T: Any>(value: Value) -> Result<T> {
    value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        FillError::internal(format!(
            "expected a value of type `{}`",
            std::any::type_name::<T>()
        ))
    })
}

pub(crate) fn downcast_target<T: Any>(target: &mut dyn Any) -> Result<&mut T> {
    target.downcast_mut::<T>().ok_or_else(|| {
        FillError::internal(format!(
            "target is not a value of type `{}`",
            std::any::type_name::<T>()
        ))
    })
}

pub(crate) fn downcast_shared<T: Any>(value: &dyn Any) -> Result<&T> {
    value.downcast_ref::<T>().ok_or_else(|| {
        FillError::internal(format!(
            "expected a reference to type `{}`",
            std::any::type_name::<T>()
        ))
    })
}
