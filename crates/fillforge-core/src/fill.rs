//! The [`Fill`] trait and descriptor impls for standard library types.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;
use std::sync::OnceLock;

use crate::descriptor::{intern, TypeDescriptor};

/// Wires a type to its runtime descriptor.
///
/// Implementations come from three places: `#[derive(Fill)]` for user
/// structs and unit enums, the [`polymorphic!`](crate::polymorphic) macro
/// for boxed trait objects, and the blanket impls in this module for
/// scalars, collections, and wrappers.
///
/// The descriptor is built once and cached; repeated calls return the same
/// reference.
pub trait Fill: std::any::Any {
    /// Returns the descriptor for this type.
    fn descriptor() -> &'static TypeDescriptor;
}

macro_rules! scalar_fill {
    ($($ty:ty => $name:literal),+ $(,)?) => {$(
        impl Fill for $ty {
            fn descriptor() -> &'static TypeDescriptor {
                static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    TypeDescriptor::scalar::<$ty>($name).with_default(<$ty as Default>::default)
                })
            }
        }
    )+};
}

scalar_fill! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    bool => "bool",
    String => "String",
}

impl Fill for char {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| TypeDescriptor::scalar::<char>("char").with_default(|| '\0'))
    }
}

impl<T: Fill> Fill for Vec<T> {
    fn descriptor() -> &'static TypeDescriptor {
        intern(TypeId::of::<Self>(), || {
            TypeDescriptor::sequence::<Vec<T>, T, _, _>(
                std::any::type_name::<Self>(),
                Vec::new,
                Vec::push,
            )
            .with_default(Vec::<T>::new)
        })
    }
}

impl<T: Fill> Fill for VecDeque<T> {
    fn descriptor() -> &'static TypeDescriptor {
        intern(TypeId::of::<Self>(), || {
            TypeDescriptor::sequence::<VecDeque<T>, T, _, _>(
                std::any::type_name::<Self>(),
                VecDeque::new,
                VecDeque::push_back,
            )
            .with_default(VecDeque::<T>::new)
        })
    }
}

impl<K, V> Fill for HashMap<K, V>
where
    K: Fill + Eq + Hash,
    V: Fill,
{
    fn descriptor() -> &'static TypeDescriptor {
        intern(TypeId::of::<Self>(), || {
            TypeDescriptor::map::<HashMap<K, V>, K, V, _, _, _>(
                std::any::type_name::<Self>(),
                HashMap::new,
                |map, key, value| {
                    map.insert(key, value);
                },
                HashMap::contains_key,
            )
            .with_default(HashMap::<K, V>::new)
        })
    }
}

impl<K, V> Fill for BTreeMap<K, V>
where
    K: Fill + Ord,
    V: Fill,
{
    fn descriptor() -> &'static TypeDescriptor {
        intern(TypeId::of::<Self>(), || {
            TypeDescriptor::map::<BTreeMap<K, V>, K, V, _, _, _>(
                std::any::type_name::<Self>(),
                BTreeMap::new,
                |map, key, value| {
                    map.insert(key, value);
                },
                BTreeMap::contains_key,
            )
            .with_default(BTreeMap::<K, V>::new)
        })
    }
}

impl<T: Fill> Fill for Option<T> {
    fn descriptor() -> &'static TypeDescriptor {
        intern(TypeId::of::<Self>(), || {
            TypeDescriptor::wrapper::<Option<T>, T, _>(std::any::type_name::<Self>(), Some)
                .with_default(|| None::<T>)
        })
    }
}

impl<T: Fill> Fill for Box<T> {
    fn descriptor() -> &'static TypeDescriptor {
        intern(TypeId::of::<Self>(), || {
            TypeDescriptor::wrapper::<Box<T>, T, _>(std::any::type_name::<Self>(), Box::new)
        })
    }
}

/// Implements [`Fill`] for boxed trait objects with the polymorphic shape.
///
/// The engine resolves polymorphic types through the setup's implementation
/// bindings or mocker.
///
/// # Example
///
/// ```
/// use fillforge_core::polymorphic;
///
/// trait Mailer {
///     fn sender(&self) -> &str;
/// }
///
/// polymorphic!(dyn Mailer);
/// ```
#[macro_export]
macro_rules! polymorphic {
    ($(dyn $trait_:path),+ $(,)?) => {$(
        impl $crate::Fill for ::std::boxed::Box<dyn $trait_> {
            fn descriptor() -> &'static $crate::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::TypeDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::TypeDescriptor::polymorphic::<::std::boxed::Box<dyn $trait_>>(
                        ::std::concat!("dyn ", ::std::stringify!($trait_)),
                    )
                })
            }
        }
    )+};
}
