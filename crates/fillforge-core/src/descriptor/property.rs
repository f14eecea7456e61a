//! Property descriptor.

use std::any::Any;
use std::fmt;

use super::{downcast_target, downcast_value, SetValueFn, TypeRef, Value};
use crate::error::Result;
use crate::fill::Fill;

/// Describes one settable property of a composite type.
pub struct PropertyDescriptor {
    name: &'static str,
    declared: TypeRef,
    set: SetValueFn,
}

impl PropertyDescriptor {
    /// Creates a property descriptor from a typed setter.
    ///
    /// `O` is the declaring composite type and `P` the property's declared
    /// type; both are recovered from the setter's signature.
    pub fn of<O, P, F>(name: &'static str, apply: F) -> Self
    where
        O: Any,
        P: Fill,
        F: Fn(&mut O, P) + Send + Sync + 'static,
    {
        PropertyDescriptor {
            name,
            declared: TypeRef::of::<P>(),
            set: Box::new(move |target, value| {
                let target = downcast_target::<O>(target)?;
                apply(target, downcast_value::<P>(value)?);
                Ok(())
            }),
        }
    }

    /// Name of the property.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The property's declared type.
    pub fn declared(&self) -> TypeRef {
        self.declared
    }

    /// Writes a produced value into the property of a type-erased instance.
    pub fn assign(&self, target: &mut dyn Any, value: Value) -> Result<()> {
        (self.set)(target, value)
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .finish()
    }
}
