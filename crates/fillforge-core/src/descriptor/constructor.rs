//! Constructor descriptor.

use std::any::Any;
use std::fmt;

use super::{downcast_value, TypeRef, Value};
use crate::error::{FillError, Result};

/// Ordered argument values handed to a constructor's invoke closure.
pub struct ArgList {
    values: std::vec::IntoIter<Value>,
}

impl ArgList {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        ArgList {
            values: values.into_iter(),
        }
    }

    /// Takes the next argument, downcast to its concrete type.
    pub fn take<T: Any>(&mut self) -> Result<T> {
        let value = self
            .values
            .next()
            .ok_or_else(|| FillError::internal("constructor invoked with too few arguments"))?;
        downcast_value(value)
    }
}

/// Describes one parameterized constructor of a composite type.
pub struct ConstructorDescriptor {
    params: Vec<TypeRef>,
    invoke: Box<dyn Fn(ArgList) -> Result<Value> + Send + Sync>,
}

impl ConstructorDescriptor {
    /// Creates a constructor descriptor from its parameter types and an
    /// invoke closure consuming them in order.
    pub fn new<F>(params: Vec<TypeRef>, invoke: F) -> Self
    where
        F: Fn(ArgList) -> Result<Value> + Send + Sync + 'static,
    {
        ConstructorDescriptor {
            params,
            invoke: Box::new(invoke),
        }
    }

    /// Parameter types in declaration order.
    pub fn params(&self) -> &[TypeRef] {
        &self.params
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Invokes the constructor with produced argument values.
    pub fn invoke(&self, arguments: Vec<Value>) -> Result<Value> {
        if arguments.len() != self.params.len() {
            return Err(FillError::internal(format!(
                "constructor expects {} arguments, got {}",
                self.params.len(),
                arguments.len()
            )));
        }
        (self.invoke)(ArgList::new(arguments))
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .finish()
    }
}
