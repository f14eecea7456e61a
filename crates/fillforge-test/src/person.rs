//! Plain composite fixtures.

use std::sync::OnceLock;

use fillforge_core::{
    ArgList, ConstructorDescriptor, Fill, PropertyDescriptor, TypeDescriptor, TypeRef, Value,
};

/// Street address of a [`Person`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub zip: u32,
}

impl Fill for Address {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Address>("Address")
                .with_default(Address::default)
                .with_property(PropertyDescriptor::of(
                    "street",
                    |a: &mut Address, v: String| a.street = v,
                ))
                .with_property(PropertyDescriptor::of("zip", |a: &mut Address, v: u32| {
                    a.zip = v
                }))
        })
    }
}

/// Person with scalar, nested-composite, and sequence properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub address: Address,
    pub nicknames: Vec<String>,
}

impl Fill for Person {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Person>("Person")
                .with_default(Person::default)
                .with_property(PropertyDescriptor::of(
                    "name",
                    |p: &mut Person, v: String| p.name = v,
                ))
                .with_property(PropertyDescriptor::of("age", |p: &mut Person, v: u32| {
                    p.age = v
                }))
                .with_property(PropertyDescriptor::of(
                    "address",
                    |p: &mut Person, v: Address| p.address = v,
                ))
                .with_property(PropertyDescriptor::of(
                    "nicknames",
                    |p: &mut Person, v: Vec<String>| p.nicknames = v,
                ))
        })
    }
}

/// Report without a default factory; built through its registered
/// constructor, after which the filler assigns its properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub title: String,
    pub pages: u32,
}

impl Report {
    /// Creates a report with an empty body.
    pub fn with_title(title: String) -> Self {
        Report { title, pages: 0 }
    }
}

impl Fill for Report {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Report>("Report")
                .with_property(PropertyDescriptor::of(
                    "title",
                    |r: &mut Report, v: String| r.title = v,
                ))
                .with_property(PropertyDescriptor::of("pages", |r: &mut Report, v: u32| {
                    r.pages = v
                }))
                .with_constructor(ConstructorDescriptor::new(
                    vec![TypeRef::of::<String>()],
                    |mut args: ArgList| {
                        let title: String = args.take()?;
                        Ok(Box::new(Report::with_title(title)) as Value)
                    },
                ))
        })
    }
}
