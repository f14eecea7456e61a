//! Polymorphic fixture: a capability trait with one concrete
//! implementation.

use std::sync::OnceLock;

use fillforge_core::{polymorphic, Fill, PropertyDescriptor, TypeDescriptor};

/// Outbound mail capability used by polymorphic-resolution tests.
pub trait Mailer {
    /// Address the mail is sent from.
    fn sender(&self) -> &str;
}

polymorphic!(dyn Mailer);

/// Concrete [`Mailer`] with fillable properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmtpMailer {
    pub host: String,
    pub port: u16,
}

impl Mailer for SmtpMailer {
    fn sender(&self) -> &str {
        &self.host
    }
}

impl Fill for SmtpMailer {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<SmtpMailer>("SmtpMailer")
                .with_default(SmtpMailer::default)
                .with_property(PropertyDescriptor::of(
                    "host",
                    |m: &mut SmtpMailer, v: String| m.host = v,
                ))
                .with_property(PropertyDescriptor::of(
                    "port",
                    |m: &mut SmtpMailer, v: u16| m.port = v,
                ))
        })
    }
}
