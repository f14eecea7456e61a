//! Enumeration and map fixtures.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use fillforge_core::{EnumVariant, Fill, PropertyDescriptor, TypeDescriptor};

/// Product tier tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sku {
    Basic,
    Standard,
    Premium,
    Enterprise,
}

impl Sku {
    /// All declared values, in declaration order.
    pub const ALL: [Sku; 4] = [Sku::Basic, Sku::Standard, Sku::Premium, Sku::Enterprise];
}

impl Fill for Sku {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::enumeration::<Sku>("Sku")
                .with_variant(EnumVariant::new("Basic", || Sku::Basic))
                .with_variant(EnumVariant::new("Standard", || Sku::Standard))
                .with_variant(EnumVariant::new("Premium", || Sku::Premium))
                .with_variant(EnumVariant::new("Enterprise", || Sku::Enterprise))
        })
    }
}

/// Inventory keyed by [`Sku`] plus a sorted price list.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub stock: HashMap<Sku, u32>,
    pub prices: BTreeMap<String, u64>,
}

impl Fill for Catalog {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Catalog>("Catalog")
                .with_default(Catalog::default)
                .with_property(PropertyDescriptor::of(
                    "stock",
                    |c: &mut Catalog, v: HashMap<Sku, u32>| c.stock = v,
                ))
                .with_property(PropertyDescriptor::of(
                    "prices",
                    |c: &mut Catalog, v: BTreeMap<String, u64>| c.prices = v,
                ))
        })
    }
}

/// Opaque vendor token with no registered source by default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VendorToken(pub u64);

impl Fill for VendorToken {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::scalar::<VendorToken>("VendorToken").with_default(VendorToken::default)
        })
    }
}

/// Composite holding an unclassifiable [`VendorToken`] property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shipment {
    pub id: u32,
    pub token: VendorToken,
}

impl Fill for Shipment {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::composite::<Shipment>("Shipment")
                .with_default(Shipment::default)
                .with_property(PropertyDescriptor::of("id", |s: &mut Shipment, v: u32| {
                    s.id = v
                }))
                .with_property(PropertyDescriptor::of(
                    "token",
                    |s: &mut Shipment, v: VendorToken| s.token = v,
                ))
        })
    }
}
