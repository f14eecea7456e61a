use std::any::TypeId;

use super::*;

#[test]
fn test_new_setup_has_primitive_sources() {
    let setup = Setup::new();
    assert!(setup.has_generator(TypeId::of::<u32>()));
    assert!(setup.has_generator(TypeId::of::<String>()));
    assert!(setup.has_generator(TypeId::of::<bool>()));
    assert!(!setup.has_generator(TypeId::of::<Vec<u8>>()));
}

#[test]
fn test_default_count_ranges() {
    let setup = Setup::new();
    assert_eq!(setup.sequence_count_range(), 1..25);
    assert_eq!(setup.map_key_count_range(), 1..10);
}

#[test]
fn test_generator_override() {
    let setup = Setup::new().with_generator(|| 42u32);
    let value = setup
        .generator(TypeId::of::<u32>())
        .unwrap()
        .produce()
        .unwrap();
    assert_eq!(*value.downcast::<u32>().unwrap(), 42);
}

#[test]
fn test_value_source_from_values_runs_dry() {
    let source = ValueSource::from_values([1u32, 2]);
    assert_eq!(*source.produce().unwrap().downcast::<u32>().unwrap(), 1);
    assert_eq!(*source.produce().unwrap().downcast::<u32>().unwrap(), 2);
    assert!(matches!(
        source.produce(),
        Err(crate::error::FillError::ExhaustedValueSource(_))
    ));
}

#[test]
fn test_property_source_precedence_lookup() {
    struct Owner;
    let setup = Setup::new()
        .with_generator(|| 1u32)
        .with_property_generator::<Owner, _, _>("age", || 2u32);
    let key = PropertyKey::of::<Owner>("age");
    let value = setup.property_generator(key).unwrap().produce().unwrap();
    assert_eq!(*value.downcast::<u32>().unwrap(), 2);
    assert!(setup.property_generator(PropertyKey::of::<Owner>("name")).is_none());
}

#[test]
fn test_ignore_sets() {
    struct Owner;
    let setup = Setup::new()
        .with_ignored_type::<u32>()
        .with_ignored_property::<Owner>("secret");
    assert!(setup.is_type_ignored(TypeId::of::<u32>()));
    assert!(!setup.is_type_ignored(TypeId::of::<u64>()));
    assert!(setup.is_property_ignored(PropertyKey::of::<Owner>("secret")));
}

#[test]
fn test_property_order_preserves_registration_order() {
    struct Owner;
    let setup = Setup::new()
        .with_property_order::<Owner>("b", PropertyPosition::First)
        .with_property_order::<Owner>("a", PropertyPosition::First)
        .with_property_order::<Owner>("z", PropertyPosition::Last);
    let order: Vec<_> = setup
        .property_order()
        .map(|(key, position)| (key.property(), position))
        .collect();
    assert_eq!(
        order,
        vec![
            ("b", PropertyPosition::First),
            ("a", PropertyPosition::First),
            ("z", PropertyPosition::Last),
        ]
    );
}

#[test]
fn test_registry_falls_back_to_main() {
    struct Special;
    let mut registry = SetupRegistry::new(Setup::new().with_sequence_count(3));
    registry.register::<Special>(Setup::new().with_sequence_count(7));

    assert_eq!(
        registry.for_type(TypeId::of::<Special>()).sequence_count_range(),
        7..8
    );
    assert_eq!(
        registry.for_type(TypeId::of::<u32>()).sequence_count_range(),
        3..4
    );
}
