//! Derive-based creation and property filling.

use std::sync::{Arc, Mutex};

use fillforge::prelude::*;
use fillforge::FillError;

#[derive(Fill, Clone, Debug, Default, PartialEq)]
struct Address {
    street: String,
    zip: u32,
}

#[derive(Fill, Clone, Debug, Default, PartialEq)]
struct Customer {
    name: String,
    age: u32,
    address: Address,
    tags: Vec<String>,
    #[fill(skip)]
    revision: u64,
}

#[derive(Fill, Clone, Debug, PartialEq)]
#[fill(no_default, constructor = "with_endpoint(String, u16)")]
struct Client {
    endpoint: String,
    port: u16,
}

impl Client {
    fn with_endpoint(endpoint: String, port: u16) -> Self {
        Client { endpoint, port }
    }
}

#[derive(Fill, Clone, Debug)]
#[fill(no_default)]
struct Vault {
    secret: String,
}

#[derive(Fill, Clone, Debug, Default, PartialEq)]
#[fill(scalar)]
struct ApiKey(String);

#[derive(Fill, Clone, Debug, Default, PartialEq)]
struct Account {
    id: u32,
    key: ApiKey,
}

#[test]
fn test_create_fills_every_settable_property() {
    let mut filler = Filler::<Customer>::new().with_seed(42);
    let customer = filler.create().unwrap();

    assert!(!customer.name.is_empty());
    assert!(!customer.address.street.is_empty());
    assert!(!customer.tags.is_empty());
    assert!(customer.tags.iter().all(|tag| !tag.is_empty()));
}

#[test]
fn test_skipped_field_is_left_alone() {
    let mut filler = Filler::<Customer>::new().with_seed(42);
    let customer = filler.create().unwrap();
    assert_eq!(customer.revision, 0);
}

#[test]
fn test_deterministic_sources_observed_verbatim() {
    let mut filler = Filler::<Customer>::new()
        .setup(
            Setup::new()
                .with_generator(|| "fixed".to_string())
                .with_generator(|| 7u32)
                .with_sequence_count(2),
        )
        .with_seed(1);

    let customer = filler.create().unwrap();
    assert_eq!(customer.name, "fixed");
    assert_eq!(customer.age, 7);
    assert_eq!(customer.address.street, "fixed");
    assert_eq!(customer.address.zip, 7);
    assert_eq!(customer.tags, vec!["fixed".to_string(), "fixed".to_string()]);
}

#[test]
fn test_property_source_beats_type_source() {
    let mut filler = Filler::<Customer>::new()
        .setup(
            Setup::new()
                .with_generator(|| "typewide".to_string())
                .with_property_generator::<Customer, _, _>("name", || "special".to_string()),
        )
        .with_seed(1);

    let customer = filler.create().unwrap();
    assert_eq!(customer.name, "special");
    assert_eq!(customer.address.street, "typewide");
}

#[test]
fn test_property_fill_order_first_then_declared_then_last() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let log = |label: &'static str| {
        let observed = Arc::clone(&observed);
        move || observed.lock().unwrap().push(label)
    };

    let name_log = log("name");
    let age_log = log("age");
    let address_log = log("address");
    let tags_log = log("tags");

    let mut filler = Filler::<Customer>::new()
        .setup(
            Setup::new()
                .with_property_generator::<Customer, _, _>("name", move || {
                    name_log();
                    "n".to_string()
                })
                .with_property_generator::<Customer, _, _>("age", move || {
                    age_log();
                    1u32
                })
                .with_property_generator::<Customer, _, _>("address", move || {
                    address_log();
                    Address::default()
                })
                .with_property_generator::<Customer, _, _>("tags", move || {
                    tags_log();
                    Vec::<String>::new()
                })
                .with_property_order::<Customer>("tags", PropertyPosition::First)
                .with_property_order::<Customer>("name", PropertyPosition::Last),
        )
        .with_seed(1);

    filler.create().unwrap();
    assert_eq!(*observed.lock().unwrap(), vec!["tags", "age", "address", "name"]);
}

#[test]
fn test_ignored_type_and_property() {
    let mut filler = Filler::<Customer>::new()
        .setup(
            Setup::new()
                .with_ignored_type::<u32>()
                .with_ignored_property::<Customer>("name"),
        )
        .with_seed(1);

    let customer = filler.create().unwrap();
    assert_eq!(customer.age, 0);
    assert_eq!(customer.address.zip, 0);
    assert!(customer.name.is_empty());
    assert!(!customer.address.street.is_empty());
}

#[test]
fn test_registered_constructor_builds_instance() {
    let mut filler = Filler::<Client>::new()
        .setup(
            Setup::new()
                .with_generator(|| "svc.internal".to_string())
                .with_generator(|| 8080u16),
        )
        .with_seed(1);

    let client = filler.create().unwrap();
    assert_eq!(client.endpoint, "svc.internal");
    assert_eq!(client.port, 8080);
}

#[test]
fn test_no_default_without_constructor_fails() {
    let mut filler = Filler::<Vault>::new().with_seed(1);
    let outcome = filler.create();
    assert!(matches!(outcome, Err(FillError::NoUsableConstructor("Vault"))));
}

#[test]
fn test_unknown_scalar_type_policy() {
    let mut strict = Filler::<Account>::new().with_seed(1);
    assert!(matches!(
        strict.create(),
        Err(FillError::UnregisteredType("ApiKey"))
    ));

    let mut lenient = Filler::<Account>::new()
        .setup(Setup::new().with_ignore_unknown_types(true))
        .with_seed(1);
    let account = lenient.create().unwrap();
    assert_eq!(account.key, ApiKey::default());

    let mut sourced = Filler::<Account>::new()
        .setup(Setup::new().with_generator(|| ApiKey("k-123".to_string())))
        .with_seed(1);
    let account = sourced.create().unwrap();
    assert_eq!(account.key, ApiKey("k-123".to_string()));
}

#[test]
fn test_per_type_setup_override() {
    let mut filler = Filler::<Customer>::new()
        .setup(Setup::new().with_generator(|| "main".to_string()))
        .setup_for::<Address>(Setup::new().with_generator(|| "nested".to_string()))
        .with_seed(1);

    let customer = filler.create().unwrap();
    assert_eq!(customer.name, "main");
    assert_eq!(customer.address.street, "nested");
}

#[test]
fn test_create_many_produces_independent_instances() {
    let mut filler = Filler::<Customer>::new().with_seed(42);
    let customers = filler.create_many(5).unwrap();
    assert_eq!(customers.len(), 5);
    for customer in &customers {
        assert!(!customer.name.is_empty());
    }
}
