//! Collection population: count bounds, key uniqueness, root collections.

use std::collections::{BTreeMap, HashMap};

use fillforge::prelude::*;
use fillforge::FillError;

#[derive(Fill, Clone, Debug, Default, PartialEq)]
struct Entity {
    id: u32,
    label: String,
}

#[derive(Fill, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
enum Tier {
    #[default]
    Free,
    Pro,
    Team,
    Enterprise,
}

const TIER_COUNT: usize = 4;

#[derive(Fill, Clone, Debug, Default)]
struct Plan {
    quotas: HashMap<Tier, u32>,
    entities: Vec<Entity>,
    notes: BTreeMap<String, String>,
}

#[test]
fn test_sequence_count_is_within_bounds() {
    let mut filler = Filler::<Plan>::new()
        .setup(Setup::new().with_sequence_count_range(2..6))
        .with_seed(9);
    for _ in 0..20 {
        let plan = filler.create().unwrap();
        assert!((2..6).contains(&plan.entities.len()));
    }
}

#[test]
fn test_exact_sequence_count() {
    let mut filler = Filler::<Plan>::new()
        .setup(Setup::new().with_sequence_count(5))
        .with_seed(9);
    for _ in 0..10 {
        let plan = filler.create().unwrap();
        assert_eq!(plan.entities.len(), 5);
    }
}

#[test]
fn test_enumeration_keys_cover_every_variant() {
    let mut filler = Filler::<Plan>::new()
        .setup(Setup::new().with_map_key_count_range(TIER_COUNT..TIER_COUNT + 10))
        .with_seed(5);

    for _ in 0..10 {
        let plan = filler.create().unwrap();
        assert_eq!(plan.quotas.len(), TIER_COUNT);
        for tier in [Tier::Free, Tier::Pro, Tier::Team, Tier::Enterprise] {
            assert!(plan.quotas.contains_key(&tier));
        }
    }
}

#[test]
fn test_map_keys_are_pairwise_distinct() {
    let mut filler = Filler::<Plan>::new()
        .setup(Setup::new().with_map_key_count_range(1..6))
        .with_seed(5);
    let plan = filler.create().unwrap();
    // BTreeMap keys are distinct by construction; length within bounds
    // shows no silent overwrite happened either.
    assert!((1..6).contains(&plan.notes.len()));
}

#[test]
fn test_constant_key_source_fails_with_duplicate_key() {
    let mut filler = Filler::<HashMap<String, u32>>::new()
        .setup(
            Setup::new()
                .with_generator(|| "same".to_string())
                .with_map_key_count(2),
        )
        .with_seed(5);
    let outcome = filler.create();
    assert!(matches!(outcome, Err(FillError::DuplicateKey(_))));
}

#[test]
fn test_root_collection_creation() {
    let mut sequences = Filler::<Vec<Entity>>::new()
        .setup(Setup::new().with_sequence_count(3))
        .with_seed(2);
    let entities = sequences.create().unwrap();
    assert_eq!(entities.len(), 3);
    assert!(entities.iter().all(|entity| !entity.label.is_empty()));

    let mut maps = Filler::<HashMap<String, Entity>>::new()
        .setup(Setup::new().with_map_key_count(2))
        .with_seed(2);
    let map = maps.create().unwrap();
    assert_eq!(map.len(), 2);
}

#[test]
fn test_iterator_source_yields_values_in_order() {
    let mut filler = Filler::<Vec<u32>>::new()
        .setup(
            Setup::new()
                .with_values([1u32, 2, 4, 8])
                .with_sequence_count(4),
        )
        .with_seed(2);
    let values = filler.create().unwrap();
    assert_eq!(values, vec![1, 2, 4, 8]);
}

#[test]
fn test_iterator_source_failure_aborts_whole_create() {
    let mut filler = Filler::<Vec<u32>>::new()
        .setup(Setup::new().with_values([1u32, 2]).with_sequence_count(3))
        .with_seed(2);
    let outcome = filler.create();
    assert!(matches!(outcome, Err(FillError::ExhaustedValueSource(_))));
}
