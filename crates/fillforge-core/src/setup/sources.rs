//! Default value sources for the primitive scalar types.
//!
//! These are the sources a fresh [`Setup`](super::Setup) starts with; any
//! of them can be replaced through `with_generator`. They draw from the
//! process-wide entropy source, not the injected
//! [`RandomSource`](crate::random::RandomSource), which only governs count
//! selection and enum/key sampling.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use rand::distr::Alphanumeric;
use rand::Rng;

use super::ValueSource;

pub(super) fn register_defaults(generators: &mut HashMap<TypeId, ValueSource>) {
    register::<i8>(generators, || rand::rng().random());
    register::<i16>(generators, || rand::rng().random());
    register::<i32>(generators, || rand::rng().random());
    register::<i64>(generators, || rand::rng().random());
    register::<i128>(generators, || rand::rng().random());
    register::<isize>(generators, || rand::rng().random::<i64>() as isize);
    register::<u8>(generators, || rand::rng().random());
    register::<u16>(generators, || rand::rng().random());
    register::<u32>(generators, || rand::rng().random());
    register::<u64>(generators, || rand::rng().random());
    register::<u128>(generators, || rand::rng().random());
    register::<usize>(generators, || rand::rng().random::<u64>() as usize);
    register::<f32>(generators, || rand::rng().random());
    register::<f64>(generators, || rand::rng().random());
    register::<bool>(generators, || rand::rng().random());
    register::<char>(generators, || rand::rng().random_range('a'..='z'));
    register::<String>(generators, random_string);
}

fn register<T: Any>(
    generators: &mut HashMap<TypeId, ValueSource>,
    produce: impl Fn() -> T + Send + Sync + 'static,
) {
    generators.insert(TypeId::of::<T>(), ValueSource::new(produce));
}

fn random_string() -> String {
    let length = rand::rng().random_range(8..=16);
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
