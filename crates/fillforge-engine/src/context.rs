//! Per-root-call fill context.

use std::any::TypeId;

use fillforge_core::{
    ConstructionPathTracker, FillError, RandomSource, Result, SetupRegistry, TypeDescriptor,
};

/// State threaded down the recursive fill of one root value: the setup
/// registry, the injected randomness source, the construction-path
/// tracker, and the depth guard.
///
/// Created fresh per root call and discarded when the call returns.
pub struct FillContext<'a> {
    registry: &'a SetupRegistry,
    random: &'a mut dyn RandomSource,
    tracker: ConstructionPathTracker,
    depth: usize,
    max_depth: usize,
}

impl<'a> FillContext<'a> {
    /// Creates a context with a fresh tracker.
    pub fn new(registry: &'a SetupRegistry, random: &'a mut dyn RandomSource) -> Self {
        let max_depth = registry.main().max_depth();
        FillContext {
            registry,
            random,
            tracker: ConstructionPathTracker::new(),
            depth: 0,
            max_depth,
        }
    }

    /// The setup registry for the whole call.
    pub fn registry(&self) -> &'a SetupRegistry {
        self.registry
    }

    /// The injected randomness source.
    pub fn random(&mut self) -> &mut dyn RandomSource {
        &mut *self.random
    }

    /// The construction-path tracker.
    pub fn tracker(&mut self) -> &mut ConstructionPathTracker {
        &mut self.tracker
    }

    /// Returns whether the type is on the current construction path.
    pub fn on_path(&self, type_id: TypeId) -> bool {
        self.tracker.contains(type_id)
    }

    pub(crate) fn descend(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(FillError::DepthLimitExceeded {
                type_name: descriptor.type_name(),
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth -= 1;
    }
}
