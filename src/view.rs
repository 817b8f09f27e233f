// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Incrementally maintained view caches.
//!
//! A view cache materializes the entity list for one component mask and keeps
//! it current by folding queued Add/Remove diffs on the next read instead of
//! rescanning the world.

use ahash::AHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::entity::{Entity, EntityRegistry};
use crate::mask::ComponentMask;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum DiffOp {
    Add,
    Remove,
}

/// One queued membership change.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CacheDiff {
    pub entity: Entity,
    pub op: DiffOp,
}

/// Materialized entity list for one mask key.
pub(crate) struct ViewCache {
    /// Matching entities; appended on Add, swap-removed on Remove.
    entities: Vec<Entity>,
    /// Membership set for the materialized list; queued diffs not included.
    lookup: AHashSet<Entity>,
    /// Queued membership changes, folded in oldest-first on the next read.
    diffs: SmallVec<[CacheDiff; 8]>,
}

impl ViewCache {
    /// Materialize the cache for `key` with a single scan of the live list.
    pub fn build(registry: &EntityRegistry, key: &ComponentMask) -> Self {
        let mut entities = Vec::new();
        let mut lookup = AHashSet::new();
        for &entity in registry.live_entities() {
            if key.is_subset_of(registry.mask(entity)) {
                entities.push(entity);
                lookup.insert(entity);
            }
        }
        trace!(?key, matched = entities.len(), "built view cache");
        Self {
            entities,
            lookup,
            diffs: SmallVec::new(),
        }
    }

    /// The materialized list. Current only after `apply_diffs`.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Whether the entity will be in the cache once pending diffs are folded.
    ///
    /// The entity's most recent queued diff wins; the materialized lookup
    /// answers only when no diff mentions it. Mutation paths must use this,
    /// not the raw lookup, or an unflushed cache diverges from the world.
    pub fn contains_effective(&self, entity: Entity) -> bool {
        for diff in self.diffs.iter().rev() {
            if diff.entity == entity {
                return diff.op == DiffOp::Add;
            }
        }
        self.lookup.contains(&entity)
    }

    /// Queue a membership change.
    ///
    /// A diff repeating the entity's most recent queued one is dropped.
    /// Alternating toggles queue every step, so application order replays the
    /// exact mutation history.
    pub fn queue(&mut self, entity: Entity, op: DiffOp) {
        for diff in self.diffs.iter().rev() {
            if diff.entity == entity {
                if diff.op == op {
                    return;
                }
                break;
            }
        }
        self.diffs.push(CacheDiff { entity, op });
    }

    pub fn pending_diffs(&self) -> usize {
        self.diffs.len()
    }

    /// Fold queued diffs into the materialized list, oldest first.
    ///
    /// Add appends, Remove swaps the entity with the last list element and
    /// pops, so the list order is insertion order modulo those swaps.
    pub fn apply_diffs(&mut self) {
        if self.diffs.is_empty() {
            return;
        }
        let applied = self.diffs.len();
        for diff in self.diffs.drain(..) {
            match diff.op {
                DiffOp::Add => {
                    debug_assert!(
                        !self.lookup.contains(&diff.entity),
                        "queued Add for {:?} which is already cached",
                        diff.entity
                    );
                    self.entities.push(diff.entity);
                    self.lookup.insert(diff.entity);
                }
                DiffOp::Remove => {
                    debug_assert!(
                        self.lookup.contains(&diff.entity),
                        "queued Remove for {:?} which is not cached",
                        diff.entity
                    );
                    if let Some(pos) = self.entities.iter().position(|&e| e == diff.entity) {
                        self.entities.swap_remove(pos);
                    }
                    self.lookup.remove(&diff.entity);
                }
            }
        }
        trace!(applied, size = self.entities.len(), "applied view diffs");
    }
}
