//! Type Classifier
//!
//! Decides whether a static type is a recognized two-state wrapper, an
//! asynchronous wrapper around one, or unrelated. Results are memoized in a
//! concurrent cache owned by the classifier instance; racing inserts compute
//! the same value, so get-or-insert needs no further coordination.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use super::domain::{AccessorRole, Classification, FamilyId};
use crate::config::{GuardConfig, WrapperFamily};
use crate::shared::models::TypeRef;

/// Default cache capacity (distinct types seen in one run)
const CLASSIFICATION_CACHE_CAPACITY: usize = 256;

/// Thread-safe classifier with its own cache
#[derive(Debug)]
pub struct TypeClassifier {
    families: Vec<WrapperFamily>,
    async_wrappers: Vec<String>,
    cache: DashMap<TypeRef, Classification>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl TypeClassifier {
    pub fn new(config: &GuardConfig) -> Self {
        Self {
            families: config.families.clone(),
            async_wrappers: config.async_wrappers.clone(),
            cache: DashMap::with_capacity(CLASSIFICATION_CACHE_CAPACITY),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Classify a type; a missing type is `Unrelated`
    pub fn classify(&self, ty: Option<&TypeRef>) -> Classification {
        let Some(ty) = ty else {
            return Classification::Unrelated;
        };

        if let Some(cached) = self.cache.get(ty) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *cached;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let classification = self.compute(ty);
        debug!(ty = %ty, ?classification, "classified type");
        self.cache.insert(ty.clone(), classification);
        classification
    }

    fn compute(&self, ty: &TypeRef) -> Classification {
        // Constructed single-parameter generics only; the bare definition
        // has no argument and is rejected here
        let Some(arg) = ty.single_type_arg() else {
            return Classification::Unrelated;
        };

        if let Some(family) = self.family_of_definition(&ty.name) {
            return Classification::OkNotOk(family);
        }

        if self.async_wrappers.iter().any(|w| w == &ty.name) {
            if let Some(family) = arg
                .single_type_arg()
                .and_then(|_| self.family_of_definition(&arg.name))
            {
                return Classification::AsyncWrapping(family);
            }
        }

        Classification::Unrelated
    }

    fn family_of_definition(&self, name: &str) -> Option<FamilyId> {
        self.families.iter().position(|f| f.matches_type_name(name))
    }

    pub fn family(&self, id: FamilyId) -> Option<&WrapperFamily> {
        self.families.get(id)
    }

    pub fn families(&self) -> &[WrapperFamily] {
        &self.families
    }

    /// Role of `member` on the family, if any
    pub fn accessor_role(&self, id: FamilyId, member: &str) -> Option<AccessorRole> {
        self.family(id).and_then(|f| f.accessor_role(member))
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            size: self.cache.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Classifier cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifierStats {
    pub size: usize,
    pub hits: usize,
    pub misses: usize,
}

impl ClassifierStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
