//! Keeps translatable leaves in sync with the current translator.
//!
//! Leaves are handed the propagator explicitly (constructor or parameter
//! injection) and call `register`/`unregister` on it directly. A leaf is only
//! ever given its nearest propagator, so no registration is handled twice.

use crate::content::HostContent;
use crate::i18n::translator::Translator;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::debug;

/// Process-unique identity of a translatable leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(u64);

static NEXT_LEAF_ID: AtomicU64 = AtomicU64::new(1);

/// A text placeholder that renders the translation of a single key.
#[derive(Debug)]
pub struct TranslatableText {
    id: LeafId,
    key: String,
    translator: RwLock<Option<Translator>>,
}

impl TranslatableText {
    pub fn new(key: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: LeafId(NEXT_LEAF_ID.fetch_add(1, Ordering::Relaxed)),
            key: key.into(),
            translator: RwLock::new(None),
        })
    }

    pub fn id(&self) -> LeafId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Inject the translation function. Called by the owning propagator.
    pub fn set_translator(&self, translator: Translator) {
        let mut slot = self.translator.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(translator);
    }

    /// Render the translated text; empty until a translator is injected or
    /// when the key is empty.
    pub fn render(&self) -> String {
        if self.key.is_empty() {
            return String::new();
        }
        let slot = self.translator.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .map(|t| t.translate(&self.key))
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct PropagatorState {
    translator: Translator,
    leaves: HashMap<LeafId, Arc<TranslatableText>>,
}

/// Registered-leaf set plus the translator pushed to each member.
///
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct TranslationPropagator {
    state: Arc<Mutex<PropagatorState>>,
}

impl TranslationPropagator {
    pub fn new(translator: Translator) -> Self {
        Self {
            state: Arc::new(Mutex::new(PropagatorState {
                translator,
                leaves: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PropagatorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add `leaf` and inject the current translator.
    ///
    /// Returns `false` when the leaf was already registered.
    pub fn register(&self, leaf: &Arc<TranslatableText>) -> bool {
        let mut state = self.lock();
        if state.leaves.contains_key(&leaf.id()) {
            return false;
        }
        leaf.set_translator(state.translator.clone());
        state.leaves.insert(leaf.id(), Arc::clone(leaf));
        debug!("Registered translatable leaf '{}' ({} total)", leaf.key(), state.leaves.len());
        true
    }

    /// Remove `leaf`. Unknown leaves are ignored.
    pub fn unregister(&self, leaf: &TranslatableText) -> bool {
        let removed = self.lock().leaves.remove(&leaf.id()).is_some();
        if removed {
            debug!("Unregistered translatable leaf '{}'", leaf.key());
        }
        removed
    }

    /// Register and return a handle that unregisters the leaf when dropped.
    pub fn attach(&self, leaf: Arc<TranslatableText>) -> LeafHandle {
        self.register(&leaf);
        LeafHandle {
            leaf,
            propagator: self.clone(),
        }
    }

    /// Register every leaf already present in `content`.
    ///
    /// Returns the number of newly registered leaves.
    pub fn scan_and_register(&self, content: &HostContent) -> usize {
        let added = content
            .translatable_leaves()
            .iter()
            .filter(|leaf| self.register(leaf))
            .count();
        debug!("Scan registered {} existing translatable leaves", added);
        added
    }

    /// Store `translator` and push it to every registered leaf.
    pub fn update(&self, translator: Translator) {
        let mut state = self.lock();
        for leaf in state.leaves.values() {
            leaf.set_translator(translator.clone());
        }
        debug!(
            "Pushed {} translator to {} leaves",
            translator.locale(),
            state.leaves.len()
        );
        state.translator = translator;
    }

    pub fn is_registered(&self, leaf: &TranslatableText) -> bool {
        self.lock().leaves.contains_key(&leaf.id())
    }

    pub fn len(&self) -> usize {
        self.lock().leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().leaves.clear();
    }
}

/// Registration that lasts as long as the handle.
#[derive(Debug)]
pub struct LeafHandle {
    leaf: Arc<TranslatableText>,
    propagator: TranslationPropagator,
}

impl LeafHandle {
    pub fn leaf(&self) -> &Arc<TranslatableText> {
        &self.leaf
    }
}

impl Drop for LeafHandle {
    fn drop(&mut self) {
        self.propagator.unregister(&self.leaf);
    }
}
