//! Process-wide registry of the active chain parameters.
//!
//! Exactly one profile is active at a time. Readers take a shared guard;
//! test-harness overrides go through [`Registry::with_active_mut`], which
//! holds the write lock for the whole mutation so readers observe either
//! the old profile or the fully overridden one, never a partial state. A
//! generation counter lets callers that cache derived values detect that
//! the profile changed underneath them.

use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

use log::info;

use crate::chainparams::{ActivationOverrides, ChainParams, Network};
use crate::error::Result;

/// The process-wide registry consulted by [`active_params`].
pub static CHAIN_PARAMS: Registry = Registry::new();

/// Holder of the currently selected [`ChainParams`].
pub struct Registry {
    params: RwLock<Option<ChainParams>>,
    generation: AtomicU64,
}

impl Registry {
    /// Creates an empty registry with no network selected.
    pub const fn new() -> Self {
        Registry {
            params: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Builds the profile for `network` and publishes it, replacing any
    /// previously selected profile.
    pub fn select(&self, network: Network, overrides: &ActivationOverrides) -> Result<()> {
        let params = ChainParams::for_network(network, overrides)?;
        let mut slot = self.params.write().expect("chain params lock poisoned");
        *slot = Some(params);
        self.generation.fetch_add(1, Ordering::SeqCst);
        info!("selected chain {network}");
        Ok(())
    }

    /// Read access to the active profile.
    ///
    /// Panics if no network has been selected yet; consulting consensus
    /// parameters before selection is a programming error, not a runtime
    /// condition to recover from.
    pub fn active(&self) -> ActiveParams<'_> {
        let guard = self.params.read().expect("chain params lock poisoned");
        assert!(
            guard.is_some(),
            "chain params requested before a network was selected"
        );
        ActiveParams { guard }
    }

    /// Read access to the active profile, or `None` before selection.
    pub fn try_active(&self) -> Option<ActiveParams<'_>> {
        let guard = self.params.read().expect("chain params lock poisoned");
        guard.is_some().then_some(ActiveParams { guard })
    }

    /// Applies `mutate` to the active profile under the write lock and
    /// bumps the generation so cached readers revalidate.
    ///
    /// Panics if no network has been selected yet.
    pub fn with_active_mut<F>(&self, mutate: F)
    where
        F: FnOnce(&mut ChainParams),
    {
        let mut slot = self.params.write().expect("chain params lock poisoned");
        let params = slot
            .as_mut()
            .expect("chain params mutated before a network was selected");
        mutate(params);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Current generation; incremented on every select and mutation.
    ///
    /// There is deliberately no way to clear a selection: once a profile
    /// is published the process keeps one for its whole lifetime, only
    /// ever replaced by another complete profile.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

/// Shared read guard over the active [`ChainParams`].
pub struct ActiveParams<'a> {
    guard: RwLockReadGuard<'a, Option<ChainParams>>,
}

impl Deref for ActiveParams<'_> {
    type Target = ChainParams;

    fn deref(&self) -> &ChainParams {
        self.guard.as_ref().expect("presence checked at construction")
    }
}

/// Selects `network` on the process-wide registry.
pub fn select_params(network: Network, overrides: &ActivationOverrides) -> Result<()> {
    CHAIN_PARAMS.select(network, overrides)
}

/// The process-wide active profile.
///
/// Panics if [`select_params`] has not been called.
pub fn active_params() -> ActiveParams<'static> {
    CHAIN_PARAMS.active()
}
