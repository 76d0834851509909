//! Models bound to an intensity measure type, and a keyed store that builds
//! each of them at most once.

use crate::error::Result;
use crate::imt::Imt;
use crate::model::{check_value, ExceedanceModel};
use crate::sequence::{ArrayXySequence, XySequence};
use log::{debug, trace};
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

/// An [`ExceedanceModel`] with its intensity measure type fixed.
///
/// The imt ceiling is resolved on construction, so an unsupported imt is
/// reported once, here, rather than on every evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreparedModel {
    model: ExceedanceModel,
    imt: Imt,
    ceiling: Option<f64>,
}

impl PreparedModel {
    pub fn new(model: ExceedanceModel, imt: Imt) -> Result<Self> {
        let ceiling = model.ceiling(imt)?;
        debug!("Prepared {} for {} (log ceiling {:?})", model, imt, ceiling);
        Ok(Self {
            model,
            imt,
            ceiling,
        })
    }

    pub fn model(&self) -> ExceedanceModel {
        self.model
    }

    pub fn imt(&self) -> Imt {
        self.imt
    }

    /// Log ground motion ceiling, for models that have one.
    pub fn ceiling(&self) -> Option<f64> {
        self.ceiling
    }

    pub fn exceedance(&self, mean: f64, sigma: f64, n: f64, value: f64) -> Result<f64> {
        let kernel = self.model.bind(mean, sigma, n, self.ceiling)?;
        check_value(value)?;
        Ok(kernel.eval(value))
    }

    pub fn exceedance_curve<'a, S: XySequence + ?Sized>(
        &self,
        mean: f64,
        sigma: f64,
        n: f64,
        sequence: &'a mut S,
    ) -> Result<&'a mut S> {
        let kernel = self.model.bind(mean, sigma, n, self.ceiling)?;
        trace!("{}/{} curve over {} points", self.model, self.imt, sequence.len());
        kernel.fill(sequence)?;
        Ok(sequence)
    }

    pub fn par_exceedance_curve<'a>(
        &self,
        mean: f64,
        sigma: f64,
        n: f64,
        sequence: &'a mut ArrayXySequence,
    ) -> Result<&'a mut ArrayXySequence> {
        let kernel = self.model.bind(mean, sigma, n, self.ceiling)?;
        trace!(
            "{}/{} parallel curve over {} points",
            self.model,
            self.imt,
            sequence.len()
        );
        kernel.par_fill(sequence)?;
        Ok(sequence)
    }
}

type Slot<V> = Arc<OnceCell<Arc<V>>>;

/// A thread-safe store that constructs the value for each key at most once.
///
/// Construction happens outside the store lock, so building one key never
/// blocks lookups of another. A failed construction is not remembered: the
/// next request for that key tries again.
pub struct InstanceCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> Default for InstanceCache<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone, V> InstanceCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create<E, F>(&self, key: &K, init: F) -> std::result::Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> std::result::Result<V, E>,
    {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key.clone()).or_default())
        };
        slot.get_or_try_init(|| init(key).map(Arc::new))
            .map(Arc::clone)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of constructed values.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Prepared models keyed by model and intensity measure type.
#[derive(Default)]
pub struct ModelCache {
    cache: InstanceCache<(ExceedanceModel, Imt), PreparedModel>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, model: ExceedanceModel, imt: Imt) -> Result<Arc<PreparedModel>> {
        self.cache.get_or_create(&(model, imt), |&(model, imt)| {
            debug!("Creating cache entry for {}/{}", model, imt);
            PreparedModel::new(model, imt)
        })
    }

    /// Prepared instances of `model` for every imt in `imts`, failing on the
    /// first imt the model does not support.
    pub fn instances<I: IntoIterator<Item = Imt>>(
        &self,
        model: ExceedanceModel,
        imts: I,
    ) -> Result<BTreeMap<Imt, Arc<PreparedModel>>> {
        imts.into_iter()
            .map(|imt| Ok((imt, self.get_or_create(model, imt)?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
