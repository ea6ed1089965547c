//! Seams between the pure planner and the world around it.
//!
//! Nothing here depends on the planner's own types: the label lookup works on
//! string keys, the schedule store is generic over the document it persists,
//! and the clock only hands out `SystemTime`.

pub mod clock;

pub use clock::{FixedClock, SystemClock, WallClock};

/// Resolves a channel label key (e.g. `growth_pump_nutrient_a`) into display text.
///
/// Implementations must be deterministic and side-effect free; the planner
/// may call `resolve` any number of times for the same key.
pub trait NameResolver {
    fn resolve(&self, key: &str) -> String;
}

/// Identity resolver: the label is the key itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyResolver;

impl NameResolver for KeyResolver {
    fn resolve(&self, key: &str) -> String {
        key.to_string()
    }
}

impl<F> NameResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, key: &str) -> String {
        self(key)
    }
}

/// Persistence boundary for a schedule document owned by someone else
/// (a device, a file, a test double).
///
/// `load` returns `Ok(None)` when nothing has been stored yet. Read-modify-write
/// is the caller's job.
pub trait ScheduleStore<D> {
    fn load(&mut self) -> Result<Option<D>, Box<dyn std::error::Error + Send + Sync>>;
    fn save(&mut self, doc: &D) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// In-memory store, mostly for tests.
#[derive(Debug, Clone)]
pub struct MemoryStore<D> {
    pub doc: Option<D>,
    pub saves: usize,
}

impl<D> Default for MemoryStore<D> {
    fn default() -> Self {
        Self { doc: None, saves: 0 }
    }
}

impl<D: Clone> ScheduleStore<D> for MemoryStore<D> {
    fn load(&mut self) -> Result<Option<D>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.doc.clone())
    }

    fn save(&mut self, doc: &D) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.doc = Some(doc.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_and_identity_resolve() {
        let upper = |k: &str| k.to_uppercase();
        assert_eq!(upper.resolve("ph"), "PH");
        assert_eq!(KeyResolver.resolve("growth_pump_ph_plus"), "growth_pump_ph_plus");
    }

    #[test]
    fn memory_store_round_trips_and_counts_saves() {
        let mut store = MemoryStore::<Vec<u8>>::default();
        assert!(store.load().unwrap().is_none());
        store.save(&vec![1, 2, 3]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(store.saves, 1);
    }
}
