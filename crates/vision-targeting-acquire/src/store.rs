//! Key-value telemetry store boundary.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Read side of the telemetry store the vision coprocessor publishes into.
///
/// Each call is an independent read: nothing ties two reads to the same
/// producer update, so a sequence of reads can observe a torn state.
pub trait TelemetryStore {
    /// Numeric value for `key`, or `default` when absent or not a number.
    fn get_f64(&self, key: &str, default: f64) -> f64;

    /// Numeric array for `key`, or `None` when absent or not an array.
    fn get_f64_array(&self, _key: &str) -> Option<Vec<f64>> {
        None
    }
}

impl<T: TelemetryStore + ?Sized> TelemetryStore for &T {
    fn get_f64(&self, key: &str, default: f64) -> f64 {
        (**self).get_f64(key, default)
    }

    fn get_f64_array(&self, key: &str) -> Option<Vec<f64>> {
        (**self).get_f64_array(key)
    }
}

impl<T: TelemetryStore + ?Sized> TelemetryStore for Arc<T> {
    fn get_f64(&self, key: &str, default: f64) -> f64 {
        (**self).get_f64(key, default)
    }

    fn get_f64_array(&self, key: &str) -> Option<Vec<f64>> {
        (**self).get_f64_array(key)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Entry {
    Number(f64),
    NumberArray(Vec<f64>),
}

/// In-process telemetry store.
///
/// Writers and readers may live on different threads. Every write touches a
/// single key, so a reader can observe a producer halfway through an update,
/// just like a networked store.
#[derive(Debug, Default)]
pub struct MemoryTelemetryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryTelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_f64(&self, key: impl Into<String>, value: f64) {
        self.write(key.into(), Entry::Number(value));
    }

    pub fn set_f64_array(&self, key: impl Into<String>, values: impl Into<Vec<f64>>) {
        self.write(key.into(), Entry::NumberArray(values.into()));
    }

    /// Remove `key`; returns whether it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn write(&self, key: String, entry: Entry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    fn read_entry(&self, key: &str) -> Option<Entry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl TelemetryStore for MemoryTelemetryStore {
    fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.read_entry(key) {
            Some(Entry::Number(v)) => v,
            _ => default,
        }
    }

    fn get_f64_array(&self, key: &str) -> Option<Vec<f64>> {
        match self.read_entry(key) {
            Some(Entry::NumberArray(v)) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_mistyped_keys_fall_back() {
        let store = MemoryTelemetryStore::new();
        assert_eq!(store.get_f64("limelight/tv", 0.0), 0.0);
        assert_eq!(store.get_f64_array("GRIP/area"), None);

        store.set_f64("n", 2.5);
        store.set_f64_array("a", vec![1.0, 2.0]);
        assert_eq!(store.get_f64("a", -1.0), -1.0);
        assert_eq!(store.get_f64_array("n"), None);
        assert_eq!(store.get_f64("n", -1.0), 2.5);
        assert_eq!(store.get_f64_array("a"), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn remove_and_overwrite() {
        let store = MemoryTelemetryStore::new();
        store.set_f64("k", 1.0);
        store.set_f64("k", 3.0);
        assert_eq!(store.get_f64("k", 0.0), 3.0);
        assert!(store.remove("k"));
        assert!(!store.remove("k"));
        assert!(!store.contains_key("k"));
    }

    #[test]
    fn shared_handles_read_through() {
        let store = Arc::new(MemoryTelemetryStore::new());
        let producer = Arc::clone(&store);
        std::thread::spawn(move || producer.set_f64("limelight/ta", 4.0))
            .join()
            .expect("producer thread");
        assert_eq!(store.get_f64("limelight/ta", 0.0), 4.0);
        let by_ref: &dyn TelemetryStore = &store;
        assert_eq!(by_ref.get_f64("limelight/ta", 0.0), 4.0);
    }
}
