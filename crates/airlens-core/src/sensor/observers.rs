use thiserror::Error;

/// Physical upper bound on registered observers, whatever capacity the
/// caller asks for.
pub const MAX_OBSERVERS: usize = 10;

/// Callback notified once per successfully decoded frame.
///
/// The reading reference is only valid for the duration of the call; the
/// backing storage is reused on the next decode cycle, so observers that
/// need to keep a value must clone it.
pub trait Observer<T> {
    fn on_reading(&mut self, reading: &T);
}

impl<T, F: FnMut(&T)> Observer<T> for F {
    fn on_reading(&mut self, reading: &T) {
        self(reading)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("observer registry full: capacity {capacity}")]
pub struct RegistryFull {
    pub capacity: usize,
}

/// Bounded, insertion-ordered collection of observers.
///
/// Capacity is `min(requested, MAX_OBSERVERS)`, fixed at construction.
/// Registration beyond capacity is an explicit error rather than a silent
/// drop, so a misconfigured embedder finds out at registration time instead
/// of by missing notifications.
pub struct ObserverRegistry<T> {
    observers: Vec<Box<dyn Observer<T>>>,
    capacity: usize,
}

impl<T> ObserverRegistry<T> {
    pub fn new(requested: usize) -> Self {
        let capacity = requested.min(MAX_OBSERVERS);
        Self {
            observers: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn register(&mut self, observer: Box<dyn Observer<T>>) -> Result<(), RegistryFull> {
        if self.observers.len() >= self.capacity {
            return Err(RegistryFull {
                capacity: self.capacity,
            });
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Invoke every observer, in registration order, synchronously.
    /// Observer panics are not caught here; propagation is the caller's
    /// policy.
    pub fn notify(&mut self, reading: &T) {
        for observer in &mut self.observers {
            observer.on_reading(reading);
        }
    }
}

impl<T> std::fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.observers.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
