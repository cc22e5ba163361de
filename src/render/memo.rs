/// Caches one value for as long as its dependencies compare equal.
///
/// Hooks use this to hand out the same callable on every render until one of
/// the inputs it closes over changes.
#[derive(Debug)]
pub struct Memo<D, V> {
    slot: Option<(D, V)>,
}

impl<D, V> Default for Memo<D, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<D: PartialEq, V: Clone> Memo<D, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value when `deps` equals the previous dependencies,
    /// otherwise builds, caches and returns a new one.
    pub fn get_or_update(&mut self, deps: D, build: impl FnOnce() -> V) -> V {
        match &self.slot {
            Some((cached, value)) if *cached == deps => value.clone(),
            _ => {
                let value = build();
                self.slot = Some((deps, value.clone()));
                value
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
