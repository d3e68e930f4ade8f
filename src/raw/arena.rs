use super::handle::Handle;

/// Slot storage owning every node of one tree.
///
/// A node lives exactly as long as its slot is occupied: `alloc` creates it
/// when a key is first inserted, `take`/`free` destroy it when the key is
/// removed, and dropping the arena drops every remaining node in one flat
/// pass regardless of how deep the tree was.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Sizes the arena for nodes that each carry at least `per_slot` entries,
    /// plus one spare slot for a root that may carry fewer.
    pub(crate) fn with_entry_capacity(entries: usize, per_slot: usize) -> Self {
        Self::with_capacity(entries.div_ceil(per_slot) + 1)
    }

    /// Entries that fit before reallocation when every slot but the root's
    /// carries `per_slot` of them.
    pub(crate) fn entry_capacity(&self, per_slot: usize) -> usize {
        self.capacity().saturating_sub(1).saturating_mul(per_slot)
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            handle
        } else {
            // Strictly below `Handle::MAX` so that a whole-tree weight still fits a `Size`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
