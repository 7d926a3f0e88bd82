//! Single-slot mailbox with consume-and-reset reads.
//!
//! A `OneShot` holds at most one pending value. `set` overwrites whatever is
//! pending; `consume` hands the value out and puts the slot back to its
//! default, so each written value is observed by at most one reader. It is
//! a capacity-1 register, not a queue.
//!
//! The type itself takes `&mut self`; exclusivity across threads comes from
//! the lock of whoever owns it.

/// Capacity-1 register whose default value means "empty".
#[derive(Debug, Clone, Default)]
pub struct OneShot<T> {
    value: T,
}

impl<T: Copy + Default + PartialEq> OneShot<T> {
    pub fn new() -> Self {
        Self {
            value: T::default(),
        }
    }

    /// Store `value`, returning the pending value it replaced, if any.
    pub fn set(&mut self, value: T) -> Option<T> {
        let previous = std::mem::replace(&mut self.value, value);
        (previous != T::default()).then_some(previous)
    }

    /// Take the current value and reset the slot.
    pub fn consume(&mut self) -> T {
        std::mem::take(&mut self.value)
    }

    /// Current value without consuming it.
    pub fn peek(&self) -> T {
        self.value
    }

    pub fn is_pending(&self) -> bool {
        self.value != T::default()
    }

    /// Drop any pending value.
    pub fn reset(&mut self) {
        self.value = T::default();
    }
}
