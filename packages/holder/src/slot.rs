use std::any::type_name;
use std::hint::unreachable_unchecked;
use std::mem;

use tracing::trace;

/// Inline storage for at most one `T`.
///
/// The primitive representation fixes the layout to a one-byte occupancy tag followed by the
/// payload at the alignment of `T`, and forbids the compiler from hiding the tag in a niche of
/// `T`. The slot therefore occupies exactly `size_of::<T>() + align_of::<T>()` bytes.
///
/// The slot has no `Drop` impl of its own. Its drop glue is the drop glue of `T`, applied only
/// to the `Occupied` variant, so a slot for a trivially destructible `T` is itself trivially
/// destructible and a slot for any other `T` destroys its payload only when occupied.
#[repr(u8)]
pub(crate) enum HeldSlot<T> {
    Empty,
    Occupied(T),
}

impl<T> HeldSlot<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self::Empty
    }

    #[must_use]
    pub(crate) const fn with_value(value: T) -> Self {
        Self::Occupied(value)
    }

    #[must_use]
    pub(crate) const fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// Starts the life of a value in an empty slot.
    ///
    /// Every transition from empty to occupied on an existing slot goes through here.
    /// Calling this on an occupied slot is a defect in the caller; debug builds panic, release
    /// builds drop the previous value first.
    pub(crate) fn construct(&mut self, value: T) {
        debug_assert!(
            !self.is_occupied(),
            "value constructed into an occupied slot of {}",
            type_name::<T>()
        );

        trace!(held_type = type_name::<T>(), "constructing value in slot");

        *self = Self::Occupied(value);
    }

    /// Ends the life of the held value, if any. Does nothing for an empty slot.
    pub(crate) fn destroy(&mut self) {
        // The slot is empty before the value's drop runs, so a panicking drop
        // cannot leave a dead value marked as occupied.
        if let Self::Occupied(value) = mem::replace(self, Self::Empty) {
            trace!(held_type = type_name::<T>(), "destroying value in slot");

            drop(value);
        }
    }

    /// Moves the held value out, leaving the slot empty.
    #[must_use]
    pub(crate) fn take(&mut self) -> Option<T> {
        match mem::replace(self, Self::Empty) {
            Self::Occupied(value) => Some(value),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub(crate) fn into_inner(self) -> Option<T> {
        match self {
            Self::Occupied(value) => Some(value),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub(crate) const fn get(&self) -> Option<&T> {
        match self {
            Self::Occupied(value) => Some(value),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Occupied(value) => Some(value),
            Self::Empty => None,
        }
    }

    /// # Safety
    ///
    /// The slot must be occupied.
    #[must_use]
    pub(crate) unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(
            self.is_occupied(),
            "unchecked access to an empty slot of {}",
            type_name::<T>()
        );

        match self {
            Self::Occupied(value) => value,
            // SAFETY: The caller guarantees that the slot is occupied.
            Self::Empty => unsafe { unreachable_unchecked() },
        }
    }

    /// # Safety
    ///
    /// The slot must be occupied.
    #[must_use]
    pub(crate) unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(
            self.is_occupied(),
            "unchecked access to an empty slot of {}",
            type_name::<T>()
        );

        match self {
            Self::Occupied(value) => value,
            // SAFETY: The caller guarantees that the slot is occupied.
            Self::Empty => unsafe { unreachable_unchecked() },
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::mem::{align_of, needs_drop, size_of};
    use std::num::NonZero;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    use super::*;

    /// Counts how many times values of this type have been dropped.
    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl DropCounter {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let drops = Rc::new(Cell::new(0));
            (
                Self {
                    drops: Rc::clone(&drops),
                },
                drops,
            )
        }
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    struct PanicOnDrop {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for PanicOnDrop {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
            panic!("drop failed on purpose");
        }
    }

    #[test]
    fn layout_is_tag_plus_payload() {
        assert_eq!(size_of::<HeldSlot<u8>>(), 2);
        assert_eq!(size_of::<HeldSlot<u32>>(), 8);
        assert_eq!(size_of::<HeldSlot<f64>>(), 16);
        assert_eq!(size_of::<HeldSlot<()>>(), 1);

        assert_eq!(align_of::<HeldSlot<u32>>(), align_of::<u32>());
        assert_eq!(align_of::<HeldSlot<f64>>(), align_of::<f64>());
    }

    #[test]
    fn layout_ignores_niches() {
        assert_eq!(
            size_of::<HeldSlot<bool>>(),
            size_of::<bool>() + align_of::<bool>()
        );
        assert_eq!(
            size_of::<HeldSlot<NonZero<u32>>>(),
            size_of::<NonZero<u32>>() + align_of::<NonZero<u32>>()
        );
        assert_eq!(
            size_of::<HeldSlot<&u64>>(),
            size_of::<&u64>() + align_of::<&u64>()
        );
    }

    #[test]
    fn drop_glue_follows_payload() {
        assert!(!needs_drop::<HeldSlot<u64>>());
        assert!(needs_drop::<HeldSlot<String>>());
        assert!(needs_drop::<HeldSlot<DropCounter>>());
    }

    #[test]
    fn construct_then_destroy() {
        let (counter, drops) = DropCounter::new();
        let mut slot = HeldSlot::new();

        slot.construct(counter);
        assert!(slot.is_occupied());
        assert_eq!(drops.get(), 0);

        slot.destroy();
        assert!(!slot.is_occupied());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn destroy_empty_is_noop() {
        let mut slot = HeldSlot::<DropCounter>::new();

        slot.destroy();
        slot.destroy();

        assert!(!slot.is_occupied());
    }

    #[test]
    fn dropping_occupied_slot_drops_payload_once() {
        let (counter, drops) = DropCounter::new();

        drop(HeldSlot::with_value(counter));

        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn take_moves_out_without_dropping() {
        let (counter, drops) = DropCounter::new();
        let mut slot = HeldSlot::with_value(counter);

        let taken = slot.take();

        assert!(!slot.is_occupied());
        assert!(taken.is_some());
        assert_eq!(drops.get(), 0);

        drop(taken);
        drop(slot);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn panicking_drop_leaves_slot_empty() {
        let drops = Rc::new(Cell::new(0));
        let mut slot = HeldSlot::with_value(PanicOnDrop {
            drops: Rc::clone(&drops),
        });

        let result = catch_unwind(AssertUnwindSafe(|| slot.destroy()));

        assert!(result.is_err());
        assert!(!slot.is_occupied());

        // The slot must not drop the value a second time.
        drop(slot);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn unchecked_access_reads_payload() {
        let mut slot = HeldSlot::with_value(41_u32);

        // SAFETY: The slot was created occupied.
        unsafe {
            *slot.get_unchecked_mut() += 1;
        }

        // SAFETY: The slot was created occupied.
        let value = unsafe { *slot.get_unchecked() };
        assert_eq!(value, 42);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "occupied slot")]
    fn construct_into_occupied_panics_in_debug() {
        let mut slot = HeldSlot::with_value(1_u8);

        slot.construct(2);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "empty slot")]
    fn unchecked_access_to_empty_panics_in_debug() {
        let slot = HeldSlot::<u8>::new();

        // SAFETY: Not safe; debug assertions intercept the violation before it happens.
        let _value = unsafe { slot.get_unchecked() };
    }
}
