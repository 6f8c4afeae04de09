use std::any::type_name;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::{Error, Guarantees, HeldSlot, Result};

/// A container that holds either exactly one value of type `T` or nothing.
///
/// The value is stored inline, never on the heap. A `Holder<T>` is exactly as large as `T`
/// plus one alignment unit of `T` for the occupancy tag:
///
/// ```
/// use std::mem::{align_of, size_of};
///
/// use holder::Holder;
///
/// assert_eq!(size_of::<Holder<u32>>(), size_of::<u32>() + align_of::<u32>());
/// assert_eq!(size_of::<Holder<f64>>(), size_of::<f64>() + align_of::<f64>());
/// ```
///
/// If `T` has no drop glue, neither does `Holder<T>`. Otherwise the held value is dropped
/// exactly once, either by [`reset()`](Self::reset), by assignment over it or when the holder
/// itself is dropped.
///
/// # Accessing the value
///
/// Three families of accessors exist, differing in how they treat an empty holder:
///
/// * [`value()`](Self::value), [`value_mut()`](Self::value_mut),
///   [`into_value()`](Self::into_value) and [`Deref`]/[`DerefMut`] panic.
/// * [`try_value()`](Self::try_value), [`try_value_mut()`](Self::try_value_mut) and
///   [`try_into_value()`](Self::try_into_value) return [`Error::Empty`].
/// * [`value_unchecked()`](Self::value_unchecked) and
///   [`value_unchecked_mut()`](Self::value_unchecked_mut) are `unsafe` and skip the check in
///   release builds.
///
/// # Examples
///
/// ```
/// use holder::Holder;
///
/// let mut holder = Holder::<i32>::new();
/// assert!(!holder.has_value());
/// assert_eq!(holder.value_or(5), 5);
///
/// holder.assign(10);
/// assert!(holder.has_value());
/// assert_eq!(holder.value_or(5), 10);
///
/// holder.reset();
/// assert!(!holder.has_value());
/// ```
#[repr(transparent)]
pub struct Holder<T> {
    slot: HeldSlot<T>,
}

impl<T> Holder<T> {
    /// Creates an empty holder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: HeldSlot::new(),
        }
    }

    /// Creates a holder that owns `value`.
    #[must_use]
    pub const fn with_value(value: T) -> Self {
        Self {
            slot: HeldSlot::with_value(value),
        }
    }

    /// Creates a holder that owns a clone of `value`.
    #[must_use]
    pub fn cloned_from(value: &T) -> Self
    where
        T: Clone,
    {
        Self::with_value(value.clone())
    }

    /// Creates a holder by moving the value out of `source` in place.
    ///
    /// If `source` is occupied, its value is moved into the new holder and replaced by
    /// `T::default()`, the moved-from state. The source stays occupied. If `source` is empty,
    /// the new holder is empty too.
    ///
    /// Moving a `Holder` by value consumes it and is the usual way to transfer a value; this
    /// method exists for callers that must keep the source alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// let mut source = Holder::with_value(String::from("payload"));
    /// let target = Holder::move_from(&mut source);
    ///
    /// assert_eq!(target.value(), "payload");
    /// assert!(source.has_value());
    /// assert_eq!(source.value(), "");
    /// ```
    #[must_use]
    pub fn move_from(source: &mut Self) -> Self
    where
        T: Default,
    {
        let mut result = Self::new();

        if let Some(value) = source.slot.get_mut() {
            result.slot.construct(mem::take(value));
        }

        result
    }

    /// Whether the holder currently owns a value.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.slot.is_occupied()
    }

    /// Whether the holder is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.slot.is_occupied()
    }

    /// Returns a reference to the held value.
    ///
    /// # Panics
    ///
    /// Panics if the holder is empty.
    #[must_use]
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.slot.get() {
            Some(value) => value,
            None => empty_access::<T>(),
        }
    }

    /// Returns an exclusive reference to the held value.
    ///
    /// # Panics
    ///
    /// Panics if the holder is empty.
    #[must_use]
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match self.slot.get_mut() {
            Some(value) => value,
            None => empty_access::<T>(),
        }
    }

    /// Consumes the holder and returns the held value.
    ///
    /// # Panics
    ///
    /// Panics if the holder is empty.
    #[must_use]
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.slot.into_inner() {
            Some(value) => value,
            None => empty_access::<T>(),
        }
    }

    /// Returns a reference to the held value or [`Error::Empty`].
    pub fn try_value(&self) -> Result<&T> {
        self.slot.get().ok_or_else(empty_error::<T>)
    }

    /// Returns an exclusive reference to the held value or [`Error::Empty`].
    pub fn try_value_mut(&mut self) -> Result<&mut T> {
        self.slot.get_mut().ok_or_else(empty_error::<T>)
    }

    /// Consumes the holder and returns the held value or [`Error::Empty`].
    pub fn try_into_value(self) -> Result<T> {
        self.slot.into_inner().ok_or_else(empty_error::<T>)
    }

    /// Returns a reference to the held value without checking occupancy in release builds.
    ///
    /// # Safety
    ///
    /// The holder must be occupied. Debug builds panic if it is not.
    #[must_use]
    pub unsafe fn value_unchecked(&self) -> &T {
        // SAFETY: Forwarding the caller's guarantee that the holder is occupied.
        unsafe { self.slot.get_unchecked() }
    }

    /// Returns an exclusive reference to the held value without checking occupancy in
    /// release builds.
    ///
    /// # Safety
    ///
    /// The holder must be occupied. Debug builds panic if it is not.
    #[must_use]
    pub unsafe fn value_unchecked_mut(&mut self) -> &mut T {
        // SAFETY: Forwarding the caller's guarantee that the holder is occupied.
        unsafe { self.slot.get_unchecked_mut() }
    }

    /// Returns a clone of the held value, or `fallback` if the holder is empty.
    #[must_use]
    pub fn value_or(&self, fallback: T) -> T
    where
        T: Clone,
    {
        self.slot.get().map_or(fallback, T::clone)
    }

    /// Consumes the holder and returns the held value, or `fallback` if the holder is empty.
    #[must_use]
    pub fn into_value_or(self, fallback: T) -> T {
        self.slot.into_inner().unwrap_or(fallback)
    }

    /// Returns the held value as an `Option` of a reference.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Returns the held value as an `Option` of an exclusive reference.
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.get_mut()
    }

    /// Moves the held value out, leaving the holder empty. The value is not dropped.
    #[must_use]
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Drops the held value, if any, leaving the holder empty.
    ///
    /// Resetting an empty holder does nothing. If the drop of `T` panics, the holder is already
    /// empty when the panic propagates.
    pub fn reset(&mut self) {
        self.slot.destroy();
    }

    /// Stores `value` in the holder.
    ///
    /// An occupied holder assigns over its value in place, dropping the old value. An empty
    /// holder constructs the value in its storage.
    pub fn assign(&mut self, value: T) {
        match self.slot.get_mut() {
            Some(held) => *held = value,
            None => self.slot.construct(value),
        }
    }

    /// Stores a clone of `value` in the holder.
    ///
    /// An occupied holder uses [`Clone::clone_from`] on its value, which lets `T` reuse its
    /// resources. An empty holder constructs a clone in its storage.
    pub fn assign_cloned(&mut self, value: &T)
    where
        T: Clone,
    {
        match self.slot.get_mut() {
            Some(held) => held.clone_from(value),
            None => self.slot.construct(value.clone()),
        }
    }

    /// Replaces the contents of this holder with the contents of `other`.
    ///
    /// `other` is already an independent holder by the time this runs, so the exchange cannot
    /// observe a partially assigned state. The previous contents of `self` are dropped when
    /// `other` goes out of scope at the end of the call.
    pub fn assign_from(&mut self, mut other: Self) {
        swap(self, &mut other);
    }

    /// Exchanges the contents of two holders. See [`swap()`].
    pub fn swap_with(&mut self, other: &mut Self) {
        swap(self, other);
    }
}

impl<T: Guarantees> Holder<T> {
    /// [`reset()`](Self::reset) never panics.
    pub const NOTHROW_RESET: bool = T::NOTHROW_DESTRUCTIBLE;

    /// [`assign()`](Self::assign) never panics.
    pub const NOTHROW_ASSIGN: bool = T::NOTHROW_DESTRUCTIBLE;

    /// [`assign_cloned()`](Self::assign_cloned) never panics.
    pub const NOTHROW_ASSIGN_CLONED: bool =
        T::NOTHROW_CLONE_CONSTRUCTIBLE && T::NOTHROW_DESTRUCTIBLE;

    /// Cloning the holder never panics.
    pub const NOTHROW_CLONE: bool = T::NOTHROW_CLONE_CONSTRUCTIBLE;
}

impl<T> Holder<T> {
    /// [`swap()`] never panics, for any `T`. It only moves values and exchanges their bytes.
    pub const NOTHROW_SWAP: bool = true;
}

/// Exchanges the contents of two holders.
///
/// | `a` | `b` | Effect |
/// |---|---|---|
/// | occupied | occupied | the two values are swapped in place |
/// | occupied | empty | the value moves from `a` into `b`; `a` becomes empty |
/// | empty | occupied | the value moves from `b` into `a`; `b` becomes empty |
/// | empty | empty | nothing |
///
/// No value is dropped and no value is cloned.
///
/// # Examples
///
/// ```
/// use holder::{Holder, swap};
///
/// let mut a = Holder::with_value(1);
/// let mut b = Holder::new();
///
/// swap(&mut a, &mut b);
///
/// assert!(a.is_empty());
/// assert_eq!(*b.value(), 1);
/// ```
pub fn swap<T>(a: &mut Holder<T>, b: &mut Holder<T>) {
    if let (Some(a_value), Some(b_value)) = (a.slot.get_mut(), b.slot.get_mut()) {
        trace_swap::<T>("both occupied");

        mem::swap(a_value, b_value);
    } else if let Some(value) = a.slot.take() {
        trace_swap::<T>("first occupied");

        b.slot.construct(value);
    } else if let Some(value) = b.slot.take() {
        trace_swap::<T>("second occupied");

        a.slot.construct(value);
    } else {
        trace_swap::<T>("neither occupied");
    }
}

#[cfg_attr(test, mutants::skip)] // Only emits a trace event, which tests do not observe.
fn trace_swap<T>(case: &'static str) {
    trace!(held_type = type_name::<T>(), case, "swapping holders");
}

#[cold]
#[track_caller]
fn empty_access<T>() -> ! {
    panic!(
        "accessed the value of an empty Holder<{}>",
        type_name::<T>()
    );
}

fn empty_error<T>() -> Error {
    Error::Empty {
        type_name: type_name::<T>(),
    }
}

impl<T> Default for Holder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Holder<T> {
    fn clone(&self) -> Self {
        let mut result = Self::new();

        if let Some(value) = self.slot.get() {
            result.slot.construct(value.clone());
        }

        result
    }

    fn clone_from(&mut self, source: &Self) {
        let mut temporary = source.clone();
        swap(self, &mut temporary);
    }
}

impl<T: fmt::Debug> fmt::Debug for Holder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(value) => f.debug_tuple("Holder").field(value).finish(),
            None => f.write_str("Holder(<empty>)"),
        }
    }
}

impl<T: PartialEq> PartialEq for Holder<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot.get() == other.slot.get()
    }
}

impl<T: Eq> Eq for Holder<T> {}

/// Dereferences to the held value, panicking if the holder is empty.
///
/// Offered for every `T`, arithmetic or not. [`Guarantees::ARITHMETIC`] is a diagnostic query
/// only and never decides whether a holder exposes its value this way.
impl<T> Deref for Holder<T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &Self::Target {
        self.value()
    }
}

/// Mutably dereferences to the held value, panicking if the holder is empty.
///
/// Like [`Deref`], offered for every `T` regardless of [`Guarantees::ARITHMETIC`].
impl<T> DerefMut for Holder<T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value_mut()
    }
}

impl<T> From<T> for Holder<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T> From<Option<T>> for Holder<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::new, Self::with_value)
    }
}

impl<T> From<Holder<T>> for Option<T> {
    fn from(holder: Holder<T>) -> Self {
        holder.slot.into_inner()
    }
}

impl<T> From<&Holder<T>> for bool {
    fn from(holder: &Holder<T>) -> Self {
        holder.has_value()
    }
}

impl<T: Guarantees> Guarantees for Holder<T> {
    const NOTHROW_DESTRUCTIBLE: bool = T::NOTHROW_DESTRUCTIBLE;
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = Self::NOTHROW_CLONE;
}
