use std::cell::{Cell, RefCell};
use std::mem;
use std::num::NonZero;
use std::rc::Rc;
use std::sync::Arc;

/// Declares which lifetime operations of a type are guaranteed never to panic.
///
/// Every constant has a default that is the conservative truth the compiler can prove on its
/// own, so `impl Guarantees for MyType {}` is always correct. Override a constant only to
/// declare a guarantee the type actually upholds.
///
/// | Constant | Default |
/// |---|---|
/// | [`NOTHROW_DESTRUCTIBLE`][Self::NOTHROW_DESTRUCTIBLE] | `true` only without drop glue |
/// | [`NOTHROW_CLONE_CONSTRUCTIBLE`][Self::NOTHROW_CLONE_CONSTRUCTIBLE] | `false`, cloning runs user code |
/// | [`ARITHMETIC`][Self::ARITHMETIC] | `false` |
///
/// Moving and swapping are not declared here. Both are bitwise copies in Rust and never run
/// user code, so [`is_nothrow_move_constructible()`] and [`is_nothrow_swappable()`] answer
/// `true` for every type without a declaration.
///
/// # Examples
///
/// ```
/// use holder::{Guarantees, is_nothrow_clone_constructible, is_nothrow_destructible};
///
/// #[derive(Clone)]
/// struct Celsius(f32);
///
/// impl Guarantees for Celsius {
///     const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
/// }
///
/// struct Connection;
///
/// impl Drop for Connection {
///     fn drop(&mut self) {
///         // Flushes buffers, which may fail.
///     }
/// }
///
/// impl Guarantees for Connection {}
///
/// assert!(is_nothrow_clone_constructible::<Celsius>());
/// assert!(is_nothrow_destructible::<Celsius>());
/// assert!(!is_nothrow_destructible::<Connection>());
/// ```
pub trait Guarantees: Sized {
    /// Dropping a value of this type never panics.
    const NOTHROW_DESTRUCTIBLE: bool = !mem::needs_drop::<Self>();

    /// Constructing a value of this type from a shared reference to another never panics.
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = false;

    /// The type is a primitive integer or floating-point type.
    ///
    /// This is a diagnostic only. Nothing in this crate changes behavior based on it; in
    /// particular, [`Holder`][crate::Holder] dereferences to its value for every `T`.
    const ARITHMETIC: bool = false;
}

/// Whether dropping a `T` performs no observable action and can be skipped entirely.
///
/// Like the move and swap queries, this one needs no declaration and works for any type.
#[must_use]
pub const fn is_trivially_destructible<T>() -> bool {
    !mem::needs_drop::<T>()
}

/// Whether dropping a `T` is guaranteed never to panic.
#[must_use]
pub const fn is_nothrow_destructible<T: Guarantees>() -> bool {
    T::NOTHROW_DESTRUCTIBLE
}

/// Whether constructing a `T` by consuming another `T` is guaranteed never to panic.
///
/// Always `true`: a move is a bitwise copy that runs no user code.
#[must_use]
pub const fn is_nothrow_move_constructible<T>() -> bool {
    true
}

/// Whether cloning a `T` is guaranteed never to panic.
#[must_use]
pub const fn is_nothrow_clone_constructible<T: Guarantees>() -> bool {
    T::NOTHROW_CLONE_CONSTRUCTIBLE
}

/// Whether exchanging two values of `T` is guaranteed never to panic.
///
/// Always `true`: [`mem::swap`] exchanges the bytes of the two values and runs no user code.
#[must_use]
pub const fn is_nothrow_swappable<T>() -> bool {
    true
}

/// Whether `T` is a primitive integer or floating-point type.
///
/// Diagnostic only, see [`Guarantees::ARITHMETIC`].
#[must_use]
pub const fn is_arithmetic<T: Guarantees>() -> bool {
    T::ARITHMETIC
}

macro_rules! arithmetic_guarantees {
    ($($t:ty),* $(,)?) => {
        $(
            impl Guarantees for $t {
                const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
                const ARITHMETIC: bool = true;
            }
        )*
    };
}

arithmetic_guarantees!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

// `NonZero<T>` only accepts primitive integers, which the standard library does not let us
// name as a bound, so each one is listed.
macro_rules! nonzero_guarantees {
    ($($t:ty),* $(,)?) => {
        $(
            impl Guarantees for NonZero<$t> {
                const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
            }
        )*
    };
}

nonzero_guarantees!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Guarantees for bool {
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

impl Guarantees for char {
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

impl Guarantees for () {
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

impl<T: ?Sized> Guarantees for &T {
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

// Cloning these allocates, and their drop runs the drop of every element.
impl Guarantees for String {}

impl<T> Guarantees for Vec<T> {}

impl<T: ?Sized> Guarantees for Box<T> {}

// Cloning only bumps the reference count, which aborts rather than panics on overflow. The last
// drop runs the drop of the shared value, so dropping keeps the conservative default.
impl<T: ?Sized> Guarantees for Rc<T> {
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

impl<T: ?Sized> Guarantees for Arc<T> {
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

// `Cell<T>` is only `Clone` when `T: Copy`, and copying cannot panic.
impl<T: Guarantees> Guarantees for Cell<T> {
    const NOTHROW_DESTRUCTIBLE: bool = T::NOTHROW_DESTRUCTIBLE;
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

// Cloning a `RefCell` panics if the value is mutably borrowed at the time.
impl<T: Guarantees> Guarantees for RefCell<T> {
    const NOTHROW_DESTRUCTIBLE: bool = T::NOTHROW_DESTRUCTIBLE;
}

impl<T: Guarantees> Guarantees for Option<T> {
    const NOTHROW_DESTRUCTIBLE: bool = T::NOTHROW_DESTRUCTIBLE;
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = T::NOTHROW_CLONE_CONSTRUCTIBLE;
}

// An empty array holds nothing to drop or clone.
impl<T: Guarantees, const N: usize> Guarantees for [T; N] {
    const NOTHROW_DESTRUCTIBLE: bool = N == 0 || T::NOTHROW_DESTRUCTIBLE;
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = N == 0 || T::NOTHROW_CLONE_CONSTRUCTIBLE;
}

macro_rules! tuple_guarantees {
    ($($t:ident),+) => {
        impl<$($t: Guarantees),+> Guarantees for ($($t,)+) {
            const NOTHROW_DESTRUCTIBLE: bool = $($t::NOTHROW_DESTRUCTIBLE)&&+;
            const NOTHROW_CLONE_CONSTRUCTIBLE: bool = $($t::NOTHROW_CLONE_CONSTRUCTIBLE)&&+;
        }
    };
}

tuple_guarantees!(A);
tuple_guarantees!(A, B);
tuple_guarantees!(A, B, C);
tuple_guarantees!(A, B, C, D);
tuple_guarantees!(A, B, C, D, E);
tuple_guarantees!(A, B, C, D, E, F);
tuple_guarantees!(A, B, C, D, E, F, G);
tuple_guarantees!(A, B, C, D, E, F, G, H);
tuple_guarantees!(A, B, C, D, E, F, G, H, I);
tuple_guarantees!(A, B, C, D, E, F, G, H, I, J);
tuple_guarantees!(A, B, C, D, E, F, G, H, I, J, K);
tuple_guarantees!(A, B, C, D, E, F, G, H, I, J, K, L);
