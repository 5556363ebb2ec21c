//! Stack growth guard for deep recursion.
//!
//! Parsing and evaluating arbitrarily nested expressions recurse to the
//! depth of the input. Wrapping each recursive step in
//! [`ensure_sufficient_stack`] grows the stack on demand instead of
//! overflowing it.

/// Remaining stack below which we grow (64 KiB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each additional stack allocation (2 MiB).
const GROW_BY: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if the red zone has been reached.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}
