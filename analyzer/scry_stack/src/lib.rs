//! Stack safety for deep recursion.
//!
//! The analyzer recurses once per container level of its input, and real
//! data dumps nest arbitrarily deep, so descent through a pathological
//! document must not be able to blow the thread stack. Wrapping the
//! recursive step in [`ensure_sufficient_stack`] grows the stack on
//! demand instead.
//!
//! # Platform Support
//!
//! - **Native targets**: uses the `stacker` crate to grow the stack.
//! - **WASM targets**: no-op passthrough (WASM manages its own stack).
//!
//! # Configuration
//!
//! - **Red zone**: 100KB - if less than this remains, the stack grows.
//! - **Growth size**: 1MB per growth.
//!
//! Each analyzer frame is small, so these values comfortably cover inputs
//! nested far beyond anything a sane data dump contains.

/// Minimum stack space to keep available (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// Call at every container boundary of the descent; if the remaining
/// stack is inside the red zone the stack is grown before `f` runs.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
