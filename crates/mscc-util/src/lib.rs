//! mscc-util — shared primitives for the MusicScript compiler.
//!
//! Holds the pieces every other crate in the workspace needs and none of
//! them should own individually: source spans, a string interner, and the
//! `Diagnostic` trait used to render any stage's error uniformly.

mod diagnostic;
mod span;
mod symbol;

pub use diagnostic::{render, Diagnostic};
pub use span::Span;
pub use symbol::{Interner, Symbol};
