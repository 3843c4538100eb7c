//! Emitter error type.
//!
//! The emitter is a pure text transform over an already-optimized quadruple
//! list; nothing about it can fail given well-formed input, but the type
//! exists so the driver can treat every stage uniformly.

use mscc_util::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {}

impl Diagnostic for EmitError {
    fn line(&self) -> u32 {
        match *self {}
    }

    fn message(&self) -> String {
        match *self {}
    }
}
