//! Reusable observers for the amoeba simplex solver.
//!
//! This crate provides [`Observer`] implementations and the capability traits
//! they are written against, so the same observer can be reused by any solver
//! whose events and actions implement those traits.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for solver-agnostic observers
//!   ([`HasObjective`], [`HasSimplex`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Trace`] records the best vertex and objective of every iteration.
//! - [`StallGuard`] stops a solve that has not improved for a number of
//!   iterations.
//!
//! [`Observer`]: amoeba_core::Observer
//! [`HasObjective`]: traits::HasObjective
//! [`HasSimplex`]: traits::HasSimplex
//! [`CanStopEarly`]: traits::CanStopEarly

mod stall;
mod trace;
pub mod traits;

pub use stall::StallGuard;
pub use trace::{Trace, TracePoint};
