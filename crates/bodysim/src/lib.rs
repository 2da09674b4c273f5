//! Direct-summation 2D body sandbox
//!
//! Bodies attract through gravity, interact through charge, link through
//! short-range springs, and either merge or bounce when they touch. One call
//! to [`step::step`] advances a [`store::BodyStore`] by one tick under an
//! immutable [`config::SimConfig`]. The [`protocol`] module carries the
//! request/response payload exchanged with a worker, and [`dispatch`] runs
//! steps off the caller's thread one at a time.

pub mod body;
pub mod boundary;
pub mod collisions;
pub mod config;
pub mod dispatch;
pub mod forces;
pub mod integrator;
pub mod protocol;
pub mod step;
pub mod store;

#[cfg(test)]
mod store_test;
