//! Application layer: the checkout flow and the status polling loop.
//!
//! `checkout` creates the payment, `polling` watches it through the
//! `scheduler`, which runs a job on a fixed tokio interval with serialized
//! ticks.

pub mod checkout;
pub mod polling;
pub mod scheduler;
