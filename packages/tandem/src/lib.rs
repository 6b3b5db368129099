//! Ticket rendezvous between a population of requester threads and a population of server
//! threads, plus a bounded blocking channel.
//!
//! Requesters and servers each draw numbered tickets and block until the other side presents the
//! same number. See [`Session`].

#[macro_use]
extern crate tracing;

mod channel;
mod rendezvous;
mod session;
pub mod config;
pub mod error;

pub use crate::{
    channel::core::BoundedChannel,
    config::Config,
    rendezvous::common::*,
    session::{Session, SessionReport},
};
