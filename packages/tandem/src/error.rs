//! Error types

use thiserror::Error;

pub use crate::channel::error::*;


/// Error for starting a session with an unusable [`Config`](crate::Config)
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ConfigError {
    /// The requester population is empty
    #[error("requester population must not be empty")]
    NoRequesters,
    /// The server population is empty
    #[error("server population must not be empty")]
    NoServers,
    /// The channel could never hold a message
    #[error("channel capacity must be non-zero")]
    ZeroChannelCapacity,
    /// The channel's ring needs `capacity + 1` slots, which overflows `usize`
    #[error("channel capacity {0} too large, capacity + 1 overflows usize")]
    ChannelCapacityTooLarge(usize),
}
