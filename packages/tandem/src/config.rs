//! Session configuration.

use crate::error::ConfigError;


/// Channel capacity used by [`Config::new`]
pub const DEFAULT_CHANNEL_CAPACITY: usize = 10;

/// Sizes of everything a [`Session`](crate::Session) allocates at startup
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Config {
    /// Number of requesters, with ids `0..requesters`
    pub requesters: usize,
    /// Number of servers, with ids `0..servers`
    pub servers: usize,
    /// Maximum number of messages buffered in the session's channel
    pub channel_capacity: usize,
}

impl Config {
    /// Construct with the given population sizes and the default channel capacity
    pub fn new(requesters: usize, servers: usize) -> Self {
        Config {
            requesters,
            servers,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Ownership-chaining setter for [`channel_capacity`](Self::channel_capacity)
    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    /// Check that every size is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.requesters == 0 {
            return Err(ConfigError::NoRequesters);
        }
        if self.servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        if self.channel_capacity == usize::MAX {
            return Err(ConfigError::ChannelCapacityTooLarge(self.channel_capacity));
        }
        Ok(())
    }
}
