// channel error types.

use std::fmt::{self, Formatter, Debug, Display};
use thiserror::Error;


/// Error for attempting to use a channel without blocking, and the operation not being able to
/// complete immediately
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("operation would block")]
pub struct WouldBlockError;

/// Error for trying to send into a full channel without blocking
///
/// Gives the message back to the caller.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TrySendError<T> {
    /// The message that could not be sent
    pub msg: T,
    /// The reason the message could not be sent
    pub cause: WouldBlockError,
}

impl<T> TrySendError<T> {
    /// Take back the message that could not be sent
    pub fn into_inner(self) -> T {
        self.msg
    }
}

// manual so that T need not be Debug.
impl<T> Debug for TrySendError<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("TrySendError")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl<T> Display for TrySendError<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "channel is full: {}", self.cause)
    }
}

impl<T> std::error::Error for TrySendError<T> {}
