//! Rendezvous shared types.

/// Numbered ticket around which a requester and a server meet
///
/// Request tickets and service tickets live in the same numbering space: both sequences start at
/// 1 and count upwards, so the n-th service ticket announced pairs with the n-th request ticket
/// issued. A requester and a server are matched when they hold tickets of equal value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ticket(pub u64);

impl Ticket {
    /// Numeric value of this ticket
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Index of a requester within the configured requester population
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RequesterId(pub usize);

/// Index of a server within the configured server population
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ServerId(pub usize);

/// Outcome of a server offering a ticket
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub enum Offer {
    /// The requester holding the offered ticket, now matched with the offering server
    Matched(RequesterId),
    /// Every requester has departed and none was waiting on the offered ticket
    ///
    /// The server will never be matched and should stop offering.
    NoRequestersRemain,
}

impl Offer {
    /// The matched requester, if any
    pub fn requester(self) -> Option<RequesterId> {
        match self {
            Offer::Matched(requester) => Some(requester),
            Offer::NoRequestersRemain => None,
        }
    }
}
