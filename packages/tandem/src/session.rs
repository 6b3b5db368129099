// session: owns the ticket allocator, rendezvous table, and channel for their whole lifetime.

use crate::{
    channel::core::BoundedChannel,
    config::Config,
    error::ConfigError,
    rendezvous::{
        common::*,
        tickets::TicketAllocator,
        table::RendezvousTable,
    },
};


/// Everything requesters, servers, and channel users share
///
/// Created with [`startup`](Self::startup), shared by reference between actor threads (for
/// example with [`std::thread::scope`] or an `Arc`), and released with
/// [`shutdown`](Self::shutdown). Since `shutdown` takes the session by value, it can only be
/// called once no actor can still be using it.
///
/// ```
/// use tandem::{Config, Offer, RequesterId, ServerId, Session};
/// use std::thread;
///
/// let session = Session::<()>::startup(&Config::new(1, 1)).unwrap();
/// thread::scope(|s| {
///     s.spawn(|| {
///         let ticket = session.allocate_request_ticket();
///         assert_eq!(session.request(RequesterId(0), ticket), ServerId(0));
///         session.depart(RequesterId(0));
///     });
///     s.spawn(|| loop {
///         let ticket = session.allocate_service_ticket();
///         if let Offer::NoRequestersRemain = session.offer(ServerId(0), ticket) {
///             break;
///         }
///     });
/// });
/// let report = session.shutdown();
/// assert_eq!(report.matches, 1);
/// assert_eq!(report.exhausted_offers, 1);
/// ```
pub struct Session<T> {
    config: Config,
    tickets: TicketAllocator,
    table: RendezvousTable,
    channel: BoundedChannel<T>,
}

/// Summary of a session, produced when it shuts down
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SessionReport {
    /// Request tickets allocated
    pub request_tickets_issued: u64,
    /// Service tickets allocated
    pub service_tickets_issued: u64,
    /// Requester/server pairs matched
    pub matches: u64,
    /// Offers that resolved to [`Offer::NoRequestersRemain`]
    pub exhausted_offers: u64,
    /// Requesters that never called [`Session::depart`]
    pub requesters_not_departed: usize,
    /// Messages still buffered in the channel, dropped with the session
    pub undelivered_messages: usize,
}

impl<T> Session<T> {
    /// Allocate every slot, counter, and synchronization primitive the config calls for
    pub fn startup(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session {
            config: *config,
            tickets: TicketAllocator::new(),
            table: RendezvousTable::new(config.requesters, config.servers),
            channel: BoundedChannel::new(config.channel_capacity),
        };
        debug!(
            requesters = config.requesters,
            servers = config.servers,
            channel_capacity = config.channel_capacity,
            "session started",
        );
        Ok(session)
    }

    /// The config this session was started with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue the next request ticket
    ///
    /// Request tickets count up from 1. Never blocks for longer than it takes another caller to
    /// be issued a ticket.
    pub fn allocate_request_ticket(&self) -> Ticket {
        self.tickets.allocate_request_ticket()
    }

    /// Issue the next service ticket
    ///
    /// Service tickets count up from 1, independently of request tickets, so that the n-th
    /// service ticket pairs with the n-th request ticket.
    pub fn allocate_service_ticket(&self) -> Ticket {
        self.tickets.allocate_service_ticket()
    }

    /// Block until a server offers `ticket`, and return that server
    ///
    /// Panics if `requester` is out of range, has already departed, or already has a pending
    /// request.
    pub fn request(&self, requester: RequesterId, ticket: Ticket) -> ServerId {
        self.table.request(requester, ticket)
    }

    /// Block until a requester requests `ticket`, or until every requester has departed
    ///
    /// Panics if `server` is out of range or already has a pending offer.
    pub fn offer(&self, server: ServerId, ticket: Ticket) -> Offer {
        self.table.offer(server, ticket)
    }

    /// Record that `requester` will make no further requests
    ///
    /// Once every requester has departed, all pending and future offers resolve to
    /// [`Offer::NoRequestersRemain`]. Panics if `requester` is out of range or already departed.
    pub fn depart(&self, requester: RequesterId) {
        self.table.depart(requester)
    }

    /// Number of requesters which have not yet departed
    pub fn remaining_requesters(&self) -> usize {
        self.table.remaining_requesters()
    }

    /// Send a message through the session's channel, blocking while it is full
    pub fn send(&self, msg: T) {
        self.channel.send(msg)
    }

    /// Receive a message from the session's channel, blocking while it is empty
    pub fn receive(&self) -> T {
        self.channel.receive()
    }

    /// The session's channel, for its non-blocking and inspection methods
    pub fn channel(&self) -> &BoundedChannel<T> {
        &self.channel
    }

    /// Release everything allocated at startup and summarize the session
    pub fn shutdown(self) -> SessionReport {
        let stats = self.table.stats();
        debug_assert!(stats.quiescent, "session shut down with an actor still in a rendezvous");
        let report = SessionReport {
            request_tickets_issued: self.tickets.request_tickets_issued(),
            service_tickets_issued: self.tickets.service_tickets_issued(),
            matches: stats.matches,
            exhausted_offers: stats.exhausted_offers,
            requesters_not_departed: stats.remaining_requesters,
            undelivered_messages: self.channel.len(),
        };
        if report.undelivered_messages > 0 {
            warn!(count = report.undelivered_messages, "dropping undelivered messages");
        }
        debug!(?report, "session shut down");
        report
    }
}
