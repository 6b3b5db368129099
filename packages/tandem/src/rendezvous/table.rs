// the rendezvous table: matching engine between requesters and servers.

use super::{
    common::*,
    population::Population,
};
use std::{
    mem::replace,
    sync::{Condvar, Mutex, MutexGuard},
};


// state of a requester's slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum RequesterSlot {
    // no pending request.
    Idle,
    // blocked in `request` with this ticket, no server has claimed it yet.
    Waiting(Ticket),
    // a server claimed the ticket. the requester resets the slot to idle once it wakes.
    Matched(ServerId),
}

// state of a server's slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ServerSlot {
    // no pending offer.
    Idle,
    // blocked in `offer` with this ticket, no requester has claimed it yet.
    Offering(Ticket),
    // a requester claimed the ticket. the server resets the slot to idle once it wakes.
    Matched(RequesterId),
}

// table lockable state.
//
// invariants:
//
// - a slot is only ever Waiting / Offering while its owner is blocked in request / offer.
// - only the second party of a match writes Matched, and only into a Waiting / Offering slot.
// - only the slot's owner resets Matched to Idle, exactly once per match.
struct Lockable {
    requesters: Box<[RequesterSlot]>,
    servers: Box<[ServerSlot]>,
    population: Population,
    // number of matches completed.
    matches: u64,
    // number of offers that resolved to NoRequestersRemain.
    exhausted_offers: u64,
}

impl Lockable {
    // find a server currently offering the ticket.
    fn find_offering(&self, ticket: Ticket) -> Option<ServerId> {
        self.servers.iter()
            .position(|&slot| slot == ServerSlot::Offering(ticket))
            .map(ServerId)
    }

    // find a requester currently waiting with the ticket.
    fn find_waiting(&self, ticket: Ticket) -> Option<RequesterId> {
        self.requesters.iter()
            .position(|&slot| slot == RequesterSlot::Waiting(ticket))
            .map(RequesterId)
    }
}

/// Counters readable from a rendezvous table at any time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct TableStats {
    pub(crate) matches: u64,
    pub(crate) exhausted_offers: u64,
    pub(crate) remaining_requesters: usize,
    // whether no actor is currently blocked in the table.
    pub(crate) quiescent: bool,
}

/// Matching engine between a fixed requester population and a fixed server population.
///
/// One mutex serializes every slot access and match decision. Each slot has its own condvar, so
/// a match only wakes the one actor it concerns.
pub(crate) struct RendezvousTable {
    lockable: Mutex<Lockable>,
    requester_conds: Box<[Condvar]>,
    server_conds: Box<[Condvar]>,
}

impl RendezvousTable {
    pub(crate) fn new(requesters: usize, servers: usize) -> Self {
        RendezvousTable {
            lockable: Mutex::new(Lockable {
                requesters: vec![RequesterSlot::Idle; requesters].into_boxed_slice(),
                servers: vec![ServerSlot::Idle; servers].into_boxed_slice(),
                population: Population::new(requesters),
                matches: 0,
                exhausted_offers: 0,
            }),
            requester_conds: (0..requesters).map(|_| Condvar::new()).collect(),
            server_conds: (0..servers).map(|_| Condvar::new()).collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Lockable> {
        self.lockable.lock().unwrap()
    }

    fn check_requester(&self, requester: RequesterId) {
        assert!(
            requester.0 < self.requester_conds.len(),
            "requester id {} out of range (population of {})",
            requester.0,
            self.requester_conds.len(),
        );
    }

    fn check_server(&self, server: ServerId) {
        assert!(
            server.0 < self.server_conds.len(),
            "server id {} out of range (population of {})",
            server.0,
            self.server_conds.len(),
        );
    }

    // register the requester's ticket and block until a server offering the same ticket claims
    // it. returns the matched server.
    pub(crate) fn request(&self, requester: RequesterId, ticket: Ticket) -> ServerId {
        self.check_requester(requester);
        let i = requester.0;
        let mut lock = self.lock();
        assert!(
            !lock.population.has_departed(requester),
            "requester {} requested after departing",
            i,
        );
        assert!(
            lock.requesters[i] == RequesterSlot::Idle,
            "requester {} already has a pending request",
            i,
        );

        // a server may already be waiting on this ticket
        if let Some(server) = lock.find_offering(ticket) {
            lock.servers[server.0] = ServerSlot::Matched(requester);
            lock.matches += 1;
            trace!(requester = i, server = server.0, ticket = ticket.0, "requester claimed offer");
            self.server_conds[server.0].notify_one();
            return server;
        }

        // otherwise, wait for a server to claim us
        lock.requesters[i] = RequesterSlot::Waiting(ticket);
        trace!(requester = i, ticket = ticket.0, "requester waiting");
        while let RequesterSlot::Waiting(_) = lock.requesters[i] {
            lock = self.requester_conds[i].wait(lock).unwrap();
        }
        match replace(&mut lock.requesters[i], RequesterSlot::Idle) {
            RequesterSlot::Matched(server) => server,
            slot => unreachable!("requester {} woke to slot {:?} (internal bug)", i, slot),
        }
    }

    // register the server's ticket and block until a requester waiting with the same ticket is
    // claimed, or until no requesters remain.
    pub(crate) fn offer(&self, server: ServerId, ticket: Ticket) -> Offer {
        self.check_server(server);
        let j = server.0;
        let mut lock = self.lock();
        assert!(
            lock.servers[j] == ServerSlot::Idle,
            "server {} already has a pending offer",
            j,
        );

        // a requester may already be waiting on this ticket
        if let Some(requester) = lock.find_waiting(ticket) {
            lock.requesters[requester.0] = RequesterSlot::Matched(server);
            lock.matches += 1;
            trace!(requester = requester.0, server = j, ticket = ticket.0, "server claimed request");
            self.requester_conds[requester.0].notify_one();
            return Offer::Matched(requester);
        }

        // no point waiting if nobody can ever claim us
        if lock.population.is_exhausted() {
            lock.exhausted_offers += 1;
            debug!(server = j, ticket = ticket.0, "offer found no requesters remaining");
            return Offer::NoRequestersRemain;
        }

        // otherwise, wait for a requester to claim us or for the population to run out
        lock.servers[j] = ServerSlot::Offering(ticket);
        trace!(server = j, ticket = ticket.0, "server offering");
        while let ServerSlot::Offering(_) = lock.servers[j] {
            if lock.population.is_exhausted() {
                break;
            }
            lock = self.server_conds[j].wait(lock).unwrap();
        }
        match replace(&mut lock.servers[j], ServerSlot::Idle) {
            ServerSlot::Matched(requester) => Offer::Matched(requester),
            ServerSlot::Offering(_) => {
                lock.exhausted_offers += 1;
                debug!(server = j, ticket = ticket.0, "offer abandoned, no requesters remain");
                Offer::NoRequestersRemain
            }
            ServerSlot::Idle => unreachable!("server {} woke to idle slot (internal bug)", j),
        }
    }

    // mark the requester as departed. once the last requester departs, every waiting server is
    // woken.
    pub(crate) fn depart(&self, requester: RequesterId) {
        self.check_requester(requester);
        let i = requester.0;
        let mut lock = self.lock();
        assert!(
            !matches!(lock.requesters[i], RequesterSlot::Waiting(_)),
            "requester {} departed with a pending request",
            i,
        );
        let exhausted = lock.population.depart(requester);
        trace!(requester = i, remaining = lock.population.active(), "requester departed");
        if exhausted {
            debug!(servers = self.server_conds.len(), "no requesters remain, waking servers");
            for cond in self.server_conds.iter() {
                cond.notify_all();
            }
        }
    }

    pub(crate) fn remaining_requesters(&self) -> usize {
        self.lock().population.active()
    }

    pub(crate) fn stats(&self) -> TableStats {
        let lock = self.lock();
        TableStats {
            matches: lock.matches,
            exhausted_offers: lock.exhausted_offers,
            remaining_requesters: lock.population.active(),
            quiescent: lock.requesters.iter().all(|&slot| slot == RequesterSlot::Idle)
                && lock.servers.iter().all(|&slot| slot == ServerSlot::Idle),
        }
    }
}
