use super::common::Ticket;
use std::sync::Mutex;


/// Utility for issuing request and service tickets concurrently.
///
/// The two counters are unrelated sequences and share no lock.
pub(crate) struct TicketAllocator {
    // last request ticket issued, or 0.
    request: Mutex<u64>,
    // last service ticket issued, or 0.
    service: Mutex<u64>,
}

impl TicketAllocator {
    pub(crate) fn new() -> Self {
        TicketAllocator {
            request: Mutex::new(0),
            service: Mutex::new(0),
        }
    }

    pub(crate) fn allocate_request_ticket(&self) -> Ticket {
        let ticket = next(&self.request);
        trace!(ticket = ticket.0, "allocated request ticket");
        ticket
    }

    pub(crate) fn allocate_service_ticket(&self) -> Ticket {
        let ticket = next(&self.service);
        trace!(ticket = ticket.0, "allocated service ticket");
        ticket
    }

    // number of request tickets issued so far.
    pub(crate) fn request_tickets_issued(&self) -> u64 {
        *self.request.lock().unwrap()
    }

    // number of service tickets issued so far.
    pub(crate) fn service_tickets_issued(&self) -> u64 {
        *self.service.lock().unwrap()
    }
}

// increment the counter and return the new value as a ticket.
fn next(counter: &Mutex<u64>) -> Ticket {
    let mut lock = counter.lock().unwrap();
    // panic safety: issuing a ticket every nanosecond, it would take over 500 years to overflow
    assert!(*lock < u64::MAX, "ticket counter overflowed");
    *lock += 1;
    Ticket(*lock)
}
