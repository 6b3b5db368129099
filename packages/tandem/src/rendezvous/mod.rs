// implementation of the ticket rendezvous.
//
// requesters and servers meet around numbered tickets:
//
//      requester i                                   server j
//      -----------                                   --------
//      t = allocate_request_ticket()                 t = allocate_service_ticket()
//      request(i, t) ----\                     /---- offer(j, t)
//                         v                   v
//                   RendezvousTable: Mutex<Lockable>
//                         |
//                         |------ one slot per requester: Idle | Waiting(t) | Matched(j)
//                         |------ one slot per server:    Idle | Offering(t) | Matched(i)
//                         \------ Population: which requesters have departed
//
// whichever party arrives second scans the other population's slots for its ticket, writes
// Matched into the first party's slot, and notifies that party's condvar. the first party wakes,
// resets its own slot to Idle, and returns. thus a match is decided entirely under the table's
// mutex, and each slot is cleared exactly once, by its owner.
//
// servers also stop waiting once every requester has departed. the active requester count lives
// under the same mutex as the slots, and the final departure notifies every server condvar, so a
// server can never check the count, then miss the departure, then sleep forever.
//
// the organization of these modules is as such:
//
//      common: Ticket, RequesterId, ServerId, Offer. Re-exported publically.
//
//      tickets: The ticket allocator. Two counters, each under its own mutex.
//
//      population<-------table: The matching engine.

pub(crate) mod common;
pub(crate) mod tickets;
pub(crate) mod table;

mod population;
