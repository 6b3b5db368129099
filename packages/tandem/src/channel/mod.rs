// implementation of the bounded channel.
//
// the architecture is the classic producer/consumer one:
//
//       BoundedChannel
//          |
//          |------ Mutex<Ring<T>>: the ring is an externally-safe, not-itself-concurrent fixed
//          |       array of slots with a write cursor and a read cursor. one slot is always kept
//          |       free so that full and empty can be distinguished.
//          |
//          |------ not_empty: Condvar that receivers wait on. every successful send notifies it
//          |       once.
//          |
//          \------ not_full: Condvar that senders wait on. every successful receive notifies it
//                  once.
//
// cursors are only ever advanced by the thread holding the mutex, and every wait is in a loop
// that re-checks the condition, so spurious wakeups are harmless.
//
// the organization of these modules is as such:
//
//      ring<-------core: Wraps the ring in the mutex and condvars. The crate re-exports this
//                        publically.
//
// there is also the error module, which contains the relevant error types, which is also
// re-exported publically.

pub(crate) mod error;
pub(crate) mod core;

mod ring;
