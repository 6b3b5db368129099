// blocking bounded channel around a ring, a mutex, and two condvars.

use super::{
    error::*,
    ring::Ring,
};
use std::{
    fmt::{self, Formatter, Debug},
    sync::{Condvar, Mutex},
};


/// Fixed-capacity FIFO channel with blocking send and receive
///
/// Any number of threads may send and receive concurrently through a shared reference. Senders
/// block while the channel is full and receivers block while it is empty; neither ever busy-waits.
pub struct BoundedChannel<T> {
    // mutex around the buffered elements and both cursors.
    ring: Mutex<Ring<T>>,
    // notified once per successful send.
    not_empty: Condvar,
    // notified once per successful receive.
    not_full: Condvar,
}

impl<T> BoundedChannel<T> {
    /// Construct an empty channel able to buffer `capacity` messages
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        BoundedChannel {
            ring: Mutex::new(Ring::new(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Send a message, blocking while the channel is full
    pub fn send(&self, msg: T) {
        let mut lock = self.ring.lock().unwrap();
        while lock.is_full() {
            lock = self.not_full.wait(lock).unwrap();
        }
        if lock.push(msg).is_err() {
            unreachable!("ring full after wait (internal bug)");
        }
        trace!(len = lock.len(), "channel send");
        self.not_empty.notify_one();
    }

    /// Receive the oldest message, blocking while the channel is empty
    pub fn receive(&self) -> T {
        let mut lock = self.ring.lock().unwrap();
        loop {
            if let Some(msg) = lock.pop() {
                trace!(len = lock.len(), "channel receive");
                self.not_full.notify_one();
                return msg;
            }
            lock = self.not_empty.wait(lock).unwrap();
        }
    }

    /// Send a message if there is room for it right now
    ///
    /// Gives the message back in the error if the channel is full.
    pub fn try_send(&self, msg: T) -> Result<(), TrySendError<T>> {
        let mut lock = self.ring.lock().unwrap();
        lock.push(msg).map_err(|msg| TrySendError { msg, cause: WouldBlockError })?;
        self.not_empty.notify_one();
        Ok(())
    }

    /// Receive the oldest message if one is buffered right now
    pub fn try_receive(&self) -> Result<T, WouldBlockError> {
        let mut lock = self.ring.lock().unwrap();
        let msg = lock.pop().ok_or(WouldBlockError)?;
        self.not_full.notify_one();
        Ok(msg)
    }

    /// Number of currently buffered messages
    pub fn len(&self) -> usize {
        self.ring.lock().unwrap().len()
    }

    /// Whether no messages are currently buffered
    pub fn is_empty(&self) -> bool {
        self.ring.lock().unwrap().is_empty()
    }

    /// Maximum number of buffered messages
    pub fn capacity(&self) -> usize {
        self.ring.lock().unwrap().capacity()
    }
}

impl<T: Debug> Debug for BoundedChannel<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut d = f.debug_struct("BoundedChannel");
        match self.ring.try_lock() {
            Ok(ring) => d.field("buffered", &*ring),
            Err(_) => d.field("buffered", &"<locked>"),
        };
        d.finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::atomic::{AtomicUsize, Ordering::SeqCst},
        thread,
        time::Duration,
    };

    #[test]
    fn fourth_send_blocks_until_first_receive() {
        let channel = BoundedChannel::new(3);
        let sent = AtomicUsize::new(0);

        thread::scope(|s| {
            let sender = s.spawn(|| {
                for c in ['A', 'B', 'C', 'D'] {
                    channel.send(c);
                    sent.fetch_add(1, SeqCst);
                }
            });

            // give the sender plenty of time to fill the channel and block on the 4th send
            while sent.load(SeqCst) < 3 {
                thread::sleep(Duration::from_millis(1));
            }
            thread::sleep(Duration::from_millis(50));
            assert_eq!(sent.load(SeqCst), 3);
            assert_eq!(channel.len(), 3);

            assert_eq!(channel.receive(), 'A');
            sender.join().unwrap();
            assert_eq!(sent.load(SeqCst), 4);
        });

        assert_eq!(channel.receive(), 'B');
        assert_eq!(channel.receive(), 'C');
        assert_eq!(channel.receive(), 'D');
        assert!(channel.is_empty());
    }

    #[test]
    fn receive_blocks_until_send() {
        let channel = BoundedChannel::new(1);
        let received = AtomicUsize::new(0);

        thread::scope(|s| {
            let receiver = s.spawn(|| {
                let msg = channel.receive();
                received.fetch_add(1, SeqCst);
                msg
            });

            thread::sleep(Duration::from_millis(50));
            assert_eq!(received.load(SeqCst), 0);

            channel.send(7u32);
            assert_eq!(receiver.join().unwrap(), 7);
        });
    }

    #[test]
    fn try_operations_do_not_block() {
        let channel = BoundedChannel::new(2);
        assert_eq!(channel.try_receive(), Err(WouldBlockError));
        channel.try_send(1).unwrap();
        channel.try_send(2).unwrap();

        let err = channel.try_send(3).unwrap_err();
        assert_eq!(err.cause, WouldBlockError);
        assert_eq!(err.into_inner(), 3);

        assert_eq!(channel.try_receive(), Ok(1));
        assert_eq!(channel.try_receive(), Ok(2));
        assert_eq!(channel.try_receive(), Err(WouldBlockError));
        assert_eq!(channel.capacity(), 2);
    }

    #[test]
    fn basic_1000_test() {
        let channel = BoundedChannel::new(5);

        thread::scope(|s| {
            s.spawn(|| {
                for i in 1..=1000 {
                    channel.send(i);
                    if i % 100 == 0 {
                        thread::sleep(Duration::from_millis(5));
                    }
                }
            });
            s.spawn(|| {
                for i in 1..=1000 {
                    assert_eq!(channel.receive(), i);
                }
            });
        });

        assert!(channel.is_empty());
    }

    #[test]
    fn many_senders_many_receivers() {
        const SENDERS: usize = 4;
        const RECEIVERS: usize = 4;
        const PER_SENDER: usize = 500;

        let channel = BoundedChannel::new(3);

        let mut received = thread::scope(|s| {
            for sender in 0..SENDERS {
                let channel = &channel;
                s.spawn(move || {
                    for i in 0..PER_SENDER {
                        channel.send((sender, i));
                    }
                });
            }
            let receivers = (0..RECEIVERS)
                .map(|_| s.spawn(|| {
                    (0..SENDERS * PER_SENDER / RECEIVERS)
                        .map(|_| channel.receive())
                        .collect::<Vec<_>>()
                }))
                .collect::<Vec<_>>();
            receivers.into_iter()
                .map(|join| join.join().unwrap())
                .collect::<Vec<_>>()
        });

        // each receiver saw every sender's messages in the order that sender sent them
        for msgs in &received {
            for sender in 0..SENDERS {
                let seq = msgs.iter()
                    .filter(|&&(from, _)| from == sender)
                    .map(|&(_, i)| i)
                    .collect::<Vec<_>>();
                assert!(seq.windows(2).all(|w| w[0] < w[1]));
            }
        }

        // no message lost or duplicated
        let mut all = received.drain(..).flatten().collect::<Vec<_>>();
        all.sort();
        let expected = (0..SENDERS)
            .flat_map(|sender| (0..PER_SENDER).map(move |i| (sender, i)))
            .collect::<Vec<_>>();
        assert_eq!(all, expected);
        assert!(channel.is_empty());
    }
}
