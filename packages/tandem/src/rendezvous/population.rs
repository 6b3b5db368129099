// tracking of which requesters are still active.
//
// this is not itself concurrent. it lives inside the rendezvous table's lockable state, so that
// servers deciding whether to wait and requesters departing are serialized by the same mutex.

use super::common::RequesterId;


pub(crate) struct Population {
    // departed[i] is true once requester i has departed.
    departed: Box<[bool]>,
    // number of false entries in departed.
    active: usize,
}

impl Population {
    // construct with every requester active.
    pub(crate) fn new(requesters: usize) -> Self {
        Population {
            departed: vec![false; requesters].into_boxed_slice(),
            active: requesters,
        }
    }

    // number of requesters which have not yet departed.
    pub(crate) fn active(&self) -> usize {
        self.active
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.active == 0
    }

    pub(crate) fn has_departed(&self, requester: RequesterId) -> bool {
        self.departed[requester.0]
    }

    // mark the requester as departed. returns whether that exhausted the population.
    //
    // panics if the requester already departed.
    pub(crate) fn depart(&mut self, requester: RequesterId) -> bool {
        assert!(
            !self.departed[requester.0],
            "requester {} departed more than once",
            requester.0,
        );
        debug_assert!(self.active > 0, "active requester count underflow (internal bug)");
        self.departed[requester.0] = true;
        self.active -= 1;
        self.active == 0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_exhaustion() {
        let mut population = Population::new(3);
        assert_eq!(population.active(), 3);
        assert!(!population.depart(RequesterId(1)));
        assert!(population.has_departed(RequesterId(1)));
        assert!(!population.has_departed(RequesterId(0)));
        assert!(!population.depart(RequesterId(0)));
        assert!(!population.is_exhausted());
        assert!(population.depart(RequesterId(2)));
        assert!(population.is_exhausted());
        assert_eq!(population.active(), 0);
    }

    #[test]
    fn empty_population_starts_exhausted() {
        assert!(Population::new(0).is_exhausted());
    }

    #[test]
    #[should_panic(expected = "requester 0 departed more than once")]
    fn double_depart_panics() {
        let mut population = Population::new(2);
        population.depart(RequesterId(0));
        population.depart(RequesterId(0));
    }
}
