//! Set/reset latch built from two cross-coupled NOR gates.

use tracing::{event, Level};

use crate::component::Bistable;
use crate::components::gates::NorGate;
use crate::signal::Signal;

/// A pair of cross-coupled NORs settles in at most two passes; the extra
/// headroom only matters if the evaluation order is ever changed.
const MAX_SETTLE_PASSES: usize = 4;

/// `Q = NOR(R, NQ)`, `NQ = NOR(S, Q)`.
///
/// A fresh latch has both feedback inputs Low, so `Q` and `NQ` both read
/// High until the first setter runs. Every setter resynchronises in a fixed
/// order: `NQ` is fed into the `Q` gate first, then the new `Q` is fed into
/// the `NQ` gate, repeating until `NQ` stops changing. That order decides how
/// the latch leaves the `S = R = 1` condition: whichever input is released
/// first wins.
#[derive(Debug, Clone)]
pub struct SrLatch {
    nor_q: NorGate,
    nor_nq: NorGate,
}

impl SrLatch {
    pub fn new() -> Self {
        SrLatch {
            nor_q: NorGate::new(),
            nor_nq: NorGate::new(),
        }
    }

    fn resync(&mut self) {
        for _ in 0..MAX_SETTLE_PASSES {
            let before = self.nor_nq.output_q();
            self.nor_q.set_input_b(self.nor_nq.output_q().is_high());
            self.nor_nq.set_input_b(self.nor_q.output_q().is_high());
            if self.nor_nq.output_q() == before {
                return;
            }
        }
        event!(
            Level::WARN,
            "SR latch did not settle after {} passes (Q={}, NQ={})",
            MAX_SETTLE_PASSES,
            self.nor_q.output_q(),
            self.nor_nq.output_q()
        );
    }
}

impl Default for SrLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Bistable for SrLatch {
    fn set_input_s(&mut self, set: bool) {
        self.nor_nq.set_input_a(set);
        self.resync();
    }

    fn set_input_r(&mut self, reset: bool) {
        self.nor_q.set_input_a(reset);
        self.resync();
    }

    fn output_q(&self) -> Signal {
        self.nor_q.output_q()
    }

    fn output_nq(&self) -> Signal {
        self.nor_nq.output_q()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_latch_reads_both_high() {
        let latch = SrLatch::new();
        assert_eq!(latch.output_q(), Signal::High);
        assert_eq!(latch.output_nq(), Signal::High);
    }

    #[test]
    fn test_first_idle_resync_resolves_to_reset() {
        let mut latch = SrLatch::new();
        latch.set_input_r(false);
        assert_eq!(latch.output_q(), Signal::Low);
        assert_eq!(latch.output_nq(), Signal::High);
    }

    #[test]
    fn test_set_hold_reset_hold() {
        let mut latch = SrLatch::new();

        latch.set_input_s(true);
        assert_eq!(latch.output_q(), Signal::High);
        assert_eq!(latch.output_nq(), Signal::Low);

        latch.set_input_s(false);
        assert_eq!(latch.output_q(), Signal::High);
        assert_eq!(latch.output_nq(), Signal::Low);

        latch.set_input_r(true);
        assert_eq!(latch.output_q(), Signal::Low);
        assert_eq!(latch.output_nq(), Signal::High);

        latch.set_input_r(false);
        assert_eq!(latch.output_q(), Signal::Low);
        assert_eq!(latch.output_nq(), Signal::High);
    }

    #[test]
    fn test_set_and_reset_together_pull_both_low() {
        let mut latch = SrLatch::new();
        latch.set_input_s(true);
        latch.set_input_r(true);
        assert_eq!(latch.output_q(), Signal::Low);
        assert_eq!(latch.output_nq(), Signal::Low);
    }

    #[test]
    fn test_release_order_decides_the_outcome() {
        // Releasing S first leaves R asserted: the latch resets.
        let mut latch = SrLatch::new();
        latch.set_input_s(true);
        latch.set_input_r(true);
        latch.set_input_s(false);
        latch.set_input_r(false);
        assert_eq!(latch.output_q(), Signal::Low);
        assert_eq!(latch.output_nq(), Signal::High);

        // Releasing R first leaves S asserted: the latch sets.
        let mut latch = SrLatch::new();
        latch.set_input_s(true);
        latch.set_input_r(true);
        latch.set_input_r(false);
        latch.set_input_s(false);
        assert_eq!(latch.output_q(), Signal::High);
        assert_eq!(latch.output_nq(), Signal::Low);
    }
}
