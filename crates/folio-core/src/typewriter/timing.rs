use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Step delays for the type-and-erase loop, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterTiming {
    pub type_base_ms: u64,
    /// Upper bound (exclusive) of the random extra delay per typed character.
    pub type_jitter_ms: u64,
    pub erase_ms: u64,
    pub hold_ms: u64,
    pub between_lines_ms: u64,
    pub answer_start_ms: u64,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_base_ms: 55,
            type_jitter_ms: 45,
            erase_ms: 28,
            hold_ms: 1400,
            between_lines_ms: 350,
            answer_start_ms: 300,
        }
    }
}

impl TypewriterTiming {
    pub fn type_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter = if self.type_jitter_ms == 0 {
            0
        } else {
            rng.gen_range(0..self.type_jitter_ms)
        };
        Duration::from_millis(self.type_base_ms + jitter)
    }

    pub fn erase_delay(&self) -> Duration {
        Duration::from_millis(self.erase_ms)
    }

    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    /// Never zero so a loop over empty entries still yields to the scheduler.
    pub fn between_lines_delay(&self) -> Duration {
        Duration::from_millis(self.between_lines_ms.max(1))
    }

    pub fn answer_start_delay(&self) -> Duration {
        Duration::from_millis(self.answer_start_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn type_delay_stays_within_jitter_window() {
        let timing = TypewriterTiming::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let delay = timing.type_delay(&mut rng).as_millis() as u64;
            assert!(delay >= timing.type_base_ms);
            assert!(delay < timing.type_base_ms + timing.type_jitter_ms);
        }
    }

    #[test]
    fn zero_jitter_is_exact_and_between_lines_never_zero() {
        let timing = TypewriterTiming {
            type_jitter_ms: 0,
            between_lines_ms: 0,
            ..TypewriterTiming::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(timing.type_delay(&mut rng), Duration::from_millis(55));
        assert_eq!(timing.between_lines_delay(), Duration::from_millis(1));
    }
}
