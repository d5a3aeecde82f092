//! Status producers
//!
//! The session ticker asks a [`StatusSource`] for the next classification on
//! every tick. Today that is a weighted random draw; an inference pipeline
//! would plug in behind the same trait.

use super::status::PostureStatus;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Draw pool: Good is listed twice, so it carries half the weight
pub const STATUS_POOL: [PostureStatus; 4] = [
    PostureStatus::Good,
    PostureStatus::Good,
    PostureStatus::Warning,
    PostureStatus::Bad,
];

/// Produces posture classifications on demand
pub trait StatusSource: Send {
    fn next_status(&mut self) -> PostureStatus;
}

/// Uniform draw over [`STATUS_POOL`]
pub struct RandomStatusSource<R: Rng + Send = StdRng> {
    rng: R,
}

impl RandomStatusSource<StdRng> {
    /// Seed from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> RandomStatusSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> StatusSource for RandomStatusSource<R> {
    fn next_status(&mut self) -> PostureStatus {
        // The pool is a non-empty constant
        *STATUS_POOL
            .choose(&mut self.rng)
            .unwrap_or(&PostureStatus::Good)
    }
}

/// Replays a fixed list of statuses, then repeats the fallback
pub struct ScriptedStatusSource {
    script: VecDeque<PostureStatus>,
    fallback: PostureStatus,
}

impl ScriptedStatusSource {
    pub fn new(script: impl IntoIterator<Item = PostureStatus>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: PostureStatus::Good,
        }
    }

    pub fn with_fallback(mut self, fallback: PostureStatus) -> Self {
        self.fallback = fallback;
        self
    }
}

impl StatusSource for ScriptedStatusSource {
    fn next_status(&mut self) -> PostureStatus {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_converges() {
        let mut source = RandomStatusSource::seeded(7);
        let draws = 200_000;
        let (mut good, mut warning, mut bad) = (0usize, 0usize, 0usize);

        for _ in 0..draws {
            match source.next_status() {
                PostureStatus::Good => good += 1,
                PostureStatus::Warning => warning += 1,
                PostureStatus::Bad => bad += 1,
            }
        }

        let share = |n: usize| n as f64 / draws as f64;
        assert!((share(good) - 0.50).abs() < 0.01, "good share {}", share(good));
        assert!((share(warning) - 0.25).abs() < 0.01, "warning share {}", share(warning));
        assert!((share(bad) - 0.25).abs() < 0.01, "bad share {}", share(bad));
    }

    #[test]
    fn test_scripted_then_fallback() {
        let mut source = ScriptedStatusSource::new([PostureStatus::Bad, PostureStatus::Warning])
            .with_fallback(PostureStatus::Good);

        assert_eq!(source.next_status(), PostureStatus::Bad);
        assert_eq!(source.next_status(), PostureStatus::Warning);
        assert_eq!(source.next_status(), PostureStatus::Good);
        assert_eq!(source.next_status(), PostureStatus::Good);
    }
}
