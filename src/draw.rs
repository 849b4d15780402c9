//! Draw engine: unique random subset with a staged reveal.
//!
//! The engine is a small explicit state machine. Each call to
//! [`DrawEngine::step`] samples until it finds a number not drawn yet and
//! reports the numbers so far in discovery order; the caller waits one
//! reveal interval before stepping again. Duplicates are resampled on the
//! spot, so they never cost a delay. Once `count` numbers are out, the next
//! step returns the sorted result.
//!
//! The engine assumes a validated config (`count <= max_number`); with a
//! too-small range the resample loop would never end.

use crate::config::DrawConfig;
use crate::rng::DrawRng;

/// What one engine step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawStep {
    /// A new distinct number was found. Numbers so far, discovery order.
    Revealed(Vec<u32>),
    /// All numbers are out. Sorted ascending.
    Complete(Vec<u32>),
}

/// State of one in-flight draw.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    count: u32,
    max_number: u32,
    picked: Vec<u32>,
    resamples: u64,
}

impl DrawEngine {
    pub fn new(count: u32, max_number: u32) -> Self {
        debug_assert!(count <= max_number, "draw of {count} from 1..={max_number} cannot finish");
        Self {
            count,
            max_number,
            picked: Vec::with_capacity(count as usize),
            resamples: 0,
        }
    }

    pub fn from_config(config: &DrawConfig) -> Self {
        Self::new(config.count, config.max_number)
    }

    /// Numbers drawn so far, discovery order.
    pub fn numbers(&self) -> &[u32] {
        &self.picked
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.picked.len() == self.count as usize
    }

    /// Candidates thrown away because they were already drawn.
    pub fn resamples(&self) -> u64 {
        self.resamples
    }

    /// Advance the draw by one reveal, or finish it.
    pub fn step(&mut self, rng: &mut DrawRng) -> DrawStep {
        if self.is_complete() {
            let mut sorted = self.picked.clone();
            sorted.sort_unstable();
            return DrawStep::Complete(sorted);
        }

        loop {
            let candidate = rng.pick(self.max_number);
            if !self.picked.contains(&candidate) {
                self.picked.push(candidate);
                log::debug!(
                    "Revealed {} ({}/{})",
                    candidate,
                    self.picked.len(),
                    self.count
                );
                return DrawStep::Revealed(self.picked.clone());
            }
            self.resamples += 1;
        }
    }
}

/// Run a whole draw without pacing. Returns the sorted numbers.
pub fn draw_numbers(count: u32, max_number: u32, rng: &mut DrawRng) -> Vec<u32> {
    let mut engine = DrawEngine::new(count, max_number);
    loop {
        if let DrawStep::Complete(numbers) = engine.step(rng) {
            return numbers;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid_draw(numbers: &[u32], count: u32, max_number: u32) {
        assert_eq!(numbers.len(), count as usize);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]), "not strictly ascending: {:?}", numbers);
        assert!(numbers.iter().all(|&n| n >= 1 && n <= max_number));
    }

    #[test]
    fn test_draw_terminates_with_distinct_sorted_numbers() {
        let mut rng = DrawRng::from_seed(42);
        for max_number in 1..=60 {
            for count in 1..=max_number {
                let numbers = draw_numbers(count, max_number, &mut rng);
                assert_valid_draw(&numbers, count, max_number);
            }
        }
        let numbers = draw_numbers(1, 100, &mut rng);
        assert_valid_draw(&numbers, 1, 100);
    }

    #[test]
    fn test_full_range_draw_is_permutation() {
        let mut rng = DrawRng::from_seed(9);
        let numbers = draw_numbers(30, 30, &mut rng);
        assert_eq!(numbers, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn test_incremental_emissions() {
        let mut rng = DrawRng::from_seed(1234);
        let mut engine = DrawEngine::new(6, 49);
        let mut emissions: Vec<Vec<u32>> = Vec::new();

        let sorted = loop {
            match engine.step(&mut rng) {
                DrawStep::Revealed(so_far) => emissions.push(so_far),
                DrawStep::Complete(numbers) => break numbers,
            }
        };

        assert_eq!(emissions.len(), 6);
        for (i, so_far) in emissions.iter().enumerate() {
            assert_eq!(so_far.len(), i + 1);
            // Each emission extends the previous one by exactly one new number
            if i > 0 {
                assert_eq!(&so_far[..i], emissions[i - 1].as_slice());
                assert!(!emissions[i - 1].contains(&so_far[i]));
            }
        }

        let mut last = emissions.last().unwrap().clone();
        last.sort_unstable();
        assert_eq!(sorted, last);
        assert_valid_draw(&sorted, 6, 49);
    }

    #[test]
    fn test_complete_is_stable() {
        let mut rng = DrawRng::from_seed(5);
        let mut engine = DrawEngine::new(3, 10);
        while !engine.is_complete() {
            engine.step(&mut rng);
        }
        let first = engine.step(&mut rng);
        let second = engine.step(&mut rng);
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_range_needs_resamples() {
        let mut rng = DrawRng::from_seed(77);
        let mut engine = DrawEngine::new(49, 49);
        while !engine.is_complete() {
            engine.step(&mut rng);
        }
        // Coupon collector: 49 picks from 49 values almost surely repeats
        assert!(engine.resamples() > 0);
        assert_eq!(engine.numbers().len(), 49);
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let a = draw_numbers(6, 49, &mut DrawRng::from_seed(2024));
        let b = draw_numbers(6, 49, &mut DrawRng::from_seed(2024));
        assert_eq!(a, b);
    }
}
