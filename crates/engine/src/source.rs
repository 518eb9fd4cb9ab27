//! Numeric sources backing the `random()` function

use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng, rngs::StdRng};

pub trait NumericSource {
    /// Returns a value in `[0, 1)`.
    fn next_value(&self) -> f64;

    /// The seed a reproducible source was started from.
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Uniform source backed by `rand`, optionally seeded for reproducible runs.
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl RandomSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            seed: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericSource for RandomSource {
    fn next_value(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random::<f64>()
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Hands out the same value every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource(f64);

impl FixedSource {
    /// Returns `None` unless `value` lies in `[0, 1)`.
    pub fn new(value: f64) -> Option<Self> {
        (0.0..1.0).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl NumericSource for FixedSource {
    fn next_value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_in_unit_interval() {
        let source = RandomSource::new();
        assert_eq!(None, source.seed());
        for _ in 0..1000 {
            let value = source.next_value();
            assert!((0.0..1.0).contains(&value), "{value} escaped [0, 1)");
        }
    }

    #[test]
    fn seeds_reproduce() {
        let first = RandomSource::seeded(1234);
        let second = RandomSource::seeded(1234);
        assert_eq!(Some(1234), first.seed());
        let a = (0..10).map(|_| first.next_value()).collect::<Vec<_>>();
        let b = (0..10).map(|_| second.next_value()).collect::<Vec<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_source() {
        let source = FixedSource::new(0.25).unwrap();
        assert_eq!(0.25, source.value());
        assert_eq!(None, source.seed());
        assert_eq!(0.25, source.next_value());
        assert_eq!(0.25, source.next_value());
    }

    #[test]
    fn fixed_source_stays_in_unit_interval() {
        assert!(FixedSource::new(0.0).is_some());
        assert!(FixedSource::new(1.0).is_none());
        assert!(FixedSource::new(2.0).is_none());
        assert!(FixedSource::new(-0.5).is_none());
        assert!(FixedSource::new(f64::NAN).is_none());
    }
}
