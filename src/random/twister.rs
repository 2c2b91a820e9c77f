use std::fmt::Debug;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Sub;

use anyhow::Result;
use anyhow::ensure;
use rand::Rng;
use rand::distr::uniform::SampleUniform;
use serde::Deserialize;
use serde::Serialize;

use super::mt64::Mt64;
use super::seed::SeedSource;
use super::seed::entropy_seed;
use super::seed::parse_seed_text;

/// Integer types the generator can sample.
pub trait RandomInteger:
    SampleUniform + PartialOrd + Copy + Debug + Sub<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
}

macro_rules! impl_random_integer {
    ($($t:ty),*) => {
        $(impl RandomInteger for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
        })*
    };
}

impl_random_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);

/// Floating point types the generator can sample.
pub trait RandomFloat:
    PartialOrd + Copy + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    /// Uniform in [0, 1) using as many engine bits as the mantissa holds.
    fn canonical(engine: &mut Mt64) -> Self;

    fn finite(self) -> bool;
}

impl RandomFloat for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn canonical(engine: &mut Mt64) -> Self {
        (engine.next() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn finite(self) -> bool {
        self.is_finite()
    }
}

impl RandomFloat for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn canonical(engine: &mut Mt64) -> Self {
        (engine.next() >> 40) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    fn finite(self) -> bool {
        self.is_finite()
    }
}

/// A seeded, reproducible random stream for gameplay.
///
/// Starts uninitialized. Every sampling method panics until one of the
/// `initialize*` methods has been called; use [`crate::random::library`]
/// for a non-panicking surface. Sampling takes `&mut self`, share a
/// generator between threads behind a lock.
///
/// Serialized field order is: initial seed, engine state, initialized flag.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MersenneTwister {
    initial_seed: i64,
    engine: Mt64,
    initialized: bool,
}

impl MersenneTwister {
    pub fn from_seed(seed: i64) -> Self {
        let mut out = Self::default();
        out.initialize(seed);
        out
    }

    pub fn from_str_seed(seed: &str) -> Self {
        let mut out = Self::default();
        out.initialize_from_str(seed);
        out
    }

    pub fn from_entropy() -> Self {
        let mut out = Self::default();
        out.initialize_from_entropy();
        out
    }

    /// Seed from the operating system. The drawn value becomes the initial
    /// seed so the stream can still be reset or logged.
    pub fn initialize_from_entropy(&mut self) {
        let seed = entropy_seed();
        self.initialize(seed as i64);
    }

    pub fn initialize(&mut self, seed: i64) {
        tracing::debug!("seeding mersenne twister with {seed}");
        self.initial_seed = seed;
        self.engine.seed(seed as u64);
        self.initialized = true;
    }

    /// Empty text seeds from entropy, numeric text seeds with the number and
    /// anything else seeds with a hash of the text.
    pub fn initialize_from_str(&mut self, seed: &str) {
        match parse_seed_text(seed) {
            SeedSource::Entropy => self.initialize_from_entropy(),
            SeedSource::Value(value) => self.initialize(value),
        }
    }

    pub fn generate_new_seed(&mut self) {
        self.initialize_from_entropy();
    }

    /// Rewind the stream to the state right after seeding.
    pub fn reset(&mut self) {
        self.engine.seed(self.initial_seed as u64);
    }

    pub fn initial_seed(&self) -> i64 {
        self.initial_seed
    }

    pub fn state_index(&self) -> usize {
        self.engine.index()
    }

    pub fn state(&self) -> &[u64] {
        self.engine.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) {
        assert!(
            self.initialized,
            "MersenneTwister sampled before it was initialized"
        );
    }

    /// Uniform integer in [min, max].
    pub fn random_range<T: RandomInteger>(&mut self, min: T, max: T) -> T {
        self.ensure_initialized();
        assert!(min <= max, "random_range: {min:?} > {max:?}");
        self.engine.random_range(min..=max)
    }

    /// Uniform float in [min, max).
    pub fn random_range_float<T: RandomFloat>(&mut self, min: T, max: T) -> T {
        self.ensure_initialized();
        assert!(min < max, "random_range_float: {min:?} >= {max:?}");
        let span = max - min;
        assert!(span.finite(), "random_range_float: span is not finite");
        loop {
            let value = min + span * T::canonical(&mut self.engine);
            // rounding can land exactly on max
            if value < max {
                return value;
            }
        }
    }

    /// Uniform integer in [0, n - 1].
    pub fn rand_helper<T: RandomInteger>(&mut self, n: T) -> T {
        assert!(n > T::ZERO, "rand_helper: {n:?} is not positive");
        self.random_range(T::ZERO, n - T::ONE)
    }

    /// Uniform in [0, 1).
    pub fn fraction<T: RandomFloat>(&mut self) -> T {
        self.random_range_float(T::ZERO, T::ONE)
    }

    pub fn random_bool(&mut self) -> bool {
        self.rand_helper(2u8) == 1
    }

    /// True with probability numerator / denominator.
    pub fn random_from_fraction<T: RandomInteger>(&mut self, numerator: T, denominator: T) -> bool {
        self.rand_helper(denominator) < numerator
    }

    /// [`Self::random_from_fraction`] with the arguments validated first.
    pub fn random_from_fraction_checked(&mut self, numerator: i32, denominator: i32) -> Result<bool> {
        ensure!(numerator >= 0, "numerator {numerator} is negative");
        ensure!(
            numerator <= denominator,
            "numerator {numerator} exceeds denominator {denominator}"
        );
        ensure!(denominator > 0, "denominator {denominator} is not positive");
        Ok(self.random_from_fraction(numerator, denominator))
    }

    /// Pick a uniformly random element. An empty slice yields `None` and a
    /// warning.
    pub fn random_element<'a, T>(&mut self, items: &'a [T]) -> Option<(usize, &'a T)> {
        if items.is_empty() {
            tracing::warn!("attempted to access random index from empty slice");
            return None;
        }
        let index = self.rand_helper(items.len());
        Some((index, &items[index]))
    }

    /// Fisher-Yates over the whole slice.
    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<()> {
        let end = items.len();
        self.shuffle_range(items, 0, end)
    }

    /// Fisher-Yates over `items[start..end]`, leaving the rest untouched.
    pub fn shuffle_range<T>(&mut self, items: &mut [T], start: usize, end: usize) -> Result<()> {
        ensure!(start < end, "shuffle start {start} is not before end {end}");
        ensure!(
            end <= items.len(),
            "shuffle end {end} is past the slice length {}",
            items.len()
        );
        self.ensure_initialized();
        for i in start..end - 1 {
            let j = self.random_range(i, end - 1);
            items.swap(i, j);
        }
        Ok(())
    }
}
