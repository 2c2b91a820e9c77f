use std::fmt;

use rand::RngCore;
use rand::rand_core::impls::fill_bytes_via_next;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error;
use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::ser::SerializeTuple;

/// Number of 64-bit words in the engine state.
pub const STATE_SIZE: usize = 312;
const SHIFT_SIZE: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
const LOWER_MASK: u64 = 0x7FFF_FFFF;
const INIT_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Seed used by the reference implementation when none is given.
pub const DEFAULT_SEED: u64 = 5489;

/// MT19937-64, the 64-bit Mersenne Twister of Matsumoto and Nishimura.
/// Output is bit-identical to the reference generator for the same seed.
///
/// NOT a CSPRNG
#[derive(Clone, PartialEq, Eq)]
pub struct Mt64 {
    state: [u64; STATE_SIZE],
    index: usize,
}

impl Mt64 {
    pub fn new(seed: u64) -> Self {
        let mut out = Self {
            state: [0; STATE_SIZE],
            index: STATE_SIZE,
        };
        out.seed(seed);
        out
    }

    pub fn seed(&mut self, seed: u64) {
        self.state[0] = seed;
        for i in 1..STATE_SIZE {
            let prev = self.state[i - 1];
            self.state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }
        // the first draw after seeding regenerates the whole block
        self.index = STATE_SIZE;
    }

    /// Position of the next word to be tempered, in `0..=STATE_SIZE`.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> &[u64; STATE_SIZE] {
        &self.state
    }

    pub fn next(&mut self) -> u64 {
        if self.index >= STATE_SIZE {
            self.twist();
        }
        let mut x = self.state[self.index];
        self.index += 1;

        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
        x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
        x ^= x >> 43;
        x
    }

    pub fn discard(&mut self, count: u64) {
        for _ in 0..count {
            self.next();
        }
    }

    fn twist(&mut self) {
        for i in 0..STATE_SIZE {
            let x = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % STATE_SIZE] & LOWER_MASK);
            let mut x_a = x >> 1;
            if x & 1 != 0 {
                x_a ^= MATRIX_A;
            }
            self.state[i] = self.state[(i + SHIFT_SIZE) % STATE_SIZE] ^ x_a;
        }
        self.index = 0;
    }
}

impl Default for Mt64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl fmt::Debug for Mt64 {
    // 312 words is too much noise in logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mt64")
            .field("index", &self.index)
            .field("head", &self.state[0])
            .finish_non_exhaustive()
    }
}

impl RngCore for Mt64 {
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        fill_bytes_via_next(self, dst);
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }
}

/// Serialized as a fixed length tuple: every state word in order, then the
/// cursor. No length prefix is written.
impl Serialize for Mt64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(STATE_SIZE + 1)?;
        for word in &self.state {
            tuple.serialize_element(word)?;
        }
        tuple.serialize_element(&(self.index as u64))?;
        tuple.end()
    }
}

struct Mt64Visitor;

impl<'de> Visitor<'de> for Mt64Visitor {
    type Value = Mt64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} state words followed by a cursor", STATE_SIZE)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Mt64, A::Error> {
        let mut state = [0u64; STATE_SIZE];
        for (i, word) in state.iter_mut().enumerate() {
            *word = seq
                .next_element()?
                .ok_or_else(|| A::Error::invalid_length(i, &self))?;
        }
        let index: u64 = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(STATE_SIZE, &self))?;
        if index > STATE_SIZE as u64 {
            return Err(A::Error::custom(format!(
                "engine cursor {index} is beyond the state size {STATE_SIZE}"
            )));
        }
        Ok(Mt64 {
            state,
            index: index as usize,
        })
    }
}

impl<'de> Deserialize<'de> for Mt64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(STATE_SIZE + 1, Mt64Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_first_output() {
        let mut engine = Mt64::new(DEFAULT_SEED);
        assert_eq!(engine.next(), 14514284786278117030);
    }

    #[test]
    fn matches_reference_ten_thousandth_output() {
        let mut engine = Mt64::default();
        engine.discard(9999);
        assert_eq!(engine.next(), 9981545732273789042);
    }

    #[test]
    fn reseeding_restarts_the_sequence() {
        let mut engine = Mt64::new(0xDEADBEEF);
        let first = (0..8).map(|_| engine.next()).collect::<Vec<_>>();
        engine.seed(0xDEADBEEF);
        let second = (0..8).map(|_| engine.next()).collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[test]
    fn cursor_advances_and_wraps() {
        let mut engine = Mt64::new(7);
        assert_eq!(engine.index(), STATE_SIZE);
        engine.next();
        assert_eq!(engine.index(), 1);
        engine.discard(STATE_SIZE as u64 - 1);
        assert_eq!(engine.index(), STATE_SIZE);
        engine.next();
        assert_eq!(engine.index(), 1);
    }

    #[test]
    fn bincode_layout_has_no_length_prefix() {
        let engine = Mt64::new(1);
        let bytes = bincode::serialize(&engine).unwrap();
        assert_eq!(bytes.len(), (STATE_SIZE + 1) * 8);
        assert_eq!(&bytes[..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 8..], &(STATE_SIZE as u64).to_le_bytes());
    }

    #[test]
    fn restored_engine_continues_the_stream() {
        let mut engine = Mt64::new(42);
        engine.discard(500);
        let bytes = bincode::serialize(&engine).unwrap();
        let mut restored: Mt64 = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, engine);
        for _ in 0..1000 {
            assert_eq!(restored.next(), engine.next());
        }
    }

    #[test]
    fn rejects_cursor_past_state() {
        let engine = Mt64::new(1);
        let mut bytes = bincode::serialize(&engine).unwrap();
        let len = bytes.len();
        bytes[len - 8..].copy_from_slice(&(STATE_SIZE as u64 + 1).to_le_bytes());
        assert!(bincode::deserialize::<Mt64>(&bytes).is_err());
    }
}
