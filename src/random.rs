use crate::error::{Error, Result};
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

const SEED_LEN: usize = 32;
const BUFFER_LEN: usize = 512;

/// Source of seed material for [`RandomSource`].
///
/// Implementations must report failure instead of handing out weaker bytes.
pub trait EntropySource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating system entropy via `getrandom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        getrandom::getrandom(dest).map_err(Error::EntropySourceUnavailable)
    }
}

/// Cryptographically secure integer source.
///
/// A ChaCha20 keystream keyed from an [`EntropySource`]; integers are drawn
/// with unbiased rejection sampling over 32-bit words.
pub struct RandomSource {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl RandomSource {
    /// Seeds a new source from the operating system.
    pub fn new() -> Result<Self> {
        Self::from_entropy(&mut OsEntropy)
    }

    pub fn from_entropy<E: EntropySource + ?Sized>(entropy: &mut E) -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        entropy.fill_bytes(&mut seed[..])?;
        tracing::trace!("random source seeded");
        Ok(Self::from_seed(&seed))
    }

    /// Deterministic source; the same seed always yields the same draws.
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        let mut cipher = ChaCha20::new(seed.into(), &[0u8; 12].into());
        let mut buffer = Zeroizing::new(vec![0u8; BUFFER_LEN]);
        cipher.apply_keystream(&mut buffer);

        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }

    fn next_u32(&mut self) -> u32 {
        if self.pos + 4 > self.buffer.len() {
            self.buffer.iter_mut().for_each(|b| *b = 0);
            self.cipher.apply_keystream(&mut self.buffer);
            self.pos = 0;
        }

        let bytes = [
            self.buffer[self.pos],
            self.buffer[self.pos + 1],
            self.buffer[self.pos + 2],
            self.buffer[self.pos + 3],
        ];
        self.pos += 4;

        u32::from_le_bytes(bytes)
    }

    /// Uniform integer in `[0, max)`.
    pub fn next_int(&mut self, max: usize) -> Result<usize> {
        if max == 0 {
            return Err(Error::InvalidParameters(
                "upper bound must be positive".to_string(),
            ));
        }

        let max = u32::try_from(max).map_err(|_| {
            Error::InvalidParameters(format!("upper bound {} exceeds 32 bits", max))
        })?;

        let span = 1u64 << 32;
        let zone = span - (span % max as u64);

        loop {
            let value = self.next_u32() as u64;
            if value < zone {
                return Ok((value % max as u64) as usize);
            }
        }
    }

    /// Uniformly picks one element of a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        let index = self.next_int(items.len())?;
        Ok(&items[index])
    }

    /// Fisher–Yates shuffle.
    pub fn shuffle_in_place<T>(&mut self, items: &mut [T]) -> Result<()> {
        for i in (1..items.len()).rev() {
            let j = self.next_int(i + 1)?;
            items.swap(i, j);
        }
        Ok(())
    }

    /// Returns a uniformly permuted copy of `items`.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Result<Vec<T>> {
        let mut result = items.to_vec();
        self.shuffle_in_place(&mut result)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill_bytes(&mut self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::EntropySourceUnavailable(getrandom::Error::UNSUPPORTED))
        }
    }

    #[test]
    fn test_unavailable_entropy_fails_loudly() {
        let result = RandomSource::from_entropy(&mut BrokenEntropy);
        assert!(matches!(result, Err(Error::EntropySourceUnavailable(_))));
    }

    #[test]
    fn test_os_entropy_seeds() {
        let mut rng = RandomSource::new().unwrap();
        assert!(rng.next_int(10).unwrap() < 10);
    }

    #[test]
    fn test_seeded_deterministic() {
        let mut a = RandomSource::from_seed(&[42u8; 32]);
        let mut b = RandomSource::from_seed(&[42u8; 32]);

        for _ in 0..1000 {
            assert_eq!(a.next_int(97).unwrap(), b.next_int(97).unwrap());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = RandomSource::from_seed(&[1u8; 32]);
        let mut b = RandomSource::from_seed(&[2u8; 32]);

        let xs: Vec<usize> = (0..32).map(|_| a.next_int(1000).unwrap()).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.next_int(1000).unwrap()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_next_int_zero_rejected() {
        let mut rng = RandomSource::from_seed(&[7u8; 32]);
        assert!(matches!(rng.next_int(0), Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn test_next_int_range() {
        let mut rng = RandomSource::from_seed(&[7u8; 32]);

        for max in [1, 2, 3, 7, 10, 26, 64, 94, 100, 1000] {
            for _ in 0..500 {
                assert!(rng.next_int(max).unwrap() < max);
            }
        }
    }

    #[test]
    fn test_next_int_one_is_zero() {
        let mut rng = RandomSource::from_seed(&[9u8; 32]);
        for _ in 0..100 {
            assert_eq!(rng.next_int(1).unwrap(), 0);
        }
    }

    #[test]
    fn test_next_int_covers_range() {
        let mut rng = RandomSource::from_seed(&[3u8; 32]);
        let mut counts: HashMap<usize, usize> = HashMap::new();

        for _ in 0..6000 {
            *counts.entry(rng.next_int(6).unwrap()).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (value, count) in counts {
            assert!(
                (700..1300).contains(&count),
                "Value {} drawn {} times out of 6000",
                value,
                count
            );
        }
    }

    #[test]
    fn test_keystream_refill() {
        let mut rng = RandomSource::from_seed(&[5u8; 32]);
        let draws: Vec<usize> = (0..(BUFFER_LEN / 4) * 3)
            .map(|_| rng.next_int(1 << 20).unwrap())
            .collect();

        let per_buffer = BUFFER_LEN / 4;
        assert_ne!(draws[..per_buffer], draws[per_buffer..per_buffer * 2]);
        assert_ne!(draws[per_buffer..per_buffer * 2], draws[per_buffer * 2..]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = RandomSource::from_seed(&[11u8; 32]);
        let input: Vec<char> = "aabbbcdefghh".chars().collect();

        for _ in 0..50 {
            let shuffled = rng.shuffle(&input).unwrap();
            assert_eq!(shuffled.len(), input.len());

            let mut sorted_in = input.clone();
            let mut sorted_out = shuffled.clone();
            sorted_in.sort_unstable();
            sorted_out.sort_unstable();
            assert_eq!(sorted_in, sorted_out);
        }
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let mut rng = RandomSource::from_seed(&[11u8; 32]);
        let input = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let _ = rng.shuffle(&input).unwrap();
        assert_eq!(input, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = RandomSource::from_seed(&[11u8; 32]);
        let empty: Vec<u8> = Vec::new();
        assert!(rng.shuffle(&empty).unwrap().is_empty());
        assert_eq!(rng.shuffle(&[42]).unwrap(), vec![42]);
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        let mut rng = RandomSource::from_seed(&[13u8; 32]);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();

        for _ in 0..3000 {
            *seen.entry(rng.shuffle(&[1u8, 2, 3]).unwrap()).or_default() += 1;
        }

        assert_eq!(seen.len(), 6);
        for count in seen.values() {
            assert!((350..650).contains(count), "Permutation count {}", count);
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = RandomSource::from_seed(&[17u8; 32]);
        let items = ["a", "b", "c"];
        for _ in 0..100 {
            assert!(items.contains(rng.choose(&items).unwrap()));
        }

        let empty: [&str; 0] = [];
        assert!(rng.choose(&empty).is_err());
    }
}
