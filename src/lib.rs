pub mod error;
pub mod generator;
pub mod history;
pub mod random;
pub mod strength;
pub mod wordlist;

pub use error::{Error, Result};
pub use generator::{
    CharacterClass, FillDistribution, GenerationOptions, LengthPolicy, Mode, generate_passphrase,
    generate_password, generate_pronounceable,
};
pub use history::History;
pub use random::{EntropySource, OsEntropy, RandomSource};
pub use strength::{
    StrengthEstimator, StrengthLabel, StrengthResult, TokenCounting, estimate_strength,
};
pub use wordlist::{get_wordlist, wordlist_size};
