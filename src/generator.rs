use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::wordlist::{SYLLABLES, get_wordlist};
use zeroize::Zeroizing;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Visually ambiguous glyphs dropped when `exclude_similar` is set.
pub const SIMILAR_CHARS: &str = "0O1lI|`";

const PRONOUNCEABLE_SYMBOLS: &[char] = &['!', '@', '#', '$', '%', '&', '*'];

pub const DEFAULT_LENGTH: usize = 16;
pub const DEFAULT_WORD_COUNT: usize = 4;
pub const DEFAULT_SEPARATOR: &str = "-";

/// Which generator produced (or should produce) a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Random,
    Pronounceable,
    Passphrase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Numbers,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Numbers,
        CharacterClass::Symbols,
    ];

    pub const fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Numbers => NUMBERS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Numbers => "numbers",
            CharacterClass::Symbols => "symbols",
        }
    }

    /// The class alphabet, minus [`SIMILAR_CHARS`] when requested.
    pub fn filtered_alphabet(self, exclude_similar: bool) -> Vec<char> {
        filter_similar(self.alphabet(), exclude_similar)
    }
}

/// How the non-required positions of a fixed-charset password are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillDistribution {
    /// Every position is uniform over the combined pool, so larger classes
    /// show up more often.
    #[default]
    UniformOverPool,
    /// Pick a class uniformly, then a character uniformly within it.
    UniformOverClasses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub exclude_similar: bool,
    pub must_contain_each: bool,
    pub fill: FillDistribution,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: false,
            exclude_similar: false,
            must_contain_each: false,
            fill: FillDistribution::default(),
        }
    }
}

impl GenerationOptions {
    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.uppercase,
            CharacterClass::Lowercase => self.lowercase,
            CharacterClass::Numbers => self.numbers,
            CharacterClass::Symbols => self.symbols,
        }
    }

    pub fn enabled_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.is_enabled(*class))
            .collect()
    }

    /// Number of enabled classes, 0 to 4.
    pub fn variety(&self) -> usize {
        self.enabled_classes().len()
    }

    /// Size of the combined pool after similar-character filtering.
    pub fn pool_size(&self) -> usize {
        self.enabled_classes()
            .into_iter()
            .map(|class| class.filtered_alphabet(self.exclude_similar).len())
            .sum()
    }
}

/// Pronounceable output length handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Keep the whole generated string even when it exceeds the target.
    #[default]
    AtLeast,
    /// Cut the result to exactly the target length, which can drop the
    /// trailing number and symbol.
    Truncate,
}

fn filter_similar(alphabet: &str, exclude_similar: bool) -> Vec<char> {
    alphabet
        .chars()
        .filter(|c| !exclude_similar || !SIMILAR_CHARS.contains(*c))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn require_positive(value: usize, what: &str) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidParameters(format!(
            "{} must be positive",
            what
        )));
    }
    Ok(())
}

/// Rejects separators that could also occur inside a passphrase token.
pub fn validate_separator(separator: &str) -> Result<()> {
    if separator.is_empty() {
        return Err(Error::InvalidParameters(
            "Separator must not be empty".to_string(),
        ));
    }

    if separator.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidParameters(format!(
            "Separator {:?} must not contain letters or digits",
            separator
        )));
    }

    Ok(())
}

/// Fixed-charset password over the union of the enabled classes.
///
/// Returns an empty string when no class is enabled.
pub fn generate_password(
    rng: &mut RandomSource,
    length: usize,
    options: &GenerationOptions,
) -> Result<Zeroizing<String>> {
    require_positive(length, "Password length")?;

    let classes: Vec<Vec<char>> = options
        .enabled_classes()
        .into_iter()
        .map(|class| class.filtered_alphabet(options.exclude_similar))
        .collect();

    fill_from_classes(
        rng,
        length,
        &classes,
        options.must_contain_each,
        options.fill,
    )
}

fn fill_from_classes(
    rng: &mut RandomSource,
    length: usize,
    classes: &[Vec<char>],
    must_contain_each: bool,
    fill: FillDistribution,
) -> Result<Zeroizing<String>> {
    let classes: Vec<&[char]> = classes
        .iter()
        .filter(|alphabet| !alphabet.is_empty())
        .map(Vec::as_slice)
        .collect();

    let pool: Vec<char> = classes.iter().flat_map(|c| c.iter().copied()).collect();

    if pool.is_empty() {
        tracing::debug!("no character class enabled, returning empty password");
        return Ok(Zeroizing::new(String::new()));
    }

    let mut required: Zeroizing<Vec<char>> = Zeroizing::new(Vec::new());
    if must_contain_each {
        for alphabet in classes.iter().copied() {
            required.push(*rng.choose(alphabet)?);
        }
    }

    if required.len() > length {
        return Err(Error::InvalidParameters(format!(
            "Password length {} cannot hold one character from each of {} classes",
            length,
            required.len()
        )));
    }

    tracing::debug!(
        length,
        classes = classes.len(),
        pool = pool.len(),
        required = required.len(),
        ?fill,
        "generating password"
    );

    let mut chars: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(length));
    chars.extend_from_slice(required.as_slice());

    while chars.len() < length {
        let ch = match fill {
            FillDistribution::UniformOverPool => *rng.choose(&pool)?,
            FillDistribution::UniformOverClasses => {
                let alphabet: &[char] = rng.choose(&classes)?;
                *rng.choose(alphabet)?
            }
        };
        chars.push(ch);
    }

    if !required.is_empty() {
        rng.shuffle_in_place(chars.as_mut_slice())?;
    }

    Ok(Zeroizing::new(chars.iter().collect()))
}

/// Syllable-based password with a trailing number and symbol.
pub fn generate_pronounceable(
    rng: &mut RandomSource,
    length: usize,
    policy: LengthPolicy,
) -> Result<Zeroizing<String>> {
    require_positive(length, "Password length")?;

    let syllable_count = length.div_ceil(2);
    tracing::debug!(length, syllable_count, ?policy, "generating pronounceable password");

    let mut password = Zeroizing::new(String::with_capacity(syllable_count * 2 + 3));

    for i in 0..syllable_count {
        let syllable = *rng.choose(SYLLABLES)?;
        if i == 0 || rng.next_int(3)? == 0 {
            password.push_str(&capitalize(syllable));
        } else {
            password.push_str(syllable);
        }
    }

    password.push_str(&rng.next_int(100)?.to_string());
    password.push(*rng.choose(PRONOUNCEABLE_SYMBOLS)?);

    if policy == LengthPolicy::Truncate {
        if let Some((cut, _)) = password.char_indices().nth(length) {
            password.truncate(cut);
        }
    }

    Ok(password)
}

/// Separator-joined words, first word capitalized, trailing number token.
pub fn generate_passphrase(
    rng: &mut RandomSource,
    word_count: usize,
    separator: &str,
) -> Result<Zeroizing<String>> {
    require_positive(word_count, "Word count")?;
    validate_separator(separator)?;

    let wordlist = get_wordlist();
    tracing::debug!(word_count, wordlist = wordlist.len(), "generating passphrase");

    let mut tokens: Vec<Zeroizing<String>> = Vec::with_capacity(word_count + 1);

    for i in 0..word_count {
        let word = *rng.choose(wordlist)?;
        if i == 0 {
            tokens.push(Zeroizing::new(capitalize(word)));
        } else {
            tokens.push(Zeroizing::new(word.to_string()));
        }
    }

    tokens.push(Zeroizing::new(rng.next_int(100)?.to_string()));

    let joined = tokens
        .iter()
        .map(|token| token.as_str())
        .collect::<Vec<_>>()
        .join(separator);

    Ok(Zeroizing::new(joined))
}
