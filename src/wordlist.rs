use std::sync::OnceLock;

const WORDLIST_DATA: &str = include_str!("../assets/wordlist.txt");

const WORDLIST_LEN: usize = 64;

#[cfg(test)]
const EXPECTED_SHA256: &str = "e1aea139b909a10e3679a51c8721110192bd30d4261124bb526009c4e1151ad1";

static WORDLIST: OnceLock<Vec<&'static str>> = OnceLock::new();

/// Two-letter syllables for pronounceable passwords.
pub const SYLLABLES: &[&str] = &[
    "ba", "be", "bi", "bo", "bu", "ca", "ce", "ci", "co", "cu", //
    "da", "de", "di", "do", "du", "fa", "fe", "fi", "fo", "fu", //
    "ga", "ge", "gi", "go", "gu", "ha", "he", "hi", "ho", "hu", //
    "ja", "je", "ji", "jo", "ju", "ka", "ke", "ki", "ko", "ku", //
    "la", "le", "li", "lo", "lu", "ma", "me", "mi", "mo", "mu", //
    "na", "ne", "ni", "no", "nu", "pa", "pe", "pi", "po", "pu", //
    "ra", "re", "ri", "ro", "ru", "sa", "se", "si", "so", "su", //
    "ta", "te", "ti", "to", "tu", "va", "ve", "vi", "vo", "vu", //
    "wa", "we", "wi", "wo", "xa", "xe", "ya", "ye", "yo", "za", //
    "ze", "zi", "zo", "zu",
];

pub fn get_wordlist() -> &'static [&'static str] {
    WORDLIST.get_or_init(|| {
        let words: Vec<&'static str> = WORDLIST_DATA
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        assert_eq!(
            words.len(),
            WORDLIST_LEN,
            "Wordlist must contain exactly {} words",
            WORDLIST_LEN
        );
        words
    })
}

pub const fn wordlist_size() -> usize {
    WORDLIST_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};
    use std::collections::HashSet;

    #[test]
    fn test_wordlist_loaded() {
        assert_eq!(get_wordlist().len(), wordlist_size());
    }

    #[test]
    fn test_wordlist_no_duplicates() {
        let words = get_wordlist();
        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), words.len(), "Wordlist contains duplicates");
    }

    #[test]
    fn test_wordlist_integrity() {
        let words = get_wordlist();

        assert_eq!(words[0], "apple");
        assert_eq!(words[63], "light");

        for (i, word) in words.iter().enumerate() {
            assert!(
                !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase()),
                "Word at index {} (\"{}\") contains invalid characters",
                i,
                word
            );
        }
    }

    #[test]
    fn test_wordlist_sha256() {
        let mut hasher = Sha256::new();
        hasher.update(WORDLIST_DATA.as_bytes());
        let result = format!("{:x}", hasher.finalize());

        assert_eq!(
            result, EXPECTED_SHA256,
            "Wordlist SHA-256 mismatch; file may be corrupted"
        );
    }

    #[test]
    fn test_syllables() {
        assert_eq!(SYLLABLES.len(), 94);

        let unique: HashSet<_> = SYLLABLES.iter().collect();
        assert_eq!(unique.len(), SYLLABLES.len(), "Syllables contain duplicates");

        for syllable in SYLLABLES {
            assert_eq!(syllable.len(), 2);
            assert!(syllable.chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}
