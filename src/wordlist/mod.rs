//! Suitable-word corpora: embedded per-length wordlists, the master wordlist
//! with its suitability predicate, and the curation filters that keep the
//! lists free of rotated and anagram duplicates.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use rand::prelude::*;
use thiserror::Error;

/// Embedded curated wordlists, one lowercase word per line.
static WORDS_8: &str = include_str!("../../data/suitable_8_letter_words.txt");
static WORDS_9: &str = include_str!("../../data/suitable_9_letter_words.txt");
static WORDS_12: &str = include_str!("../../data/suitable_12_letter_words.txt");

/// Embedded master wordlist with length, frequency and suitability columns.
static MASTER_CSV: &str = include_str!("../../data/wordlist.csv");

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("word {word:?} does not have length {expected}")]
    WrongWordLength { word: String, expected: usize },
    #[error("no embedded wordlist for length {0}")]
    UnsupportedLength(usize),
    #[error("malformed master wordlist line {0:?}")]
    BadMasterLine(String),
}

/// A deduplicated corpus of words of one fixed length, with O(1) membership
/// and uniform random choice.
#[derive(Debug, Clone)]
pub struct WordList {
    length: usize,
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordList {
    /// Build a corpus, validating that every word has the expected character
    /// length. Duplicates are dropped, first occurrence wins.
    pub fn new(
        length: usize,
        words: impl IntoIterator<Item = String>,
    ) -> Result<Self, DataError> {
        let mut list = Self {
            length,
            words: Vec::new(),
            index: HashSet::new(),
        };
        for word in words {
            if word.chars().count() != length {
                return Err(DataError::WrongWordLength {
                    word,
                    expected: length,
                });
            }
            if list.index.insert(word.clone()) {
                list.words.push(word);
            }
        }
        Ok(list)
    }

    /// The embedded curated corpus for one of the supported lengths.
    pub fn embedded(length: usize) -> Result<&'static WordList, DataError> {
        match length {
            8 => Ok(&EIGHT_LETTER_WORDS),
            9 => Ok(&NINE_LETTER_WORDS),
            12 => Ok(&TWELVE_LETTER_WORDS),
            other => Err(DataError::UnsupportedLength(other)),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draw one word uniformly at random.
    pub fn choose<'a, R: Rng>(&'a self, rng: &mut R) -> Option<&'a str> {
        self.words.choose(rng).map(|w| w.as_str())
    }
}

fn load_embedded(length: usize, raw: &str) -> WordList {
    let list = WordList::new(
        length,
        raw.lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    )
    .expect("embedded wordlist should contain only words of the right length");
    log::debug!("loaded {} embedded {}-letter words", list.len(), length);
    list
}

static EIGHT_LETTER_WORDS: Lazy<WordList> = Lazy::new(|| load_embedded(8, WORDS_8));
static NINE_LETTER_WORDS: Lazy<WordList> = Lazy::new(|| load_embedded(9, WORDS_9));
static TWELVE_LETTER_WORDS: Lazy<WordList> = Lazy::new(|| load_embedded(12, WORDS_12));

/// All cyclic rotations of a word, including the word itself.
pub fn generate_rotations(word: &str) -> HashSet<String> {
    (0..word.chars().count())
        .map(|i| crate::puzzle::rotate(word, i))
        .collect()
}

/// Drop every word that also occurs rotated elsewhere in the input. Both
/// members of a rotation pair are dropped; input order is preserved for the
/// survivors.
pub fn remove_rotated_duplicates(words: &[String]) -> Vec<String> {
    let mut rotation_map: HashMap<String, HashSet<&String>> = HashMap::new();
    for word in words {
        for rotation in generate_rotations(word) {
            rotation_map.entry(rotation).or_default().insert(word);
        }
    }
    words
        .iter()
        .filter(|word| {
            generate_rotations(word)
                .iter()
                .all(|rotation| rotation_map[rotation].len() == 1)
        })
        .cloned()
        .collect()
}

/// Drop every word that also occurs as an anagram elsewhere in the input.
pub fn remove_anagrams(words: &[String]) -> Vec<String> {
    let mut anagram_map: HashMap<String, usize> = HashMap::new();
    for word in words {
        let mut sorted: Vec<char> = word.chars().collect();
        sorted.sort_unstable();
        *anagram_map.entry(sorted.into_iter().collect()).or_insert(0) += 1;
    }
    words
        .iter()
        .filter(|word| {
            let mut sorted: Vec<char> = word.chars().collect();
            sorted.sort_unstable();
            anagram_map[&sorted.into_iter().collect::<String>()] == 1
        })
        .cloned()
        .collect()
}

/// One row of the master wordlist.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterEntry {
    pub word: String,
    pub length: usize,
    pub frequency: Option<f64>,
    pub all_lowercase: bool,
    pub all_basic_alpha: bool,
    pub is_noun: bool,
    pub is_singular: bool,
}

impl MasterEntry {
    /// The suitability predicate: all-lowercase, all-basic-alphabetic, a
    /// noun, and singular. Missing flags count as false.
    pub fn suitable(&self) -> bool {
        self.all_lowercase && self.all_basic_alpha && self.is_noun && self.is_singular
    }
}

/// Parse the master wordlist CSV: a header line followed by
/// `Word,Length,Frequency,AllLowercase,AllBasicAlpha,ZelfstandigNaamwoord,IsEnkelvoud`
/// rows. Empty boolean cells are missing data and read as false.
pub fn parse_master_list(csv: &str) -> Result<Vec<MasterEntry>, DataError> {
    let mut entries = Vec::new();
    for line in csv.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 7 {
            return Err(DataError::BadMasterLine(line.to_string()));
        }
        let length: usize = fields[1]
            .parse()
            .map_err(|_| DataError::BadMasterLine(line.to_string()))?;
        entries.push(MasterEntry {
            word: fields[0].to_string(),
            length,
            frequency: fields[2].parse().ok(),
            all_lowercase: fields[3] == "True",
            all_basic_alpha: fields[4] == "True",
            is_noun: fields[5] == "True",
            is_singular: fields[6] == "True",
        });
    }
    Ok(entries)
}

static MASTER_LIST: Lazy<Vec<MasterEntry>> = Lazy::new(|| {
    let entries =
        parse_master_list(MASTER_CSV).expect("embedded master wordlist should parse");
    log::debug!("loaded {} master wordlist entries", entries.len());
    entries
});

/// The embedded master wordlist.
pub fn embedded_master_list() -> &'static [MasterEntry] {
    &MASTER_LIST
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_wordlist_rejects_wrong_length() {
        let err = WordList::new(8, owned(&["kat"])).unwrap_err();
        assert_eq!(
            err,
            DataError::WrongWordLength {
                word: "kat".to_string(),
                expected: 8
            }
        );
    }

    #[test]
    fn test_wordlist_deduplicates() {
        let list = WordList::new(8, owned(&["autolamp", "autolamp", "krokodil"])).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("autolamp"));
        assert!(list.contains("krokodil"));
    }

    #[test]
    fn test_embedded_lists_load() {
        for length in [8, 9, 12] {
            let list = WordList::embedded(length).unwrap();
            assert!(!list.is_empty());
            assert!(list.words().iter().all(|w| w.chars().count() == length));
        }
        assert!(matches!(
            WordList::embedded(7),
            Err(DataError::UnsupportedLength(7))
        ));
    }

    #[test]
    fn test_embedded_lists_have_no_rotated_duplicates() {
        for length in [8, 9] {
            let list = WordList::embedded(length).unwrap();
            let filtered = remove_rotated_duplicates(list.words());
            assert_eq!(filtered.len(), list.len());
        }
    }

    #[test]
    fn test_choose_is_deterministic_with_seeded_rng() {
        use rand::rngs::StdRng;

        let list = WordList::embedded(8).unwrap();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        assert_eq!(list.choose(&mut rng1), list.choose(&mut rng2));
    }

    #[test]
    fn test_generate_rotations() {
        let rotations = generate_rotations("abc");
        assert_eq!(rotations.len(), 3);
        assert!(rotations.contains("abc"));
        assert!(rotations.contains("bca"));
        assert!(rotations.contains("cab"));
    }

    #[test]
    fn test_remove_rotated_duplicates_drops_both_members() {
        let words = owned(&["abcdefgh", "bcdefgha", "autolamp"]);
        assert_eq!(remove_rotated_duplicates(&words), owned(&["autolamp"]));
    }

    #[test]
    fn test_remove_anagrams_drops_both_members() {
        let words = owned(&["listen", "silent", "begrip"]);
        assert_eq!(remove_anagrams(&words), owned(&["begrip"]));
    }

    #[test]
    fn test_master_list_parsing_and_suitability() {
        let entries = embedded_master_list();
        assert!(!entries.is_empty());

        let telefoon = entries.iter().find(|e| e.word == "telefoon").unwrap();
        assert!(telefoon.suitable());
        assert_eq!(telefoon.length, 8);
        assert_eq!(telefoon.frequency, Some(11876.0));

        // capitalized place name fails the all-lowercase flag
        let amsterdam = entries.iter().find(|e| e.word == "Amsterdam").unwrap();
        assert!(!amsterdam.suitable());

        // plural fails the singular flag
        let telefoons = entries.iter().find(|e| e.word == "telefoons").unwrap();
        assert!(!telefoons.suitable());

        // missing flag cells read as false
        let fietsen = entries.iter().find(|e| e.word == "fietsen").unwrap();
        assert!(!fietsen.is_singular);
        assert!(!fietsen.suitable());
    }

    #[test]
    fn test_master_list_rejects_malformed_lines() {
        let err = parse_master_list("Word,Length\nkat,3,extra").unwrap_err();
        assert!(matches!(err, DataError::BadMasterLine(_)));
    }
}
