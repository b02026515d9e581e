//! Porter stemming algorithm implementation.
//!
//! This is the NLTK flavour of the Porter stemmer (its default
//! `NLTK_EXTENSIONS` mode), the one the classifier vocabularies are built
//! with. Classifier vocabularies are stored as stems, so any disagreement
//! with the training stemmer makes a question miss features it should hit.
//!
//! On top of Martin Porter's published steps it applies:
//!
//! - a pool of irregular forms (`dying` → `die`, `skies` → `sky`, `news`)
//! - no stemming of words with one or two letters
//! - `ies` / `ied` on four-letter words keep the `ie` (`ties` → `tie`)
//! - `y` → `i` only after a consonant that is not the whole stem
//! - `alli` → `al` before the other step 2 rules, plus `fulli` and a
//!   `logi` rule that counts the `l` as part of the stem
//! - a two-letter vowel-consonant stem counts as `*o` (`owed` → `owe`)
//!
//! # Examples
//!
//! ```
//! use campus_faq::analysis::token_filter::stem::Stemmer;
//! use campus_faq::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("library"), "librari");
//! assert_eq!(stemmer.stem("opening"), "open");
//! assert_eq!(stemmer.stem("dying"), "die");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

/// Stem condition, evaluated on the word with the suffix removed.
type Condition = fn(&[char]) -> bool;

/// Words returned as-is from a fixed table.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

const STEP1A_RULES: &[(&str, &str, Condition)] = &[
    ("sses", "ss", always),
    ("ies", "i", always),
    ("ss", "ss", always),
    ("s", "", always),
];

const STEP2_RULES: &[(&str, &str, Condition)] = &[
    ("ational", "ate", positive_measure),
    ("tional", "tion", positive_measure),
    ("enci", "ence", positive_measure),
    ("anci", "ance", positive_measure),
    ("izer", "ize", positive_measure),
    ("bli", "ble", positive_measure),
    ("alli", "al", positive_measure),
    ("entli", "ent", positive_measure),
    ("eli", "e", positive_measure),
    ("ousli", "ous", positive_measure),
    ("ization", "ize", positive_measure),
    ("ation", "ate", positive_measure),
    ("ator", "ate", positive_measure),
    ("alism", "al", positive_measure),
    ("iveness", "ive", positive_measure),
    ("fulness", "ful", positive_measure),
    ("ousness", "ous", positive_measure),
    ("aliti", "al", positive_measure),
    ("iviti", "ive", positive_measure),
    ("biliti", "ble", positive_measure),
    ("fulli", "ful", positive_measure),
    ("logi", "log", positive_measure_with_l),
];

const STEP3_RULES: &[(&str, &str, Condition)] = &[
    ("icate", "ic", positive_measure),
    ("ative", "", positive_measure),
    ("alize", "al", positive_measure),
    ("iciti", "ic", positive_measure),
    ("ical", "ic", positive_measure),
    ("ful", "", positive_measure),
    ("ness", "", positive_measure),
];

const STEP4_RULES: &[(&str, &str, Condition)] = &[
    ("al", "", measure_above_one),
    ("ance", "", measure_above_one),
    ("ence", "", measure_above_one),
    ("er", "", measure_above_one),
    ("ic", "", measure_above_one),
    ("able", "", measure_above_one),
    ("ible", "", measure_above_one),
    ("ant", "", measure_above_one),
    ("ement", "", measure_above_one),
    ("ment", "", measure_above_one),
    ("ent", "", measure_above_one),
    ("ion", "", ion_stem),
    ("ou", "", measure_above_one),
    ("ism", "", measure_above_one),
    ("ate", "", measure_above_one),
    ("iti", "", measure_above_one),
    ("ous", "", measure_above_one),
    ("ive", "", measure_above_one),
    ("ize", "", measure_above_one),
];

const STEP5B_RULES: &[(&str, &str, Condition)] = &[("ll", "l", measure_above_one_with_l)];

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if let Some((_, base)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == word) {
            return (*base).to_string();
        }

        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= 2 {
            return word;
        }

        let chars = step1a(chars);
        let chars = step1b(chars);
        let chars = step1c(chars);
        let chars = step2(chars);
        let chars = apply_rules(chars, STEP3_RULES);
        let chars = apply_rules(chars, STEP4_RULES);
        let chars = step5a(chars);
        let chars = apply_rules(chars, STEP5B_RULES);
        chars.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

fn is_consonant(word: &[char], i: usize) -> bool {
    match word[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant transitions, Porter's `m`.
fn measure(stem: &[char]) -> usize {
    let mut count = 0;
    let mut after_vowel = false;
    for i in 0..stem.len() {
        let consonant = is_consonant(stem, i);
        if consonant && after_vowel {
            count += 1;
        }
        after_vowel = !consonant;
    }
    count
}

fn contains_vowel(stem: &[char]) -> bool {
    (0..stem.len()).any(|i| !is_consonant(stem, i))
}

fn ends_double_consonant(word: &[char]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && is_consonant(word, n - 1)
}

/// `*o`: consonant-vowel-consonant with the last not w, x or y, or a
/// two-letter vowel-consonant word.
fn ends_cvc(word: &[char]) -> bool {
    let n = word.len();
    let long = n >= 3
        && is_consonant(word, n - 3)
        && !is_consonant(word, n - 2)
        && is_consonant(word, n - 1)
        && !matches!(word[n - 1], 'w' | 'x' | 'y');
    let short = n == 2 && !is_consonant(word, 0) && is_consonant(word, 1);
    long || short
}

fn ends_with(word: &[char], suffix: &str) -> bool {
    let n = suffix.len();
    word.len() >= n && word[word.len() - n..].iter().copied().eq(suffix.chars())
}

fn replace_suffix(mut word: Vec<char>, suffix: &str, replacement: &str) -> Vec<char> {
    word.truncate(word.len() - suffix.len());
    word.extend(replacement.chars());
    word
}

fn always(_: &[char]) -> bool {
    true
}

fn positive_measure(stem: &[char]) -> bool {
    measure(stem) > 0
}

fn measure_above_one(stem: &[char]) -> bool {
    measure(stem) > 1
}

fn with_l(stem: &[char]) -> Vec<char> {
    let mut extended = stem.to_vec();
    extended.push('l');
    extended
}

fn positive_measure_with_l(stem: &[char]) -> bool {
    measure(&with_l(stem)) > 0
}

fn measure_above_one_with_l(stem: &[char]) -> bool {
    measure(&with_l(stem)) > 1
}

fn ion_stem(stem: &[char]) -> bool {
    measure(stem) > 1 && matches!(stem.last(), Some('s' | 't'))
}

/// Apply the first rule whose suffix matches. A matching suffix whose
/// condition fails ends the step with the word unchanged.
fn apply_rules(word: Vec<char>, rules: &[(&str, &str, Condition)]) -> Vec<char> {
    for (suffix, replacement, condition) in rules {
        if ends_with(&word, suffix) {
            if condition(&word[..word.len() - suffix.len()]) {
                return replace_suffix(word, suffix, replacement);
            }
            return word;
        }
    }
    word
}

fn step1a(word: Vec<char>) -> Vec<char> {
    if word.len() == 4 && ends_with(&word, "ies") {
        return replace_suffix(word, "ies", "ie");
    }
    apply_rules(word, STEP1A_RULES)
}

fn step1b(word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "ied") {
        let replacement = if word.len() == 4 { "ie" } else { "i" };
        return replace_suffix(word, "ied", replacement);
    }

    if ends_with(&word, "eed") {
        if positive_measure(&word[..word.len() - 3]) {
            return replace_suffix(word, "eed", "ee");
        }
        return word;
    }

    let Some(suffix) = ["ed", "ing"]
        .into_iter()
        .find(|suffix| ends_with(&word, suffix) && contains_vowel(&word[..word.len() - suffix.len()]))
    else {
        return word;
    };
    let mut stem = replace_suffix(word, suffix, "");

    if ends_with(&stem, "at") || ends_with(&stem, "bl") || ends_with(&stem, "iz") {
        stem.push('e');
    } else if ends_double_consonant(&stem) {
        if !matches!(stem.last(), Some('l' | 's' | 'z')) {
            stem.pop();
        }
    } else if measure(&stem) == 1 && ends_cvc(&stem) {
        stem.push('e');
    }
    stem
}

fn step1c(word: Vec<char>) -> Vec<char> {
    if !ends_with(&word, "y") {
        return word;
    }
    let stem = &word[..word.len() - 1];
    if stem.len() > 1 && is_consonant(stem, stem.len() - 1) {
        return replace_suffix(word, "y", "i");
    }
    word
}

fn step2(word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "alli") && positive_measure(&word[..word.len() - 4]) {
        return step2(replace_suffix(word, "alli", "al"));
    }
    apply_rules(word, STEP2_RULES)
}

fn step5a(word: Vec<char>) -> Vec<char> {
    if !ends_with(&word, "e") {
        return word;
    }
    let stem = &word[..word.len() - 1];
    let m = measure(stem);
    if m > 1 || (m == 1 && !ends_cvc(stem)) {
        return stem.to_vec();
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pairs: &[(&str, &str)]) {
        let stemmer = PorterStemmer::new();
        for (word, expected) in pairs {
            assert_eq!(stemmer.stem(word), *expected, "stem of {word}");
        }
    }

    #[test]
    fn test_step1() {
        check(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("flies", "fli"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("conflated", "conflat"),
            ("troubled", "troubl"),
            ("sized", "size"),
            ("hopping", "hop"),
            ("tanned", "tan"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("fizzed", "fizz"),
            ("failing", "fail"),
            ("filing", "file"),
            ("happy", "happi"),
        ]);
    }

    #[test]
    fn test_later_steps() {
        check(&[
            ("relational", "relat"),
            ("conditional", "condit"),
            ("rational", "ration"),
            ("generalization", "gener"),
            ("hopeful", "hope"),
            ("goodness", "good"),
            ("revival", "reviv"),
            ("allowance", "allow"),
            ("inference", "infer"),
            ("adjustment", "adjust"),
            ("adoption", "adopt"),
            ("probate", "probat"),
            ("rate", "rate"),
            ("cease", "ceas"),
            ("controll", "control"),
            ("roll", "roll"),
        ]);
    }

    #[test]
    fn test_nltk_extensions() {
        check(&[
            ("dying", "die"),
            ("lying", "lie"),
            ("tying", "tie"),
            ("ties", "tie"),
            ("dies", "die"),
            ("died", "die"),
            ("spied", "spi"),
            ("sky", "sky"),
            ("skies", "sky"),
            ("news", "news"),
            ("innings", "inning"),
            ("proceed", "proceed"),
            ("succeed", "succeed"),
            ("enjoy", "enjoy"),
            ("cry", "cri"),
            ("formally", "formal"),
            ("hopefully", "hope"),
            ("geology", "geolog"),
            ("owed", "owe"),
        ]);
    }

    #[test]
    fn test_faq_vocabulary() {
        check(&[
            ("library", "librari"),
            ("Library", "librari"),
            ("hours", "hour"),
            ("opening", "open"),
            ("schedule", "schedul"),
            ("registration", "registr"),
            ("running", "run"),
            ("where", "where"),
        ]);
    }

    #[test]
    fn test_short_and_non_ascii_words() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("as"), "as");
        assert_eq!(stemmer.stem("us"), "us");
        assert_eq!(stemmer.stem("2cs"), "2c");
        assert_eq!(stemmer.stem("?"), "?");
        assert_eq!(stemmer.stem("café"), "café");
        assert_eq!(stemmer.stem("cafés"), "café");
    }
}
