//! Token normalisation for downstream consumers (intent classifiers etc).
//!
//! Pipeline over engine tokens:
//!
//! 1. optionally drop numbers and person names, keeping a `NUM` / `PERSON`
//!    placeholder if nothing else is left;
//! 2. lemmatise (lower-cased lemma, or lower-cased text for `-PRON-`);
//! 3. drop punctuation symbols;
//! 4. drop stopwords, unless that would drop everything.

use std::collections::HashSet;

use lexner_core::Token;
use log::debug;
use once_cell::sync::Lazy;

use crate::config::{StoplistSize, TokenizeConfig};

/// Lemma the engine uses for pronouns.
const PRONOUN_LEMMA: &str = "-PRON-";

/// English stopwords (the NLTK `english` corpus).
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Extra stopwords (a subset of scikit-learn's English list).
const CUSTOM_STOPWORDS: &[&str] = &[
    "much", "herein", "thru", "per", "somehow", "throughout", "almost", "somewhere",
    "whereafter", "nevertheless", "indeed", "hereby", "across", "within", "co", "yet",
    "elsewhere", "whence", "seeming", "un", "whither", "mine", "whether", "also", "thus",
    "amongst", "thereafter", "mostly", "amoungst", "therefore", "seems", "something", "thereby",
    "others", "hereupon", "us", "everyone", "perhaps", "please", "hence", "due", "seemed", "else",
    "beside", "therein", "couldnt", "moreover", "anyway", "whatever", "anyhow", "de", "among",
    "besides", "though", "either", "rather", "might", "noone", "eg", "thereupon", "may", "namely",
    "ie", "sincere", "whereby", "con", "latterly", "becoming", "meanwhile", "afterwards",
    "thence", "whoever", "otherwise", "anything", "however", "whereas", "although", "hereafter",
    "already", "beforehand", "etc", "whenever", "even", "someone", "whereupon", "inc",
    "sometimes", "ltd", "cant",
];

/// Contraction pieces the engine splits off.
const CONTRACTION_STOPWORDS: &[&str] = &["n't", "'s", "'m", "ca"];

/// Question words kept by the small list.
const QUESTION_WORDS: &[&str] = &["why", "when", "where", "how", "which", "what", "whose", "whom"];

/// Symbols dropped besides single ASCII punctuation characters.
const EXTRA_SYMBOLS: &[&str] = &["-----", "---", "...", "\u{201C}", "\u{201D}", "'ve"];

static LARGE_STOPLIST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_STOPWORDS
        .iter()
        .chain(CUSTOM_STOPWORDS)
        .chain(CONTRACTION_STOPWORDS)
        .copied()
        .collect()
});

static SMALL_STOPLIST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    LARGE_STOPLIST
        .iter()
        .copied()
        .filter(|w| !QUESTION_WORDS.contains(w))
        .collect()
});

/// Stopword set for `size`.
#[must_use]
pub fn stoplist(size: StoplistSize) -> &'static HashSet<&'static str> {
    match size {
        StoplistSize::Small => &SMALL_STOPLIST,
        StoplistSize::Large => &LARGE_STOPLIST,
    }
}

/// True for punctuation symbols dropped by [`tokenize`].
#[must_use]
pub fn is_symbol(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_punctuation() => true,
        _ => EXTRA_SYMBOLS.contains(&token),
    }
}

/// Normalise engine tokens into downstream terms.
///
/// ```rust
/// use lexner::{tokenize, BasicEngine, TokenizeConfig};
///
/// let tokens = BasicEngine::new().tokens("What is the weather in London?");
/// assert_eq!(tokenize(&tokens, TokenizeConfig::default()), vec!["what", "weather", "london"]);
/// ```
#[must_use]
pub fn tokenize(tokens: &[Token], config: TokenizeConfig) -> Vec<String> {
    let mut kept: Vec<Token> = tokens.to_vec();
    if config.filter_entities {
        kept = filter_tokens(kept, Token::is_number, "NUM");
        kept = filter_tokens(kept, |t| t.has_ent_type("PERSON"), "PERSON");
        debug!("Tokens after entity filtering: {}", kept.len());
    }

    let lemmas = kept
        .iter()
        .map(lemma_of)
        .filter(|lemma| !is_symbol(lemma))
        .collect::<Vec<_>>();

    let stopwords = stoplist(config.stoplist);
    let content: Vec<String> = lemmas
        .iter()
        .filter(|lemma| !stopwords.contains(lemma.as_str()))
        .cloned()
        .collect();
    if content.is_empty() {
        lemmas
    } else {
        content
    }
}

fn lemma_of(token: &Token) -> String {
    if token.lemma == PRONOUN_LEMMA || token.lemma.trim().is_empty() {
        token.lower()
    } else {
        token.lemma.trim().to_lowercase()
    }
}

/// Drop tokens matching `drop`; if any were dropped and none are left, keep a
/// single `fallback` placeholder.
fn filter_tokens(tokens: Vec<Token>, drop: impl Fn(&Token) -> bool, fallback: &str) -> Vec<Token> {
    let before = tokens.len();
    let kept: Vec<Token> = tokens.into_iter().filter(|t| !drop(t)).collect();
    if kept.is_empty() && before > 0 {
        vec![Token::new(fallback, 0, 0)]
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BasicEngine;

    fn run(text: &str, config: TokenizeConfig) -> Vec<String> {
        tokenize(&BasicEngine::new().tokens(text), config)
    }

    #[test]
    fn test_small_list_keeps_question_words() {
        assert_eq!(
            run("Where is the nearest bank?", TokenizeConfig::default()),
            vec!["where", "nearest", "bank"]
        );
    }

    #[test]
    fn test_large_list_drops_question_words() {
        let config = TokenizeConfig {
            stoplist: StoplistSize::Large,
            ..TokenizeConfig::default()
        };
        assert_eq!(run("Where is the nearest bank?", config), vec!["nearest", "bank"]);
    }

    #[test]
    fn test_all_stopwords_kept() {
        assert_eq!(run("it is", TokenizeConfig::default()), vec!["it", "is"]);
    }

    #[test]
    fn test_contractions_and_symbols() {
        assert_eq!(
            run("I don't like it... at all!", TokenizeConfig::default()),
            vec!["like"]
        );
    }

    #[test]
    fn test_number_filter() {
        let config = TokenizeConfig {
            filter_entities: true,
            ..TokenizeConfig::default()
        };
        assert_eq!(run("buy 3 apples", config), vec!["buy", "apples"]);
        assert_eq!(run("42", config), vec!["num"]);
        assert_eq!(run("42", TokenizeConfig::default()), vec!["42"]);
    }

    #[test]
    fn test_person_filter() {
        let tokens = vec![
            Token::new("call", 0, 4),
            Token::new("John", 5, 9).with_ent_type("PERSON"),
        ];
        let config = TokenizeConfig {
            filter_entities: true,
            ..TokenizeConfig::default()
        };
        assert_eq!(tokenize(&tokens, config), vec!["call"]);
        assert_eq!(tokenize(&tokens[1..], config), vec!["person"]);
    }

    #[test]
    fn test_pronoun_lemma_uses_text() {
        let tokens = vec![
            Token::new("She", 0, 3).with_lemma("-PRON-"),
            Token::new("runs", 4, 8).with_lemma("run"),
        ];
        assert_eq!(tokenize(&tokens, TokenizeConfig::default()), vec!["run"]);
        let tokens = vec![Token::new("She", 0, 3).with_lemma("-PRON-")];
        assert_eq!(tokenize(&tokens, TokenizeConfig::default()), vec!["she"]);
    }

    #[test]
    fn test_symbols() {
        assert!(is_symbol("?"));
        assert!(is_symbol("..."));
        assert!(is_symbol("'ve"));
        assert!(!is_symbol("a"));
        assert!(!is_symbol("??"));
    }
}
