//! Text cleaning: NFKC folding, URL/mention/hashtag removal, symbol and
//! emoji stripping, whitespace unification.
//!
//! Each step is exposed on its own so a caller can compose a partial
//! pipeline; [`TextCleaner::clean`] runs the full sequence.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

// CJK-aware word characters so 日本語 mentions/tags are consumed whole
static RE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[\w\-\x{3000}-\x{9FFF}]+").unwrap());
static RE_HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\w\-\x{3000}-\x{9FFF}]+").unwrap());

// Brackets become a space: they usually delimit a word
static RE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[「」【】『』［］〈〉《》〔〕（）()]").unwrap());
// Decorative marks vanish outright
static RE_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[●■※◆◇☆★○◎→←↑↓□]").unwrap());

static RE_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        "\\x{1F600}-\\x{1F64F}", // emoticons
        "\\x{1F300}-\\x{1F5FF}", // symbols & pictographs
        "\\x{1F680}-\\x{1F6FF}", // transport & map symbols
        "\\x{1F1E0}-\\x{1F1FF}", // regional indicators (flags)
        "\\x{1F900}-\\x{1F9FF}", // supplemental pictographs
        "\\x{2600}-\\x{26FF}",   // misc symbols
        "\\x{2700}-\\x{27BF}",   // dingbats
        "\\x{FE0F}",             // variation selector
        "]+",
    ))
    .unwrap()
});

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Text cleaner for Japanese social-media-style input.
pub struct TextCleaner {
    keep_emojis: bool,
}

impl TextCleaner {
    pub fn new(keep_emojis: bool) -> Self {
        TextCleaner { keep_emojis }
    }

    /// Unicode compatibility normalization: folds full-width alphanumerics,
    /// half-width katakana and compatibility variants to canonical forms.
    pub fn nfkc(s: &str) -> String {
        s.nfkc().collect()
    }

    pub fn remove_urls(s: &str) -> String {
        RE_URL.replace_all(s, "").into_owned()
    }

    pub fn remove_mentions_and_hashtags(s: &str) -> String {
        let s = RE_MENTION.replace_all(s, "");
        RE_HASHTAG.replace_all(&s, "").into_owned()
    }

    pub fn remove_symbols(s: &str) -> String {
        let s = RE_BRACKETS.replace_all(s, " ");
        RE_MARKS.replace_all(&s, "").into_owned()
    }

    pub fn remove_emojis(s: &str) -> String {
        RE_EMOJI.replace_all(s, "").into_owned()
    }

    /// Collapse whitespace runs (including 全角 spaces, tabs, newlines)
    /// to a single half-width space and trim the ends.
    pub fn unify_whitespace(s: &str) -> String {
        RE_WHITESPACE.replace_all(s, " ").trim().to_string()
    }

    /// Run the full cleaning sequence.
    pub fn clean(&self, s: &str) -> String {
        let s = Self::nfkc(s);
        let s = Self::remove_urls(&s);
        let s = Self::remove_mentions_and_hashtags(&s);
        let s = Self::remove_symbols(&s);
        let s = if self.keep_emojis {
            s
        } else {
            Self::remove_emojis(&s)
        };
        Self::unify_whitespace(&s)
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        TextCleaner::new(false)
    }
}
