use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub tags: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            tags: tags.into(),
        }
    }

    /// Topic labels of this card, split on whitespace.
    pub fn tag_labels(&self) -> impl Iterator<Item = &str> {
        self.tags.split_whitespace()
    }
}

/// Cards in load order plus the sorted set of every tag label seen.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Flashcard>,
    tags: Vec<String>,
    source: String,
}

impl Deck {
    pub fn new(cards: Vec<Flashcard>, source: String) -> Self {
        let tags: BTreeSet<&str> = cards.iter().flat_map(Flashcard::tag_labels).collect();
        let tags = tags.into_iter().map(str::to_string).collect();
        Self {
            cards,
            tags,
            source,
        }
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The text the deck was parsed from, untouched.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn filtered(&self, filter: &TagFilter) -> Vec<Flashcard> {
        self.cards
            .iter()
            .filter(|card| filter.matches(card))
            .cloned()
            .collect()
    }

    pub fn count_matching(&self, filter: &TagFilter) -> usize {
        self.cards.iter().filter(|card| filter.matches(card)).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Substring containment against the raw tags field, so `light` also
    /// selects cards tagged `lights`.
    pub fn matches(&self, card: &Flashcard) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => !card.tags.is_empty() && card.tags.contains(tag.as_str()),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => write!(f, "All Topics"),
            TagFilter::Tag(tag) => write!(f, "{}", crate::utils::capitalize(tag)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum QuizMode {
    #[default]
    Study,
    Test,
}

impl QuizMode {
    pub fn toggled(self) -> Self {
        match self {
            QuizMode::Study => QuizMode::Test,
            QuizMode::Test => QuizMode::Study,
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Study => write!(f, "Study Mode"),
            QuizMode::Test => write!(f, "Test Mode"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Rounded share of correct answers, 0 before anything is graded.
    pub fn percentage(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (100.0 * f64::from(self.correct) / f64::from(total)).round() as u32
    }
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Loading,
    Quiz,
    TagPicker,
}
