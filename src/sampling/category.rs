/*! Category selection.

Two ways an ad can qualify for the sample: it contains one of the
remaining keywords as a standalone token, or its dominant topic still has
budget. Selection commits immediately (a selected ad is always accepted):
the matched term leaves the pool, the matched topic loses one unit.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::Error;

/// Why an ad made it into the sample. The label is what lands in the
/// category column of the dedup registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Category {
    Term(String),
    Topic(u32),
}

impl Category {
    pub fn label(&self) -> String {
        match self {
            Category::Term(term) => format!("keyword:{}", term),
            Category::Topic(topic) => format!("topic:{}", topic),
        }
    }
}

/// Ordered pool of single-use keywords.
///
/// A term that matched an accepted ad is permanently removed, so no two
/// sampled ads share a keyword. The pool shrinking to empty means no
/// further ad can qualify.
#[derive(Debug, Clone, PartialEq)]
pub struct TermList {
    terms: Vec<String>,
}

impl TermList {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    /// Read one term per line, skipping blank lines.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        let mut terms = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let term = line.trim_end();
            if !term.is_empty() {
                terms.push(term.to_string());
            }
        }
        Ok(Self::new(terms))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Remove and return the first term occurring in `text` as a
    /// standalone token (bounded by single spaces on both sides).
    fn take_first_match(&mut self, text: &str) -> Option<String> {
        let hit = self
            .terms
            .iter()
            .position(|term| text.contains(&format!(" {} ", term)))?;
        Some(self.terms.remove(hit))
    }
}

/// Topic-based qualification: precomputed dominant topics plus a
/// per-topic budget.
#[derive(Debug, Clone)]
pub struct TopicSelector {
    topics: HashMap<String, u32>,
    budgets: HashMap<u32, usize>,
}

impl TopicSelector {
    pub fn new(topics: HashMap<String, u32>, budgets: HashMap<u32, usize>) -> Self {
        Self { topics, budgets }
    }

    /// Consume one unit of budget for the dominant topic of `id`.
    ///
    /// Ads without a dominant topic, or whose topic is not budgeted or
    /// already exhausted, do not qualify.
    fn take(&mut self, id: &str) -> Option<u32> {
        let topic = *self.topics.get(id)?;
        let budget = self.budgets.get_mut(&topic)?;
        if *budget == 0 {
            return None;
        }
        *budget -= 1;
        Some(topic)
    }

    pub fn remaining(&self, topic: u32) -> usize {
        self.budgets.get(&topic).copied().unwrap_or(0)
    }
}

/// Polymorphic selection over the two sampling strategies.
pub enum CategorySelector {
    Keyword(TermList),
    Topic(TopicSelector),
}

impl CategorySelector {
    /// Qualify `id`/`text` and commit the selection.
    ///
    /// The keyword variant looks at the extracted text, the topic variant
    /// only at the qualified document id.
    pub fn select(&mut self, id: &str, text: &str) -> Option<Category> {
        match self {
            CategorySelector::Keyword(terms) => {
                let term = terms.take_first_match(text)?;
                debug!("{}: matched term {:?} ({} left)", id, term, terms.len());
                Some(Category::Term(term))
            }
            CategorySelector::Topic(selector) => {
                let topic = selector.take(id)?;
                debug!("{}: topic {} ({} left)", id, topic, selector.remaining(topic));
                Some(Category::Topic(topic))
            }
        }
    }
}
