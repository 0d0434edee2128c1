/*! Per-file sampling state machine.

Walks one archive's document population in randomized order, applying the
source's early-stop rules and the layered eligibility filters, and commits
acceptances (sample line, registry line, quota decrements) atomically with
respect to one another.

Rejections are normal control flow: each carries a named [Rejection]
reason and is logged at debug level, never reported as an error.
!*/
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use oxilangtag::LanguageTag;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::document::{Document, ExtractedSample, SampleMetadata};
use crate::error::Error;
use crate::io::SampleWriter;

use super::category::{Category, CategorySelector};
use super::dedup::{AcceptanceRecord, DedupRegistry};
use super::quota::{QuotaKey, QuotaTracker};
use super::zone::ZoneExtractor;

/// Filter settings for one (sample, source) pair.
#[derive(Debug, Clone)]
pub struct SamplePolicy {
    pub sample_name: String,
    pub source: String,
    pub language: LanguageTag<String>,
    pub min_year: u16,
    pub min_chars: usize,
    pub max_chars: usize,
    /// File spans several years: keep scanning after one year's budget
    /// runs out instead of leaving the file.
    pub multi_year: bool,
    /// Cap on acceptances per file, to spread the sample across files.
    pub per_file_cap: Option<usize>,
}

/// How the iteration over one file ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Every document in the file was considered.
    Exhausted,
    /// Single-year file whose year budget ran out.
    YearDone,
    /// Per-file acceptance cap reached.
    CapReached,
    /// Source total ran out: stop iterating files for this source.
    SourceDone,
}

/// Named rejection reasons, in filter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Language,
    BeforeMinYear,
    DuplicateInFile,
    AlreadySampled,
    NoZoneContent,
    LengthOutOfBounds(usize),
    NoCategory,
}

pub enum Eligibility {
    Accept { text: String, category: Category },
    Reject(Rejection),
}

pub struct Sampler<'a, W, R>
where
    W: Write,
    R: Rng,
{
    policy: &'a SamplePolicy,
    extractor: &'a ZoneExtractor,
    quotas: &'a mut QuotaTracker,
    registry: &'a mut DedupRegistry,
    selector: &'a mut CategorySelector,
    writer: &'a mut SampleWriter<W>,
    rng: &'a mut R,
}

impl<'a, W, R> Sampler<'a, W, R>
where
    W: Write,
    R: Rng,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        policy: &'a SamplePolicy,
        extractor: &'a ZoneExtractor,
        quotas: &'a mut QuotaTracker,
        registry: &'a mut DedupRegistry,
        selector: &'a mut CategorySelector,
        writer: &'a mut SampleWriter<W>,
        rng: &'a mut R,
    ) -> Self {
        Self {
            policy,
            extractor,
            quotas,
            registry,
            selector,
            writer,
            rng,
        }
    }

    /// Sample from one file's population.
    ///
    /// The population is fully shuffled first, so which documents end up
    /// accepted is intentionally random; the outcome is still a valid
    /// quota-respecting, duplicate-free sample in any order.
    pub fn sample_file(
        &mut self,
        origin: &Path,
        mut documents: Vec<Document>,
    ) -> Result<FileOutcome, Error> {
        documents.shuffle(self.rng);

        let mut seen: HashSet<String> = HashSet::new();
        let mut accepted = 0usize;

        for doc in &documents {
            if self.quotas.exhausted(QuotaKey::Total) {
                debug!("[{}] total budget exhausted", self.policy.source);
                return Ok(FileOutcome::SourceDone);
            }

            if self.quotas.exhausted(QuotaKey::Year(doc.year)) {
                if self.policy.multi_year {
                    // other years may still be open in the same file
                    continue;
                }
                debug!("[{}] year {} exhausted, leaving file", self.policy.source, doc.year);
                return Ok(FileOutcome::YearDone);
            }

            if let Some(cap) = self.policy.per_file_cap {
                if accepted >= cap {
                    debug!("[{}] per-file cap of {} reached", self.policy.source, cap);
                    return Ok(FileOutcome::CapReached);
                }
            }

            let id = doc.qualified_id(&self.policy.source);
            match self.assess(&id, doc, &seen) {
                Eligibility::Accept { text, category } => {
                    self.accept(origin, doc, &id, text, &category)?;
                    accepted += 1;
                }
                Eligibility::Reject(reason) => {
                    debug!("{}: rejected ({:?})", id, reason);
                }
            }
            seen.insert(id);
        }

        Ok(FileOutcome::Exhausted)
    }

    /// Run the layered filters on one candidate.
    ///
    /// Short-circuits on the first failing filter; the order matters only
    /// for which reason gets reported, not for the accept/reject outcome.
    fn assess(&mut self, id: &str, doc: &Document, seen: &HashSet<String>) -> Eligibility {
        if doc.language() != &self.policy.language {
            return Eligibility::Reject(Rejection::Language);
        }
        if doc.year < self.policy.min_year {
            return Eligibility::Reject(Rejection::BeforeMinYear);
        }
        if seen.contains(id) {
            return Eligibility::Reject(Rejection::DuplicateInFile);
        }
        if self.registry.contains(id) {
            return Eligibility::Reject(Rejection::AlreadySampled);
        }

        let text = match self.extractor.extract(doc) {
            Some(text) => text,
            None => return Eligibility::Reject(Rejection::NoZoneContent),
        };

        let length = text.chars().count();
        if length < self.policy.min_chars || length > self.policy.max_chars {
            return Eligibility::Reject(Rejection::LengthOutOfBounds(length));
        }

        match self.selector.select(id, &text) {
            Some(category) => Eligibility::Accept { text, category },
            None => Eligibility::Reject(Rejection::NoCategory),
        }
    }

    /// Commit one acceptance: emit the sample, append the registry line,
    /// consume the year and total budgets. The category budget was already
    /// committed by the selector.
    fn accept(
        &mut self,
        origin: &Path,
        doc: &Document,
        id: &str,
        text: String,
        category: &Category,
    ) -> Result<(), Error> {
        let sample = ExtractedSample {
            id: id.to_string(),
            text,
            meta: SampleMetadata {
                year: doc.year,
                source: self.policy.source.clone(),
                lang: doc.language().clone(),
            },
        };
        self.writer.write(&sample)?;

        self.registry.record(&AcceptanceRecord {
            sample: self.policy.sample_name.clone(),
            id: id.to_string(),
            source: self.policy.source.clone(),
            year: doc.year,
            category: category.label(),
            origin: origin.display().to_string(),
        })?;

        self.quotas.decrement(QuotaKey::Year(doc.year));
        self.quotas.decrement(QuotaKey::Total);

        info!(
            "accepted {} ({}, {}, {})",
            id,
            self.policy.source,
            doc.year,
            category.label()
        );
        Ok(())
    }
}
