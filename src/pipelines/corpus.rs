/*! Corpus building pipeline.

Runs the sampler over every configured source in order, sharing one
registry, one category pool and one output stream, then shuffles the
emitted sample so its ordering carries no trace of the source/file
traversal order.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use itertools::Itertools;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{CategoryConfig, SamplingConfig};
use crate::document::ExtractedSample;
use crate::error::Error;
use crate::io::reader::topics::load_topic_map;
use crate::io::{ArchiveReader, SampleWriter};
use crate::sampling::{
    CategorySelector, DedupRegistry, FileOutcome, QuotaKey, QuotaTracker, SamplePolicy, Sampler,
    TermList, TopicSelector, ZoneExtractor,
};
use crate::sources;

use super::pipeline::Pipeline;

pub struct CorpusBuilder {
    config: SamplingConfig,
}

impl CorpusBuilder {
    pub fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    fn build_selector(&self) -> Result<CategorySelector, Error> {
        match &self.config.category {
            CategoryConfig::Keyword { terms } => {
                let terms = TermList::from_path(terms)?;
                info!("keyword pool: {} terms", terms.len());
                Ok(CategorySelector::Keyword(terms))
            }
            CategoryConfig::Topic {
                assignments,
                share_threshold,
                budgets,
            } => {
                let topics = load_topic_map(assignments, *share_threshold)?;
                Ok(CategorySelector::Topic(TopicSelector::new(
                    topics,
                    budgets.clone(),
                )))
            }
        }
    }

    /// Same as [Pipeline::run] but over a caller-supplied RNG, which is
    /// what the tests use.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<(), Error> {
        if !self.config.output_dir.exists() {
            warn!("output directory does not exist, creating");
            std::fs::create_dir_all(&self.config.output_dir)?;
        }

        let mut registry = DedupRegistry::open(&self.config.registry_path())?;
        let mut selector = self.build_selector()?;
        let extractor =
            ZoneExtractor::new(self.config.zones.iter().copied(), self.config.threshold);

        let sample_path = self.config.sample_path();
        let mut writer = SampleWriter::append(&sample_path)?;

        for source in &self.config.sources {
            info!(
                "[{}] sampling, total budget {}, per year {}",
                source.name,
                source.total,
                source
                    .years
                    .iter()
                    .sorted()
                    .map(|(year, count)| format!("{}:{}", year, count))
                    .join(" ")
            );

            let mut quotas = QuotaTracker::new(&source.years, source.total);
            let policy = SamplePolicy {
                sample_name: self.config.sample_name.clone(),
                source: source.name.clone(),
                language: self.config.language.clone(),
                min_year: self.config.min_year,
                min_chars: self.config.min_chars,
                max_chars: self.config.max_chars,
                multi_year: source.multi_year,
                per_file_cap: source.per_file_cap,
            };

            let mut files = sources::discover(&source.archives)?;
            if source.shuffle_files {
                files.shuffle(rng);
            }
            if let Some(limit) = source.file_limit {
                files.truncate(limit);
            }
            info!("[{}] {} archives", source.name, files.len());

            for file in &files {
                if quotas.exhausted(QuotaKey::Total) {
                    break;
                }
                if source.year_in_filename {
                    if let Some(year) = sources::year_hint(file) {
                        if quotas.exhausted(QuotaKey::Year(year)) {
                            debug!("skipping {:?}: year {} budget spent", file, year);
                            continue;
                        }
                    }
                }

                let documents = Self::read_archive(file)?;
                let mut sampler = Sampler::new(
                    &policy,
                    &extractor,
                    &mut quotas,
                    &mut registry,
                    &mut selector,
                    &mut writer,
                    rng,
                );
                match sampler.sample_file(file, documents)? {
                    FileOutcome::SourceDone => {
                        info!("[{}] total budget spent", source.name);
                        break;
                    }
                    outcome => debug!("{:?}: {:?}", file, outcome),
                }
            }

            info!(
                "[{}] done, {} of {} total budget unused",
                source.name,
                quotas.remaining(QuotaKey::Total),
                source.total
            );
        }

        writer.flush()?;
        drop(writer);

        info!("shuffling {:?}", sample_path);
        shuffle_samples(&sample_path, &self.config.shuffled_path(), rng)?;
        info!("sample {} finished", self.config.sample_name);
        Ok(())
    }

    fn read_archive(path: &Path) -> Result<Vec<crate::document::Document>, Error> {
        let documents: Vec<_> = ArchiveReader::from_path(path)?.collect::<Result<_, _>>()?;
        debug!("{:?}: {} documents", path, documents.len());
        Ok(documents)
    }
}

impl Pipeline<()> for CorpusBuilder {
    fn run(&self) -> Result<(), Error> {
        let mut rng = rand::thread_rng();
        self.run_with_rng(&mut rng)
    }
}

/// Rewrite the sample at `src` to `dst` in a fresh random order.
///
/// The pre- and post-shuffle record multisets are identical; only the
/// visible ordering changes.
pub fn shuffle_samples<R: Rng>(src: &Path, dst: &Path, rng: &mut R) -> Result<(), Error> {
    let reader = BufReader::new(File::open(src)?);
    let mut samples: Vec<ExtractedSample> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        samples.push(serde_json::from_str(&line)?);
    }

    samples.shuffle(rng);

    let mut writer = SampleWriter::new(BufWriter::new(File::create(dst)?));
    for sample in &samples {
        writer.write(sample)?;
    }
    writer.flush()
}
