//! Build pipeline: fetch → scan → classify → cross-link.
//!
//! 1. For every number in the range, load the specification document through
//!    the cache and keep its title and allow-listed call heads.
//! 2. For every implementation manifest, open its archive and collect the
//!    specification numbers its file layout names.
//! 3. Assemble the index; supporting implementations are linked in id order.
//!
//! A failed item never aborts the build. It is recorded with an empty payload
//! (empty title and no symbols, or no supported numbers) so the output range
//! stays dense, and the failure goes into the [`BuildReport`].

use std::collections::BTreeSet;

use futures::stream::{self, StreamExt};
use srfi_core::{Implementation, ImplementationManifest, SpecRange, Specification, UrlTemplate};
use srfi_fetch::{ContentCache, Transport};
use srfi_parser::{ArchiveIndex, HtmlCodeSpans, SpecDocument, TokenExtractor, is_symbol};

use crate::error::IndexError;
use crate::model::SrfiIndex;
use crate::report::{BuildFailure, BuildReport};

/// One finished unit of work, for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep<'a> {
    Specification(u32),
    Implementation(&'a str),
}

type ProgressHook<'a> = Box<dyn Fn(BuildStep<'_>) + Send + Sync + 'a>;

pub struct IndexBuilder<'a, T: Transport> {
    cache: &'a ContentCache<T>,
    range: SpecRange,
    official: UrlTemplate,
    mirror: UrlTemplate,
    manifests: Vec<ImplementationManifest>,
    extractor: Box<dyn TokenExtractor + 'a>,
    concurrency: usize,
    on_step: Option<ProgressHook<'a>>,
}

/// Result of [`IndexBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub index: SrfiIndex,
    pub report: BuildReport,
}

impl<'a, T: Transport> IndexBuilder<'a, T> {
    /// Builder over the default range and URL templates, no implementations,
    /// HTML extraction, one fetch at a time.
    #[must_use]
    pub fn new(cache: &'a ContentCache<T>) -> Self {
        Self {
            cache,
            range: SpecRange::default(),
            official: UrlTemplate::official(),
            mirror: UrlTemplate::mirror(),
            manifests: Vec::new(),
            extractor: Box::new(HtmlCodeSpans),
            concurrency: 1,
            on_step: None,
        }
    }

    #[must_use]
    pub const fn range(mut self, range: SpecRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn urls(mut self, official: UrlTemplate, mirror: UrlTemplate) -> Self {
        self.official = official;
        self.mirror = mirror;
        self
    }

    #[must_use]
    pub fn implementations(mut self, manifests: Vec<ImplementationManifest>) -> Self {
        self.manifests = manifests;
        self
    }

    #[must_use]
    pub fn extractor(mut self, extractor: impl TokenExtractor + 'a) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Maximum in-flight fetches. Zero is treated as one.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn on_step(mut self, hook: impl Fn(BuildStep<'_>) + Send + Sync + 'a) -> Self {
        self.on_step = Some(Box::new(hook));
        self
    }

    /// Number of steps [`Self::build`] reports.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.range.len() + self.manifests.len()
    }

    pub async fn build(&self) -> BuildOutcome {
        tracing::info!(
            min = self.range.min,
            max = self.range.max,
            concurrency = self.concurrency,
            "building specification entries"
        );
        let mut specs: Vec<(Specification, Option<BuildFailure>)> =
            stream::iter(self.range.numbers())
                .map(|number| self.build_specification(number))
                .buffer_unordered(self.concurrency)
                .collect()
                .await;
        specs.sort_by_key(|(spec, _)| spec.number);

        tracing::info!(
            count = self.manifests.len(),
            "scanning implementation archives"
        );
        let mut manifests: Vec<&ImplementationManifest> = self.manifests.iter().collect();
        manifests.sort_by(|a, b| a.id.cmp(&b.id));
        let implementations: Vec<(Implementation, Vec<BuildFailure>)> = stream::iter(manifests)
            .map(|manifest| self.build_implementation(manifest))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut failures = Vec::new();
        let mut specifications = Vec::with_capacity(specs.len());
        for (spec, failure) in specs {
            failures.extend(failure);
            specifications.push(spec);
        }
        let mut supported = Vec::with_capacity(implementations.len());
        for (implementation, errors) in implementations {
            failures.extend(errors);
            supported.push(implementation);
        }

        let index = SrfiIndex::assemble(specifications, supported);
        let report = BuildReport {
            specifications: index.specifications().count(),
            symbols: index.symbol_count(),
            implementations: index.implementations().count(),
            failures,
        };
        BuildOutcome { index, report }
    }

    async fn build_specification(&self, number: u32) -> (Specification, Option<BuildFailure>) {
        let mut spec = Specification::empty(
            number,
            self.official.render(number),
            self.mirror.render(number),
        );
        let failure = match self.scan_specification(number).await {
            Ok((title, symbols)) => {
                tracing::debug!(number, symbols = symbols.len(), "indexed specification");
                spec.title = title;
                spec.symbols = symbols;
                None
            }
            Err(error) => {
                tracing::warn!(number, %error, "specification recorded without data");
                Some(BuildFailure::specification(number, &error))
            }
        };
        self.step(BuildStep::Specification(number));
        (spec, failure)
    }

    async fn scan_specification(
        &self,
        number: u32,
    ) -> Result<(String, BTreeSet<String>), IndexError> {
        let document =
            SpecDocument::load(number, self.cache, &self.mirror, self.extractor.as_ref())
                .await?;
        let title = document
            .title()
            .map_err(|error| IndexError::Document(error.into()))?;
        let symbols = document
            .candidate_tokens()
            .iter()
            .filter(|token| is_symbol(token))
            .cloned()
            .collect();
        Ok((title, symbols))
    }

    async fn build_implementation(
        &self,
        manifest: &ImplementationManifest,
    ) -> (Implementation, Vec<BuildFailure>) {
        let mut failures = Vec::new();
        let numbers = match self.scan_archive(manifest).await {
            Ok(numbers) => numbers,
            Err(error) => {
                tracing::warn!(id = %manifest.id, %error, "implementation recorded without data");
                failures.push(BuildFailure::implementation(&manifest.id, &error));
                Vec::new()
            }
        };

        let mut specifications_supported = BTreeSet::new();
        for number in numbers {
            if self.range.contains(number) {
                specifications_supported.insert(number);
            } else {
                let error = IndexError::OutOfRange { number };
                tracing::warn!(id = %manifest.id, %error, "archive entry not linked");
                failures.push(BuildFailure::implementation(&manifest.id, &error));
            }
        }
        tracing::debug!(
            id = %manifest.id,
            supported = specifications_supported.len(),
            "indexed implementation"
        );
        self.step(BuildStep::Implementation(&manifest.id));

        let implementation = Implementation {
            id: manifest.id.clone(),
            title: manifest.title.clone(),
            homepage_url: manifest.homepage_url.clone(),
            specifications_supported,
        };
        (implementation, failures)
    }

    async fn scan_archive(&self, manifest: &ImplementationManifest) -> Result<Vec<u32>, IndexError> {
        let bytes = self
            .cache
            .fetch(&manifest.cache_key(), &manifest.archive_url)
            .await?;
        let archive = ArchiveIndex::open(bytes)?;
        Ok(archive.entries_matching(&manifest.pattern)?)
    }

    fn step(&self, step: BuildStep<'_>) {
        if let Some(hook) = &self.on_step {
            hook(step);
        }
    }
}
