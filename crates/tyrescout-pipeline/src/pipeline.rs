//! Stage sequencing: Collected → Enhanced → Reviewed.
//!
//! Each stage is a full batch pass that ends by writing its snapshot, so a
//! failure leaves the previous stage's file untouched and re-runnable.
//! Provider failures inside a stage are per query or per record: they are
//! logged and the batch continues.

use std::path::PathBuf;

use tyrescout_core::{AppConfig, BusinessRecord, SearchPlan};
use tyrescout_scraper::Throttle;

use crate::classify::classify_record;
use crate::dedup::{dedup_records, Deduplicator};
use crate::error::PipelineError;
use crate::extract::apply_extraction;
use crate::normalize::normalize_record;
use crate::review::{review_records, ReviewOutcome};
use crate::snapshot::{read_snapshot, snapshot_path, write_snapshot, Stage};
use crate::sources::{PageSource, PlacesSearch};

/// Collect stage: search every area with every template.
pub struct Collector<P> {
    places: P,
    plan: SearchPlan,
    data_dir: PathBuf,
    search_delay_ms: u64,
    fetch_place_details: bool,
}

impl<P: PlacesSearch> Collector<P> {
    #[must_use]
    pub fn new(config: &AppConfig, plan: SearchPlan, places: P) -> Self {
        Self {
            places,
            plan,
            data_dir: config.data_dir.clone(),
            search_delay_ms: config.search_delay_ms,
            fetch_place_details: config.fetch_place_details,
        }
    }

    /// Runs every query, dedups per area and then globally, optionally looks
    /// up contact details, normalizes, and writes the collected snapshot.
    ///
    /// # Errors
    ///
    /// Only snapshot write failures. Search failures are logged per query.
    pub async fn collect(&self) -> Result<Vec<BusinessRecord>, PipelineError> {
        let mut throttle = Throttle::from_millis(self.search_delay_ms);
        let mut pooled = Vec::new();

        for area in &self.plan.areas {
            let mut area_dedup = Deduplicator::new();
            for query in self.plan.queries_for(area) {
                throttle.wait().await;
                match self.places.search(&query, &self.plan.region).await {
                    Ok(hits) => {
                        tracing::debug!(%query, hits = hits.len(), "search complete");
                        pooled.extend(
                            hits.into_iter()
                                .filter(|hit| area_dedup.admit(&hit.external_id))
                                .map(|hit| hit.into_record(&query, area)),
                        );
                    }
                    Err(e) => {
                        tracing::warn!(%query, error = %e, "search failed; skipping query");
                    }
                }
            }
            tracing::info!(%area, unique = area_dedup.len(), "area searched");
        }

        let mut records = dedup_records(pooled);
        if self.fetch_place_details {
            self.fill_contact_details(&mut records, &mut throttle).await;
        }
        records.iter_mut().for_each(normalize_record);

        tracing::info!(records = records.len(), "collect stage complete");
        write_snapshot(&self.data_dir, Stage::Collected, &records)?;
        Ok(records)
    }

    async fn fill_contact_details(&self, records: &mut [BusinessRecord], throttle: &mut Throttle) {
        for record in records.iter_mut() {
            if record.website.is_some() && record.phone_number.is_some() {
                continue;
            }
            throttle.wait().await;
            match self.places.details(&record.external_id).await {
                Ok(details) => {
                    if record.website.is_none() {
                        record.website = details.website;
                    }
                    if record.phone_number.is_none() {
                        record.phone_number = details.phone;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        external_id = %record.external_id,
                        error = %e,
                        "details lookup failed; keeping search fields"
                    );
                }
            }
        }
    }
}

/// Enhance stage: fetch websites, extract fields, classify.
pub struct Enhancer<S> {
    pages: S,
    data_dir: PathBuf,
    page_delay_ms: u64,
}

impl<S: PageSource> Enhancer<S> {
    #[must_use]
    pub fn new(config: &AppConfig, pages: S) -> Self {
        Self {
            pages,
            data_dir: config.data_dir.clone(),
            page_delay_ms: config.page_delay_ms,
        }
    }

    /// Loads the collected snapshot and runs [`Enhancer::enhance_records`].
    ///
    /// # Errors
    ///
    /// [`PipelineError::MissingSnapshot`] if nothing has been collected, or
    /// any snapshot read/write failure.
    pub async fn enhance(&self) -> Result<Vec<BusinessRecord>, PipelineError> {
        let records = read_snapshot(&self.data_dir, Stage::Collected)?;
        let (records, _) = self.enhance_records(records).await?;
        Ok(records)
    }

    /// Writes the enhanced snapshot and returns the records with the number
    /// of pages read.
    ///
    /// # Errors
    ///
    /// Only snapshot write failures. Fetch failures are logged per record.
    pub async fn enhance_records(
        &self,
        mut records: Vec<BusinessRecord>,
    ) -> Result<(Vec<BusinessRecord>, usize), PipelineError> {
        let mut throttle = Throttle::from_millis(self.page_delay_ms);
        let mut pages_fetched = 0;

        for record in &mut records {
            let page_text = match record.website.clone() {
                Some(url) => {
                    throttle.wait().await;
                    match self.pages.fetch_text(&url).await {
                        Ok(text) => {
                            pages_fetched += 1;
                            Some(text)
                        }
                        Err(e) => {
                            tracing::warn!(
                                external_id = %record.external_id,
                                %url,
                                error = %e,
                                "page fetch failed; record left unchanged"
                            );
                            None
                        }
                    }
                }
                None => None,
            };

            if let Some(text) = page_text.as_deref() {
                let filled = apply_extraction(record, text);
                tracing::debug!(external_id = %record.external_id, filled, "fields extracted");
            }
            classify_record(record, page_text.as_deref());
        }

        let classified = records.iter().filter(|r| r.company_type.is_some()).count();
        tracing::info!(
            records = records.len(),
            pages_fetched,
            classified,
            "enhance stage complete"
        );
        write_snapshot(&self.data_dir, Stage::Enhanced, &records)?;
        Ok((records, pages_fetched))
    }
}

/// Review stage: statistics, optional defaults, cleanup, scoring.
pub struct Reviewer {
    data_dir: PathBuf,
    apply_defaults: bool,
}

impl Reviewer {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            apply_defaults: config.review_apply_defaults,
        }
    }

    /// Overrides the configured review-defaults switch.
    #[must_use]
    pub fn with_apply_defaults(mut self, apply_defaults: bool) -> Self {
        self.apply_defaults = apply_defaults;
        self
    }

    /// Loads the enhanced snapshot and runs [`Reviewer::review_from`].
    ///
    /// # Errors
    ///
    /// [`PipelineError::MissingSnapshot`] if nothing has been enhanced, or
    /// any snapshot read/write failure.
    pub fn review(&self) -> Result<(Vec<BusinessRecord>, ReviewOutcome), PipelineError> {
        let records = read_snapshot(&self.data_dir, Stage::Enhanced)?;
        self.review_from(records)
    }

    /// Reviews `records` and writes the final snapshot.
    ///
    /// # Errors
    ///
    /// Only snapshot write failures.
    pub fn review_from(
        &self,
        mut records: Vec<BusinessRecord>,
    ) -> Result<(Vec<BusinessRecord>, ReviewOutcome), PipelineError> {
        let outcome = review_records(&mut records, self.apply_defaults);
        write_snapshot(&self.data_dir, Stage::Reviewed, &records)?;
        Ok((records, outcome))
    }

    #[must_use]
    pub fn final_snapshot(&self) -> PathBuf {
        snapshot_path(&self.data_dir, Stage::Reviewed)
    }
}

/// Counts from a full `run`.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub collected: usize,
    pub pages_fetched: usize,
    pub review: ReviewOutcome,
    pub final_snapshot: PathBuf,
}

/// All three stages over one configuration.
pub struct Pipeline<P, S> {
    collector: Collector<P>,
    enhancer: Enhancer<S>,
    reviewer: Reviewer,
}

impl<P, S> Pipeline<P, S>
where
    P: PlacesSearch,
    S: PageSource,
{
    #[must_use]
    pub fn new(config: &AppConfig, plan: SearchPlan, places: P, pages: S) -> Self {
        Self {
            collector: Collector::new(config, plan, places),
            enhancer: Enhancer::new(config, pages),
            reviewer: Reviewer::new(config),
        }
    }

    #[must_use]
    pub fn with_apply_defaults(mut self, apply_defaults: bool) -> Self {
        self.reviewer = self.reviewer.with_apply_defaults(apply_defaults);
        self
    }

    /// See [`Collector::collect`].
    ///
    /// # Errors
    ///
    /// Snapshot write failures.
    pub async fn collect(&self) -> Result<Vec<BusinessRecord>, PipelineError> {
        self.collector.collect().await
    }

    /// See [`Enhancer::enhance`].
    ///
    /// # Errors
    ///
    /// Missing collected snapshot or snapshot I/O failures.
    pub async fn enhance(&self) -> Result<Vec<BusinessRecord>, PipelineError> {
        self.enhancer.enhance().await
    }

    /// See [`Reviewer::review`].
    ///
    /// # Errors
    ///
    /// Missing enhanced snapshot or snapshot I/O failures.
    pub fn review(&self) -> Result<(Vec<BusinessRecord>, ReviewOutcome), PipelineError> {
        self.reviewer.review()
    }

    /// Collect, enhance and review in one invocation.
    ///
    /// # Errors
    ///
    /// The first snapshot write failure; earlier snapshots remain on disk.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let collected = self.collector.collect().await?;
        let collected_count = collected.len();
        let (enhanced, pages_fetched) = self.enhancer.enhance_records(collected).await?;
        let (_, review) = self.reviewer.review_from(enhanced)?;
        Ok(RunSummary {
            collected: collected_count,
            pages_fetched,
            review,
            final_snapshot: self.reviewer.final_snapshot(),
        })
    }
}
