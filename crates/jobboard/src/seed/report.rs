use serde::Serialize;

/// Counts collected over one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub companies_processed: usize,
    pub companies_skipped: usize,
    /// Job postings in the document, valid or not.
    pub jobs_expected: usize,
    pub jobs_created: usize,
    /// Postings matched to ones stored by an earlier run.
    pub jobs_reused: usize,
    pub jobs_skipped: usize,
    pub associations_created: usize,
    pub orphans_repaired: usize,
    pub positions_seeded: usize,
    pub positions_created: usize,
    pub failures: Vec<String>,
}

impl SeedReport {
    /// Jobs the run left stored, new or reused.
    pub fn jobs_stored(&self) -> usize {
        self.jobs_created + self.jobs_reused
    }

    /// Whether every job posting in the document ended up stored.
    pub fn is_complete(&self) -> bool {
        self.jobs_stored() == self.jobs_expected
    }

    pub fn summary(&self) -> String {
        format!(
            "{}/{} jobs stored ({} new, {} reused, {} skipped), {} links, {} orphans repaired, {} new positions, {} failures",
            self.jobs_stored(),
            self.jobs_expected,
            self.jobs_created,
            self.jobs_reused,
            self.jobs_skipped,
            self.associations_created,
            self.orphans_repaired,
            self.positions_created,
            self.failures.len()
        )
    }
}
