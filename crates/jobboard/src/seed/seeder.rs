use std::collections::{HashMap, VecDeque};
use std::path::Path;

use tracing::{debug, info, info_span, warn};

use crate::association::AssociationManager;
use crate::canonical::{normalize, DEFAULT_POSITION};
use crate::db::company_repo::{self, CompanyRow, NewCompany};
use crate::db::job_repo::{self, JobPostingRow, NewJobPosting};
use crate::db::position_repo::PositionRow;
use crate::db::{stats_repo, Database};
use crate::error::{ParseError, RegistryError};
use crate::reconcile::Reconciler;
use crate::registry::{PositionIndex, PositionRegistry};

use super::report::SeedReport;
use super::source::{SeedCompany, SeedDocument, SeedJobPosting};

/// Drives the registry and association manager from a seed document.
///
/// Re-running a document is safe. Each job posting entry is matched to the
/// posting it created on an earlier run (same company, same title, same
/// position among equally titled entries) and its links are replaced, so
/// neither jobs nor links are duplicated.
///
/// Matching only looks at stored rows, not where they came from. A posting
/// added outside seeding under the same company and title is taken over by
/// the first matching entry, and its links are replaced by the entry's.
pub struct Seeder {
    db: Database,
    registry: PositionRegistry,
    associations: AssociationManager,
    reconciler: Reconciler,
    default_position: String,
}

/// Where the positions of one job come from.
enum LabelSource<'a> {
    Raw(&'a [String]),
    Default,
}

impl Seeder {
    pub fn new(db: Database) -> Self {
        Self {
            registry: PositionRegistry::new(db.clone()),
            associations: AssociationManager::new(db.clone()),
            reconciler: Reconciler::new(db.clone()),
            default_position: DEFAULT_POSITION.to_string(),
            db,
        }
    }

    /// Overrides the position used for jobs without labels and for orphans.
    ///
    /// The name is canonicalized first, so both paths link to the same row
    /// whatever casing the caller used.
    pub fn with_default_position(mut self, name: impl AsRef<str>) -> Self {
        self.reconciler = self.reconciler.with_default_position(name);
        self.default_position = self.reconciler.default_position().to_string();
        self
    }

    /// Loads the document at `path` and seeds it.
    pub fn seed_file<P: AsRef<Path>>(&self, path: P) -> Result<SeedReport, ParseError> {
        let document = SeedDocument::load(path)?;
        self.seed(&document)
    }

    /// Seeds a parsed document.
    ///
    /// Only an empty document is fatal. Records that fail to persist are
    /// logged, counted as skipped, and listed in the report's failures.
    pub fn seed(&self, document: &SeedDocument) -> Result<SeedReport, ParseError> {
        document.ensure_not_empty()?;

        let _span = info_span!("seed_run", companies = document.companies.len()).entered();
        let mut report = SeedReport {
            jobs_expected: document.job_count(),
            ..Default::default()
        };

        let standard = self.registry.seed_standard();
        report.positions_seeded = standard.len();
        let mut index = self.build_index(standard, &mut report);

        for (i, company) in document.companies.iter().enumerate() {
            let _company_span = info_span!("seed_company", index = i + 1, name = %company.name).entered();
            self.seed_company(company, &mut index, &mut report);
        }

        match self.reconciler.sweep() {
            Ok(sweep) => {
                report.orphans_repaired = sweep.repaired;
                report.failures.extend(sweep.failures);
            }
            Err(e) => {
                warn!(error = %e, "reconciliation sweep failed");
                report.failures.push(format!("sweep: {}", e));
            }
        }

        self.log_dataset();
        info!(
            jobs_created = report.jobs_created,
            jobs_reused = report.jobs_reused,
            associations_created = report.associations_created,
            orphans_repaired = report.orphans_repaired,
            "seeding finished"
        );
        Ok(report)
    }

    /// Lookup over every persisted position, not just the standard ones, so
    /// positions created by earlier runs are matched rather than recreated.
    fn build_index(&self, standard: Vec<PositionRow>, report: &mut SeedReport) -> PositionIndex {
        match self.registry.list() {
            Ok(all) => PositionIndex::from_positions(all),
            Err(e) => {
                warn!(error = %e, "falling back to standard positions for lookup");
                report.failures.push(e.to_string());
                PositionIndex::from_positions(standard)
            }
        }
    }

    fn seed_company(&self, company: &SeedCompany, index: &mut PositionIndex, report: &mut SeedReport) {
        if !company.is_valid() {
            warn!("skipping company without a name");
            report.companies_skipped += 1;
            report.jobs_skipped += company.job_postings.len();
            report.failures.push("company without a name skipped".to_string());
            return;
        }

        let stored = match self.resolve_company(company) {
            Ok(row) => row,
            Err(e) => {
                warn!(error = %e, "skipping company");
                report.companies_skipped += 1;
                report.jobs_skipped += company.job_postings.len();
                report.failures.push(e.to_string());
                return;
            }
        };
        report.companies_processed += 1;

        let mut existing = self.existing_jobs(&stored, report);
        debug!(company_id = stored.id, jobs = company.job_postings.len(), "processing job postings");

        for (i, job) in company.job_postings.iter().enumerate() {
            let _job_span = info_span!("seed_job", index = i + 1, title = %job.title).entered();
            self.seed_job(&stored, job, &mut existing, index, report);
        }
    }

    fn resolve_company(&self, company: &SeedCompany) -> Result<CompanyRow, RegistryError> {
        let new_company = NewCompany {
            name: company.name.clone(),
            address: company.address.clone(),
            industry: company.industry.clone(),
            website: company.website.clone(),
            logo_url: company.logo_url.clone(),
        };
        let (row, created) = self
            .db
            .with_conn(|conn| company_repo::find_or_create(conn, &new_company))
            .map_err(|source| RegistryError::Company {
                name: company.name.clone(),
                source,
            })?;
        info!(company_id = row.id, created, "company resolved");
        Ok(row)
    }

    /// Postings already stored for a company, queued per title in id order.
    fn existing_jobs(
        &self,
        company: &CompanyRow,
        report: &mut SeedReport,
    ) -> HashMap<String, VecDeque<JobPostingRow>> {
        let mut by_title: HashMap<String, VecDeque<JobPostingRow>> = HashMap::new();
        match self.db.with_conn(|conn| job_repo::list_by_company(conn, company.id)) {
            Ok(rows) => {
                for row in rows {
                    by_title.entry(row.title.clone()).or_default().push_back(row);
                }
            }
            Err(e) => {
                warn!(error = %e, "could not read existing postings, all entries will be inserted");
                report.failures.push(e.to_string());
            }
        }
        by_title
    }

    fn seed_job(
        &self,
        company: &CompanyRow,
        job: &SeedJobPosting,
        existing: &mut HashMap<String, VecDeque<JobPostingRow>>,
        index: &mut PositionIndex,
        report: &mut SeedReport,
    ) {
        if !job.is_valid() {
            warn!("skipping job posting without a title");
            report.jobs_skipped += 1;
            report
                .failures
                .push(format!("job posting without a title skipped ({})", company.name));
            return;
        }

        let stored = match existing.get_mut(&job.title).and_then(VecDeque::pop_front) {
            Some(row) => {
                debug!(job_id = row.id, uuid = %row.uuid, "reusing job posting");
                report.jobs_reused += 1;
                row
            }
            None => match self.insert_job(company, job) {
                Ok(row) => {
                    debug!(job_id = row.id, uuid = %row.uuid, "created job posting");
                    report.jobs_created += 1;
                    row
                }
                Err(e) => {
                    warn!(error = %e, "failed to create job posting");
                    report.jobs_skipped += 1;
                    report.failures.push(format!("job '{}': {}", job.title, e));
                    return;
                }
            },
        };

        let source = if job.positions.is_empty() {
            LabelSource::Default
        } else {
            LabelSource::Raw(&job.positions)
        };
        let position_ids = self.resolve_positions(source, index, report);
        if position_ids.is_empty() {
            warn!(job_id = stored.id, "no position resolved, leaving job for the sweep");
            return;
        }

        match self.associations.link(stored.id, position_ids) {
            Ok(linked) => report.associations_created += linked,
            Err(e) => {
                warn!(error = %e, "failed to link positions");
                report.failures.push(e.to_string());
            }
        }
    }

    fn insert_job(
        &self,
        company: &CompanyRow,
        job: &SeedJobPosting,
    ) -> Result<JobPostingRow, crate::db::DatabaseError> {
        let new_job = NewJobPosting {
            uuid: None,
            company_id: company.id,
            title: job.title.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            salary_range: job.salary_range.clone(),
            location: job.location.clone(),
            employment_type: job.employment_type.clone(),
            status: job.status.clone(),
        };
        self.db.with_conn(|conn| job_repo::insert(conn, &new_job))
    }

    fn resolve_positions(
        &self,
        source: LabelSource<'_>,
        index: &mut PositionIndex,
        report: &mut SeedReport,
    ) -> Vec<i64> {
        let canonical: Vec<String> = match source {
            LabelSource::Default => vec![self.default_position.clone()],
            LabelSource::Raw(labels) => labels
                .iter()
                .filter(|label| !label.trim().is_empty())
                .map(|label| normalize(label))
                .collect(),
        };

        let mut ids = Vec::with_capacity(canonical.len());
        for name in canonical {
            if let Some(position) = index.get(&name) {
                debug!(position_id = position.id, name = %position.name, "matched position");
                ids.push(position.id);
                continue;
            }

            match self.registry.resolve_tracked(&name) {
                Ok((position, created)) => {
                    if created {
                        report.positions_created += 1;
                        info!(position_id = position.id, name = %position.name, "created position");
                    }
                    ids.push(position.id);
                    index.insert(position);
                }
                Err(e) => {
                    warn!(error = %e, "position not resolved");
                    report.failures.push(e.to_string());
                }
            }
        }
        ids
    }

    fn log_dataset(&self) {
        match stats_repo::snapshot(&self.db) {
            Ok(stats) => {
                info!(
                    positions = stats.positions,
                    jobs = stats.jobs,
                    associations = stats.associations,
                    "dataset after seeding"
                );
                for stat in &stats.by_position {
                    debug!(position = %stat.name, jobs = stat.job_count, "position usage");
                }
            }
            Err(e) => warn!(error = %e, "could not collect dataset statistics"),
        }
    }
}
