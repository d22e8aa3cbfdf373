//! Process entry points: seeding at startup and the standalone re-seed.

use std::path::Path;

use serde::Serialize;
use tracing::{error, info, info_span, warn};

use crate::config::Config;
use crate::db::stats_repo::{self, DatasetStats};
use crate::db::{flag_repo, job_repo, position_repo, Database};
use crate::error::Result;
use crate::reconcile::Reconciler;
use crate::seed::{SeedDocument, SeedReport, Seeder};

/// Why startup decided to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeedTrigger {
    EmptyDataset,
    ConfigReseed,
    FlaggedReseed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupOutcome {
    /// `None` when the dataset was left as is.
    pub trigger: Option<SeedTrigger>,
    pub links_reset: usize,
    pub report: Option<SeedReport>,
    /// Set when seeding was attempted and failed. Startup still succeeds.
    pub seed_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReseedOutcome {
    pub before: DatasetStats,
    pub after: DatasetStats,
    pub links_reset: usize,
    pub report: SeedReport,
}

fn seed_trigger(db: &Database, config: &Config) -> Result<Option<SeedTrigger>> {
    let (positions, jobs, flagged) = db.with_conn(|conn| {
        Ok((
            position_repo::count(conn)?,
            job_repo::count(conn)?,
            flag_repo::is_set(conn, flag_repo::RESEED_REQUESTED)?,
        ))
    })?;
    info!(positions, jobs, flagged, "dataset state at startup");

    let trigger = if positions == 0 || jobs == 0 {
        Some(SeedTrigger::EmptyDataset)
    } else if config.reseed {
        Some(SeedTrigger::ConfigReseed)
    } else if flagged {
        Some(SeedTrigger::FlaggedReseed)
    } else {
        None
    };
    Ok(trigger)
}

/// Seeds the dataset when it is empty or a re-seed was requested.
///
/// The seed document is read first. Existing links are reset only once it
/// parsed, so none survive from the previous dataset and an unreadable
/// document leaves the dataset untouched. A failed seed is logged and
/// reported, not returned as an error; only storage failures while
/// inspecting or resetting the dataset are.
pub fn initialize(db: &Database, config: &Config, seed_file: &Path) -> Result<StartupOutcome> {
    let _span = info_span!("startup").entered();

    let Some(trigger) = seed_trigger(db, config)? else {
        info!("dataset present, skipping seed");
        return Ok(StartupOutcome {
            trigger: None,
            links_reset: 0,
            report: None,
            seed_error: None,
        });
    };
    info!(?trigger, seed_file = %seed_file.display(), "seeding dataset");

    let document = match SeedDocument::load(seed_file) {
        Ok(document) => document,
        Err(e) => {
            error!(error = %e, "seed document unusable, continuing with the current dataset");
            return Ok(StartupOutcome {
                trigger: Some(trigger),
                links_reset: 0,
                report: None,
                seed_error: Some(e.to_string()),
            });
        }
    };

    let jobs = db.with_conn(job_repo::count)?;
    let links_reset = if jobs > 0 {
        Reconciler::new(db.clone()).reset_associations()?
    } else {
        0
    };

    let seeder = Seeder::new(db.clone()).with_default_position(&config.default_position);
    match seeder.seed(&document) {
        Ok(report) => {
            db.with_conn(|conn| flag_repo::clear(conn, flag_repo::RESEED_REQUESTED))?;
            info!(summary = %report.summary(), "startup seed complete");
            Ok(StartupOutcome {
                trigger: Some(trigger),
                links_reset,
                report: Some(report),
                seed_error: None,
            })
        }
        Err(e) => {
            error!(error = %e, "startup seed failed, continuing with the current dataset");
            Ok(StartupOutcome {
                trigger: Some(trigger),
                links_reset,
                report: None,
                seed_error: Some(e.to_string()),
            })
        }
    }
}

/// Resets every link and seeds `seed_file` again, outside normal startup.
///
/// Unlike [`initialize`], a seed failure is returned to the caller. A
/// document that cannot be read or parsed fails before any link is removed.
pub fn reset_and_reseed(db: &Database, config: &Config, seed_file: &Path) -> Result<ReseedOutcome> {
    let _span = info_span!("reset_and_reseed").entered();

    let document = SeedDocument::load(seed_file)?;

    let before = stats_repo::snapshot(db)?;
    info!(
        positions = before.positions,
        jobs = before.jobs,
        associations = before.associations,
        "dataset before re-seed"
    );

    let links_reset = Reconciler::new(db.clone()).reset_associations()?;
    let report = Seeder::new(db.clone())
        .with_default_position(&config.default_position)
        .seed(&document)?;

    if let Err(e) = db.with_conn(|conn| flag_repo::clear(conn, flag_repo::RESEED_REQUESTED)) {
        warn!(error = %e, "could not clear re-seed flag");
    }

    let after = stats_repo::snapshot(db)?;
    info!(
        positions = after.positions,
        jobs = after.jobs,
        associations = after.associations,
        "dataset after re-seed"
    );

    Ok(ReseedOutcome {
        before,
        after,
        links_reset,
        report,
    })
}
