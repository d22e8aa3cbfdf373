//! Test harness for isolated test execution.
//!
//! Each harness owns a temp directory holding a file-backed database and any
//! seed documents the test writes.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use jobboard::db::company_repo;
use jobboard::db::job_repo::{self, JobPostingRow};
use jobboard::db::stats_repo::{self, DatasetStats};
use jobboard::{AssociationManager, Config, Database, SeedDocument};

pub struct TestHarness {
    temp_dir: TempDir,
    pub db_path: PathBuf,
    pub db: Database,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("data").join("jobboard.db");
        let db = Database::open(&db_path).expect("Failed to open database");
        Self {
            temp_dir,
            db_path,
            db,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Config pointing at this harness's database.
    pub fn config(&self) -> Config {
        Config {
            database_path: Some(self.db_path.clone()),
            ..Default::default()
        }
    }

    /// Writes `document` as JSON under `name` and returns its path.
    pub fn write_json(&self, name: &str, document: &SeedDocument) -> PathBuf {
        let content = serde_json::to_string_pretty(document).expect("Failed to serialize seed");
        self.write_raw(name, &content)
    }

    /// Writes `document` as YAML under `name` and returns its path.
    pub fn write_yaml(&self, name: &str, document: &SeedDocument) -> PathBuf {
        let content = serde_yaml::to_string(document).expect("Failed to serialize seed");
        self.write_raw(name, &content)
    }

    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::write(&path, content).expect("Failed to write seed file");
        path
    }

    pub fn stats(&self) -> DatasetStats {
        stats_repo::snapshot(&self.db).expect("Failed to read stats")
    }

    /// Jobs of `company`, in insertion order.
    pub fn jobs_of(&self, company: &str) -> Vec<JobPostingRow> {
        self.db
            .with_conn(|conn| {
                let row = company_repo::find_by_name(conn, company)?
                    .unwrap_or_else(|| panic!("company '{}' not stored", company));
                job_repo::list_by_company(conn, row.id)
            })
            .expect("Failed to list jobs")
    }

    /// Sorted names of the positions linked to `job_id`.
    pub fn position_names(&self, job_id: i64) -> Vec<String> {
        let mut names: Vec<String> = AssociationManager::new(self.db.clone())
            .associations_for(job_id)
            .expect("Failed to read associations")
            .into_iter()
            .map(|p| p.name)
            .collect();
        names.sort();
        names
    }

    /// Positions of the single job titled `title` at `company`.
    pub fn positions_of(&self, company: &str, title: &str) -> Vec<String> {
        let job = self
            .jobs_of(company)
            .into_iter()
            .find(|j| j.title == title)
            .unwrap_or_else(|| panic!("job '{}' not stored", title));
        self.position_names(job.id)
    }
}
