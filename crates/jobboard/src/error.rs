use std::path::PathBuf;
use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum JobboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed source error: {0}")]
    Parse(#[from] ParseError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Association error: {0}")]
    Association(#[from] AssociationError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Failures reading the seed document. Always fatal to a seeding run.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read seed file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed seed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported seed file format: {0}")]
    UnsupportedFormat(String),

    #[error("Seed document contains no companies")]
    NoCompanies,
}

/// Failures resolving a company or position. The affected record is skipped.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Position name is empty")]
    EmptyName,

    #[error("Failed to resolve position '{name}': {source}")]
    Position {
        name: String,
        #[source]
        source: DatabaseError,
    },

    #[error("Failed to resolve company '{name}': {source}")]
    Company {
        name: String,
        #[source]
        source: DatabaseError,
    },

    #[error("Failed to list positions: {0}")]
    List(#[source] DatabaseError),
}

/// Failures touching a job's links. The job keeps its previous link set.
#[derive(Error, Debug)]
pub enum AssociationError {
    #[error("Failed to clear positions of job {job_id}: {source}")]
    Clear {
        job_id: i64,
        #[source]
        source: DatabaseError,
    },

    #[error("Failed to link positions to job {job_id}: {source}")]
    Link {
        job_id: i64,
        #[source]
        source: DatabaseError,
    },

    #[error("Failed to read positions of job {job_id}: {source}")]
    Lookup {
        job_id: i64,
        #[source]
        source: DatabaseError,
    },

    #[error("Failed to query jobs without positions: {0}")]
    Orphans(#[source] DatabaseError),

    #[error("Failed to reset associations: {0}")]
    Reset(#[source] DatabaseError),
}

/// A multi-table unit of work failed and was rolled back in full.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Step '{step}' failed, transaction rolled back: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: DatabaseError,
    },

    #[error("Transaction failed: {0}")]
    Storage(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, JobboardError>;
