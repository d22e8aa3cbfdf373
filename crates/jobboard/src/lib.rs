pub mod association;
pub mod canonical;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod ops;
pub mod reconcile;
pub mod registry;
pub mod reset;
pub mod seed;
pub mod startup;

pub use association::AssociationManager;
pub use canonical::{normalize, DEFAULT_POSITION, STANDARD_POSITIONS};
pub use config::{load_config, resolve_seed_path, Config, Environment, LogFormat, LoggingConfig};
pub use db::stats_repo::DatasetStats;
pub use db::{Database, DatabaseError};
pub use error::{
    AssociationError, ConfigError, JobboardError, ParseError, RegistryError, Result,
    TransactionError,
};
pub use ops::{OperationOutcome, Operations};
pub use reconcile::{Reconciler, SweepReport};
pub use registry::{PositionIndex, PositionRegistry};
pub use reset::{reset_all, reset_all_and_request_reseed, ResetReport};
pub use seed::{SeedCompany, SeedDocument, SeedJobPosting, SeedReport, Seeder, SourceFormat};
pub use startup::{initialize, reset_and_reseed, ReseedOutcome, SeedTrigger, StartupOutcome};
