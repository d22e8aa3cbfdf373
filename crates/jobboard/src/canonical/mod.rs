pub mod normalizer;

pub use normalizer::{normalize, SYNONYMS};

/// Canonical positions every seeding run resolves before touching jobs.
pub const STANDARD_POSITIONS: &[&str] = &[
    "Frontend Engineer",
    "Backend Engineer",
    "Fullstack Engineer",
    "Mobile Engineer",
    "Infrastructure Engineer",
    "DevOps Engineer",
    "Cloud Engineer",
    "Data Engineer",
    "AI/ML Engineer",
    "Security Engineer",
    "QA Engineer",
    "Solutions Architect",
    "Game Engineer",
    "Database Engineer",
    "Graphics Engineer",
];

/// Position assigned to jobs that carry no usable labels.
pub const DEFAULT_POSITION: &str = "Fullstack Engineer";
