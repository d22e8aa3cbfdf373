//! Seeding: loads a company/job document and persists it with canonical
//! position links.

mod report;
mod seeder;
mod source;

pub use report::SeedReport;
pub use seeder::Seeder;
pub use source::{SeedCompany, SeedDocument, SeedJobPosting, SourceFormat};
