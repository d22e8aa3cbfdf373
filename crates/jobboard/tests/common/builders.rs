//! Builder patterns for creating seed documents programmatically.

#![allow(dead_code)]

use jobboard::{SeedCompany, SeedDocument, SeedJobPosting};

/// Builder for creating `SeedDocument` instances.
#[derive(Default)]
pub struct DocumentBuilder {
    companies: Vec<SeedCompany>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(mut self, company: CompanyBuilder) -> Self {
        self.companies.push(company.build());
        self
    }

    pub fn build(self) -> SeedDocument {
        SeedDocument {
            companies: self.companies,
        }
    }
}

/// Builder for creating `SeedCompany` instances.
pub struct CompanyBuilder {
    company: SeedCompany,
}

impl CompanyBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            company: SeedCompany {
                name: name.to_string(),
                address: "1-1 Chiyoda, Tokyo".to_string(),
                industry: "Software".to_string(),
                website: format!("https://{}.example", name.to_lowercase().replace(' ', "-")),
                logo_url: String::new(),
                job_postings: Vec::new(),
            },
        }
    }

    pub fn industry(mut self, industry: &str) -> Self {
        self.company.industry = industry.to_string();
        self
    }

    pub fn job(mut self, job: JobBuilder) -> Self {
        self.company.job_postings.push(job.build());
        self
    }

    pub fn build(self) -> SeedCompany {
        self.company
    }
}

/// Builder for creating `SeedJobPosting` instances.
pub struct JobBuilder {
    job: SeedJobPosting,
}

impl JobBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            job: SeedJobPosting {
                title: title.to_string(),
                description: format!("{} wanted", title),
                location: "Remote".to_string(),
                employment_type: "full-time".to_string(),
                status: "open".to_string(),
                ..Default::default()
            },
        }
    }

    /// Adds raw position labels.
    pub fn positions(mut self, labels: &[&str]) -> Self {
        self.job
            .positions
            .extend(labels.iter().map(|label| label.to_string()));
        self
    }

    pub fn salary(mut self, range: &str) -> Self {
        self.job.salary_range = range.to_string();
        self
    }

    pub fn build(self) -> SeedJobPosting {
        self.job
    }
}

/// One company "Acme" with one "Full-Stack Role" job.
pub fn acme_full_stack() -> SeedDocument {
    DocumentBuilder::new()
        .company(
            CompanyBuilder::new("Acme").job(
                JobBuilder::new("Full-Stack Role")
                    .positions(&["frontend developer", "backend developer"]),
            ),
        )
        .build()
}

/// A mixed dataset: synonyms, dynamic positions, unlabeled jobs.
pub fn mixed_dataset() -> SeedDocument {
    DocumentBuilder::new()
        .company(
            CompanyBuilder::new("Acme")
                .job(JobBuilder::new("Full-Stack Role").positions(&["frontend developer", "backend developer"]))
                .job(JobBuilder::new("Rails Engineer").positions(&["Ruby Developer"]))
                .job(JobBuilder::new("Generalist")),
        )
        .company(
            CompanyBuilder::new("Globex")
                .industry("Games")
                .job(JobBuilder::new("Engine Programmer").positions(&["Rust Developer", "game developer"]))
                .job(JobBuilder::new("Mobile Lead").positions(&["iOS Developer", "Android Developer"]))
                .job(JobBuilder::new("Systems").positions(&["rust engineer"])),
        )
        .build()
}
