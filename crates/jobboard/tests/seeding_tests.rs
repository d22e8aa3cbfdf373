//! End-to-end seeding scenarios against a file-backed database.

mod common;

use common::{acme_full_stack, mixed_dataset, CompanyBuilder, DocumentBuilder, JobBuilder, TestHarness};
use jobboard::db::{company_repo, job_repo};
use jobboard::{
    ParseError, PositionRegistry, Reconciler, SeedDocument, Seeder, DEFAULT_POSITION,
    STANDARD_POSITIONS,
};

#[test]
fn test_acme_full_stack_scenario() {
    let harness = TestHarness::new();
    let report = Seeder::new(harness.db.clone()).seed(&acme_full_stack()).unwrap();

    assert_eq!(report.companies_processed, 1);
    assert_eq!(report.jobs_created, 1);
    assert_eq!(report.associations_created, 2);
    assert_eq!(report.orphans_repaired, 0);
    assert!(report.failures.is_empty());
    assert_eq!(
        harness.positions_of("Acme", "Full-Stack Role"),
        vec!["Backend Engineer", "Frontend Engineer"]
    );

    let registry = PositionRegistry::new(harness.db.clone());
    let names: Vec<String> = registry.list().unwrap().into_iter().map(|p| p.name).collect();
    assert!(names.contains(&"Frontend Engineer".to_string()));
    assert!(names.contains(&"Backend Engineer".to_string()));
}

#[test]
fn test_empty_positions_get_default() {
    let harness = TestHarness::new();
    let doc = DocumentBuilder::new()
        .company(CompanyBuilder::new("Acme").job(JobBuilder::new("Generalist")))
        .build();
    Seeder::new(harness.db.clone()).seed(&doc).unwrap();

    assert_eq!(harness.positions_of("Acme", "Generalist"), vec![DEFAULT_POSITION]);
}

#[test]
fn test_mixed_dataset() {
    let harness = TestHarness::new();
    let report = Seeder::new(harness.db.clone()).seed(&mixed_dataset()).unwrap();

    assert_eq!(report.jobs_expected, 6);
    assert_eq!(report.jobs_created, 6);
    assert!(report.is_complete());
    // Only "Rust Engineer" is new; "game developer" maps onto a standard one.
    assert_eq!(report.positions_created, 1);
    assert_eq!(report.positions_seeded, STANDARD_POSITIONS.len());

    assert_eq!(harness.positions_of("Acme", "Rails Engineer"), vec!["Backend Engineer"]);
    assert_eq!(harness.positions_of("Acme", "Generalist"), vec![DEFAULT_POSITION]);
    assert_eq!(
        harness.positions_of("Globex", "Engine Programmer"),
        vec!["Game Engineer", "Rust Engineer"]
    );
    assert_eq!(harness.positions_of("Globex", "Mobile Lead"), vec!["Mobile Engineer"]);
    assert_eq!(harness.positions_of("Globex", "Systems"), vec!["Rust Engineer"]);

    let stats = harness.stats();
    assert_eq!(stats.positions as usize, STANDARD_POSITIONS.len() + 1);
    assert_eq!(stats.associations as usize, report.associations_created);
    assert_eq!(stats.orphan_jobs, 0);
}

#[test]
fn test_job_fields_are_stored() {
    let harness = TestHarness::new();
    let doc = DocumentBuilder::new()
        .company(
            CompanyBuilder::new("Acme").job(
                JobBuilder::new("Data Platform")
                    .salary("8M-12M JPY")
                    .positions(&["data engineer"]),
            ),
        )
        .build();
    Seeder::new(harness.db.clone()).seed(&doc).unwrap();

    let job = &harness.jobs_of("Acme")[0];
    assert_eq!(job.salary_range, "8M-12M JPY");
    assert_eq!(job.location, "Remote");
    assert_eq!(job.requirements, "");
    assert_eq!(job.uuid.len(), 36);

    let by_uuid = harness
        .db
        .with_conn(|conn| job_repo::find_by_uuid(conn, &job.uuid))
        .unwrap()
        .unwrap();
    assert_eq!(by_uuid.id, job.id);
}

#[test]
fn test_reset_associations_then_reseed_keeps_counts() {
    let harness = TestHarness::new();
    let seeder = Seeder::new(harness.db.clone());
    let doc = mixed_dataset();

    let first = seeder.seed(&doc).unwrap();
    let after_first = harness.stats();

    let removed = Reconciler::new(harness.db.clone()).reset_associations().unwrap();
    assert_eq!(removed, first.associations_created);
    assert_eq!(harness.stats().associations, 0);

    let second = seeder.seed(&doc).unwrap();
    assert_eq!(second.associations_created, first.associations_created);
    assert_eq!(second.jobs_reused, first.jobs_created);
    assert_eq!(harness.stats(), after_first);
}

#[test]
fn test_seed_file_json_and_yaml_agree() {
    let json_harness = TestHarness::new();
    let yaml_harness = TestHarness::new();
    let doc = mixed_dataset();

    let json_path = json_harness.write_json("mockdata.txt", &doc);
    let yaml_path = yaml_harness.write_yaml("seed.yaml", &doc);

    let json_report = Seeder::new(json_harness.db.clone()).seed_file(&json_path).unwrap();
    let yaml_report = Seeder::new(yaml_harness.db.clone()).seed_file(&yaml_path).unwrap();

    assert_eq!(json_report, yaml_report);
    assert_eq!(json_harness.stats(), yaml_harness.stats());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let harness = TestHarness::new();
    let path = harness.write_raw(
        "mockdata.txt",
        r#"{
            "companies": [{
                "name": "Acme",
                "logo_url": "https://acme.example/logo.png",
                "founded": 1999,
                "job_postings": [{
                    "title": "Platform",
                    "posting_date": "2025-04-01",
                    "closing_date": null,
                    "positions": ["cloud developer"]
                }]
            }]
        }"#,
    );

    let report = Seeder::new(harness.db.clone()).seed_file(&path).unwrap();
    assert_eq!(report.jobs_created, 1);
    assert_eq!(harness.positions_of("Acme", "Platform"), vec!["Cloud Engineer"]);

    let company = harness
        .db
        .with_conn(|conn| company_repo::find_by_name(conn, "Acme"))
        .unwrap()
        .unwrap();
    assert_eq!(company.logo_url, "https://acme.example/logo.png");
}

#[test]
fn test_empty_document_is_rejected() {
    let harness = TestHarness::new();
    let path = harness.write_raw("mockdata.txt", r#"{"companies": []}"#);

    let err = Seeder::new(harness.db.clone()).seed_file(&path).unwrap_err();
    assert!(matches!(err, ParseError::NoCompanies));

    let err = Seeder::new(harness.db.clone())
        .seed(&SeedDocument::default())
        .unwrap_err();
    assert!(matches!(err, ParseError::NoCompanies));
    assert_eq!(harness.stats().positions, 0);
}

#[test]
fn test_malformed_document_is_rejected() {
    let harness = TestHarness::new();
    let path = harness.write_raw("mockdata.txt", "{\"companies\": [{\"name\": ");
    let err = Seeder::new(harness.db.clone()).seed_file(&path).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn test_companies_merge_by_exact_name() {
    let harness = TestHarness::new();
    let doc = DocumentBuilder::new()
        .company(CompanyBuilder::new("Acme").job(JobBuilder::new("One")))
        .company(CompanyBuilder::new("Acme").job(JobBuilder::new("Two")))
        .company(CompanyBuilder::new("ACME").job(JobBuilder::new("Three")))
        .build();

    let report = Seeder::new(harness.db.clone()).seed(&doc).unwrap();
    assert_eq!(report.companies_processed, 3);
    assert_eq!(harness.stats().companies, 2);
    assert_eq!(harness.jobs_of("Acme").len(), 2);
    assert_eq!(harness.jobs_of("ACME").len(), 1);
}
