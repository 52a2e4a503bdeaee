use std::sync::Arc;

use docqa_classify::classifier::MIN_EVIDENCE;
use docqa_classify::{Category, Classifier, Domain, Taxonomy, OTHER};
use docqa_core::Error;

fn classifier() -> Classifier {
    Classifier::default()
}

#[test]
fn results_are_always_in_range_and_populated() {
    let c = classifier();
    let inputs = [
        ("", "x"),
        ("   ", "notes"),
        ("ünïcødé ✓ 日本語 ---", ""),
        ("cost", ""),
        ("docker docker docker", "docker.log"),
        ("patient diagnosis", "contract.docx"),
    ];
    for (text, filename) in inputs {
        let r = c.classify(text, filename);
        assert!(r.confidence <= 100, "{text:?}/{filename:?}");
        assert!(!r.domain.is_empty());
        assert!(!r.category.is_empty());
        assert!(!r.file_extension.is_empty());
    }
}

#[test]
fn filename_alone_is_enough_signal() {
    let r = classifier().classify("", "UAV - Unit 3 - Copy.pptx");
    assert_ne!(r.domain, OTHER);
    assert_eq!(r.domain, "Technology");
    assert_eq!(r.category, "Drones");
    assert_eq!(r.file_extension, "pptx");
}

#[test]
fn a_lone_strong_keyword_selects_its_domain() {
    let c = classifier();
    let mut checked = 0;
    for domain in c.taxonomy().domains() {
        for phrase in &domain.keywords.strong {
            let evidence = c.explain(&phrase.text, "");
            let contested = evidence.iter().any(|(name, e)| *name != domain.name && e.score > 0.0);
            if contested {
                continue;
            }
            checked += 1;
            let r = c.classify(&phrase.text, "");
            assert_eq!(r.domain, domain.name, "keyword {:?}", phrase.text);
        }
    }
    assert!(checked > 100, "only {checked} uncontested keywords");
}

#[test]
fn lone_keyword_wins_regardless_of_declaration_position() {
    let taxonomy = Taxonomy::new(vec![
        Domain::new("First", &["alpha"], &["shared"], vec![]),
        Domain::new("Second", &["beta"], &["shared"], vec![]),
        Domain::new("Last", &["omega"], &[], vec![Category::new("Tail", &["omega"], &[])]),
    ]);
    let r = Classifier::new(Arc::new(taxonomy)).classify("the omega point", "");
    assert_eq!((r.domain.as_str(), r.category.as_str()), ("Last", "Tail"));
}

#[test]
fn ties_prefer_strong_hits_then_declaration_order() {
    let taxonomy = Arc::new(Taxonomy::new(vec![
        Domain::new("Weak", &["zeta"], &["beta", "gamma", "delta"], vec![]),
        Domain::new("Strong", &["alpha"], &[], vec![]),
        Domain::new("Twin", &["alpha"], &[], vec![]),
    ]));
    let c = Classifier::new(taxonomy);

    // 3.0 each; Strong has one strong hit, Weak has none
    let r = c.classify("alpha beta gamma delta", "");
    assert_eq!(r.domain, "Strong");
    assert_eq!(r.confidence, 0);

    let builtin = classifier();
    let r = builtin.classify("docker contract", "");
    assert_eq!(r.domain, "Technology", "earlier declaration wins a full tie");
    assert_eq!(r.confidence, 0);
}

#[test]
fn weak_evidence_alone_falls_back() {
    let r = classifier().classify("cost", "");
    assert_eq!(r.domain, OTHER);
    assert_eq!(r.category, OTHER);
    assert_eq!(r.confidence, 0);
    assert_eq!(r.file_extension, "txt");
}

#[test]
fn clear_wins_are_more_confident_than_near_ties() {
    let c = classifier();
    let clear = c.classify("docker kubernetes terraform helm", "");
    let tied = c.classify("docker kubernetes contract clause", "");
    assert_eq!(clear.domain, "Technology");
    assert_eq!(clear.confidence, 100);
    assert!(tied.confidence < clear.confidence);
    assert!(tied.domain_score >= clear.domain_score / 2.0);
}

#[test]
fn classification_is_deterministic() {
    let c = classifier();
    let text = "Quarterly balance sheet with payroll and tax notes";
    assert_eq!(c.classify(text, "q3.xlsx"), c.classify(text, "q3.xlsx"));
}

#[test]
fn sample_documents() {
    let c = classifier();
    let cases = [
        (
            "Express middleware for the Node.js backend: each route handler validates the request before querying the database.",
            "server.js",
            "Code",
            "Backend",
        ),
        (
            "import React, { useState } from 'react'; export default function App() { return <div className='app' />; }",
            "App.jsx",
            "Code",
            "Frontend",
        ),
        ("Jenkins pipeline builds the Docker image and deploys it to Kubernetes.", "devops.yml", "Technology", "DevOps"),
        (
            "2024-12-20 10:00:01 [INFO] Starting service...\n2024-12-20 10:00:02 [INFO] Pulling image nginx:latest\n\
             2024-12-20 10:00:05 [INFO] Container created: web_server_01\n2024-12-20 10:00:06 [ERROR] Port 80 is in use\n\
             2024-12-20 10:00:07 [WARN] Retrying on Port 8080\n2024-12-20 10:00:08 [INFO] Server listening on 0.0.0.0:8080\n\
             2024-12-20 10:00:09 [INFO] Health check passed.",
            "docker_deployment_logs.log",
            "Technology",
            "DevOps",
        ),
        (
            "Patient admitted to the ward. Diagnosis: pneumonia. Treatment protocol started, MRI scheduled.",
            "patient_notes.txt",
            "Healthcare",
            "Clinical",
        ),
        (
            "Complete Blood Count: Hemoglobin 13.5 g/dL, Platelet count normal. Reference range attached.",
            "lab_report_cbc.pdf",
            "Healthcare",
            "LabReport",
        ),
        (
            "This Agreement is made between the parties. Clause 4 sets the governing law and jurisdiction.",
            "service_contract.docx",
            "Legal",
            "Contract",
        ),
        ("Quarterly balance sheet: revenue grew while cost of upkeep fell.", "q3_report.xlsx", "Finance", "Accounting"),
        (
            "Government of India. Aadhaar unique identification number. DOB 01/01/1990",
            "aadhaar_card.jpg",
            "Government",
            "ID",
        ),
    ];
    for (text, filename, domain, category) in cases {
        let r = c.classify(text, filename);
        assert_eq!((r.domain.as_str(), r.category.as_str()), (domain, category), "{filename}");
        assert!(r.confidence > 0, "{filename}");
        assert!(r.category_score >= MIN_EVIDENCE, "{filename}");
    }
}

#[test]
fn checked_variant_rejects_empty_requests() {
    let c = classifier();
    assert!(matches!(c.classify_checked(None, None), Err(Error::InvalidInput(_))));
    assert!(matches!(c.classify_checked(Some("  "), Some("")), Err(Error::InvalidInput(_))));
    let r = c.classify_checked(None, Some("invoice_laptop.pdf")).expect("filename only");
    assert_eq!((r.domain.as_str(), r.category.as_str()), ("Personal", "Bills"));
}

#[test]
fn plural_filenames_match_singular_keywords() {
    let c = classifier();
    let plural = c.classify("", "invoices_2024.pdf");
    assert_eq!((plural.domain.as_str(), plural.category.as_str()), ("Personal", "Bills"));
    assert!(plural.confidence > 0);
    assert_eq!(plural.domain_score, c.classify("", "invoice_2024.pdf").domain_score);
}

#[test]
fn result_serializes_with_flat_fields() {
    let r = classifier().classify("", "invoice_laptop.pdf");
    let json = serde_json::to_value(&r).expect("serialize");
    assert_eq!(json["domain"], "Personal");
    assert_eq!(json["file_extension"], "pdf");
    assert!(json["confidence"].as_u64().is_some());
}
