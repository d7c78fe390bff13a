//! Hash domain lock tests.
//!
//! Proves:
//! 1. Domain byte strings are unique, null-terminated and follow
//!    `WAYFINDER::*::V1\0`
//! 2. `canonical_hash` is `sha256(domain || data)`, checked against an
//!    independent computation and pinned golden values
//! 3. The report digest written to disk covers exactly `run_report.json`

use std::collections::BTreeSet;

use sha2::{Digest, Sha256};
use wayfinder_harness::report_dir::{read_report_dir, write_report_dir};
use wayfinder_harness::runner::{run, RunConfig, DOMAIN_RUN_REPORT};
use wayfinder_harness::worlds::sliding_puzzle::SlidingPuzzle;
use wayfinder_search::algorithms::AlgorithmV1;
use wayfinder_search::digest::{canonical_hash, DOMAIN_SEARCH_GRAPH};

const ALL_DOMAINS: [&[u8]; 2] = [DOMAIN_SEARCH_GRAPH, DOMAIN_RUN_REPORT];

// ---------------------------------------------------------------------------
// 1. Domain shape
// ---------------------------------------------------------------------------

#[test]
fn domains_are_unique() {
    let unique: BTreeSet<&[u8]> = ALL_DOMAINS.iter().copied().collect();
    assert_eq!(unique.len(), ALL_DOMAINS.len());
}

#[test]
fn domains_follow_naming_convention() {
    for domain in ALL_DOMAINS {
        let shown = String::from_utf8_lossy(domain);
        assert!(domain.starts_with(b"WAYFINDER::"), "{shown}");
        assert!(domain.ends_with(b"::V1\0"), "{shown}");
        assert_eq!(
            domain.iter().filter(|&&b| b == 0).count(),
            1,
            "{shown} has an interior null"
        );
    }
}

// ---------------------------------------------------------------------------
// 2. Hash construction
// ---------------------------------------------------------------------------

#[test]
fn canonical_hash_matches_independent_sha256() {
    let data = br#"{"a":1}"#;
    for domain in ALL_DOMAINS {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        hasher.update(data);
        let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
        assert_eq!(canonical_hash(domain, data).as_str(), expected);
    }
}

#[test]
fn canonical_hash_golden_values() {
    assert_eq!(
        canonical_hash(DOMAIN_SEARCH_GRAPH, b"{}").as_str(),
        "sha256:1ccd51003aafb2e0edcd392d9068adc5379b3fd29f767c76044c6ef39daa6b4b"
    );
    assert_eq!(
        canonical_hash(DOMAIN_RUN_REPORT, b"{}").as_str(),
        "sha256:dfdc1bc46da39654fac6606128782c43f2846b252ced55ba9f8db43566d15e15"
    );
}

#[test]
fn same_bytes_under_different_domains_differ() {
    assert_ne!(
        canonical_hash(DOMAIN_SEARCH_GRAPH, b"{}"),
        canonical_hash(DOMAIN_RUN_REPORT, b"{}")
    );
}

// ---------------------------------------------------------------------------
// 3. Persisted digest surface
// ---------------------------------------------------------------------------

#[test]
fn stored_report_digest_covers_run_report_bytes() {
    let world = SlidingPuzzle::eight([1, 4, 2, 3, 0, 5, 6, 7, 8]).unwrap();
    let report = run(world, &RunConfig::new(AlgorithmV1::BreadthFirst)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(dir.path(), &report).unwrap();

    let report_bytes = std::fs::read(dir.path().join("run_report.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&report_bytes).unwrap();
    assert_eq!(serde_json::to_vec(&parsed).unwrap(), report_bytes, "stored compact and key-sorted");
    let stored = std::fs::read_to_string(dir.path().join("report_digest.txt")).unwrap();
    assert_eq!(stored, canonical_hash(DOMAIN_RUN_REPORT, &report_bytes).as_str());

    let graph_bytes = std::fs::read(dir.path().join("search_graph.json")).unwrap();
    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(
        loaded.report["graph_digest"],
        canonical_hash(DOMAIN_SEARCH_GRAPH, &graph_bytes).as_str()
    );
}
