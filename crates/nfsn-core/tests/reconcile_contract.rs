//! Contract Test: Dyndns Reconciliation
//!
//! Constraints verified:
//! - A record that already matches the public IP causes zero mutations
//! - A stale record is deleted before its replacement is added
//! - A missing record is added without any delete
//! - New records are A records carrying the configured TTL
//! - Only the subdomain's A record (or a blocking CNAME) is ever deleted
//!
//! If this test fails, the dyndns engine is touching DNS when it should not,
//! or in the wrong order.

mod common;

use common::*;
use nfsn_core::record::DnsRecord;
use nfsn_core::{DyndnsEngine, ReconcileOutcome};
use std::net::IpAddr;

#[tokio::test]
async fn matching_record_causes_no_mutation() {
    let ip = IpAddr::from([1, 2, 3, 4]);
    let api = MockDnsApi::new(vec![a_record("www", "1.2.3.4")]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config(),
    )
    .expect("engine construction succeeds");

    let outcome = engine.reconcile().await.expect("reconcile succeeds");

    assert_eq!(
        outcome,
        ReconcileOutcome::Unchanged {
            record: a_record("www", "1.2.3.4"),
        }
    );
    assert!(!outcome.changed());
    assert_eq!(api.calls(), vec![ApiCall::List("example.com".to_string())]);
    assert!(api.mutations().is_empty(), "no delete, no add");
}

#[tokio::test]
async fn stale_record_is_deleted_then_replaced() {
    let ip = IpAddr::from([5, 6, 7, 8]);
    let stale = a_record("www", "1.2.3.4");
    let api = MockDnsApi::new(vec![
        DnsRecord::new("", "NS", "ns.phx1.nearlyfreespeech.net."),
        stale.clone(),
    ]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config(),
    )
    .unwrap();

    let outcome = engine.reconcile().await.unwrap();

    let fresh = DnsRecord::new("www", "A", "5.6.7.8").with_ttl(300);
    assert_eq!(
        api.mutations(),
        vec![
            ApiCall::Delete("example.com".to_string(), stale.clone()),
            ApiCall::Add("example.com".to_string(), fresh.clone()),
        ],
        "delete must precede add"
    );
    assert_eq!(
        outcome,
        ReconcileOutcome::Replaced {
            previous: stale,
            current: fresh,
        }
    );
}

#[tokio::test]
async fn missing_record_is_created() {
    let ip = IpAddr::from([5, 6, 7, 8]);
    let api = MockDnsApi::new(vec![a_record("mail", "5.6.7.8")]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config(),
    )
    .unwrap();

    let outcome = engine.reconcile().await.unwrap();

    let fresh = DnsRecord::new("www", "A", "5.6.7.8").with_ttl(300);
    assert_eq!(
        api.mutations(),
        vec![ApiCall::Add("example.com".to_string(), fresh.clone())]
    );
    assert_eq!(outcome, ReconcileOutcome::Created { current: fresh });
}

#[tokio::test]
async fn same_data_with_other_type_is_replaced() {
    // A CNAME named like the subdomain cannot coexist with the A record
    let ip = IpAddr::from([1, 2, 3, 4]);
    let cname = DnsRecord::new("www", "CNAME", "1.2.3.4");
    let api = MockDnsApi::new(vec![cname.clone()]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config(),
    )
    .unwrap();

    engine.reconcile().await.unwrap();

    let mutations = api.mutations();
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[0], ApiCall::Delete("example.com".to_string(), cname));
    assert!(matches!(&mutations[1], ApiCall::Add(_, rr) if rr.is_a() && rr.data == "1.2.3.4"));
}

#[tokio::test]
async fn matching_a_record_behind_other_types_causes_no_mutation() {
    let ip = IpAddr::from([1, 2, 3, 4]);
    let api = MockDnsApi::new(vec![
        DnsRecord::new("www", "TXT", "site-verification=abc"),
        DnsRecord::new("www", "AAAA", "2001:db8::1"),
        a_record("www", "1.2.3.4"),
    ]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config(),
    )
    .unwrap();

    let outcome = engine.reconcile().await.unwrap();

    assert_eq!(
        outcome,
        ReconcileOutcome::Unchanged {
            record: a_record("www", "1.2.3.4"),
        }
    );
    assert!(api.mutations().is_empty());
}

#[tokio::test]
async fn stale_a_record_is_replaced_without_touching_other_types() {
    let ip = IpAddr::from([5, 6, 7, 8]);
    let stale = a_record("www", "1.2.3.4");
    let api = MockDnsApi::new(vec![
        DnsRecord::new("www", "MX", "10 mail.example.com."),
        stale.clone(),
    ]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config(),
    )
    .unwrap();

    engine.reconcile().await.unwrap();

    assert_eq!(
        api.mutations(),
        vec![
            ApiCall::Delete("example.com".to_string(), stale),
            ApiCall::Add(
                "example.com".to_string(),
                DnsRecord::new("www", "A", "5.6.7.8").with_ttl(300),
            ),
        ]
    );
}

#[tokio::test]
async fn coexisting_types_without_a_record_are_kept() {
    let ip = IpAddr::from([5, 6, 7, 8]);
    let api = MockDnsApi::new(vec![DnsRecord::new("www", "TXT", "site-verification=abc")]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config(),
    )
    .unwrap();

    let outcome = engine.reconcile().await.unwrap();

    let fresh = DnsRecord::new("www", "A", "5.6.7.8").with_ttl(300);
    assert_eq!(
        api.mutations(),
        vec![ApiCall::Add("example.com".to_string(), fresh.clone())]
    );
    assert_eq!(outcome, ReconcileOutcome::Created { current: fresh });
}

#[tokio::test]
async fn configured_ttl_is_used_for_new_records() {
    let ip = IpAddr::from([9, 9, 9, 9]);
    let api = MockDnsApi::new(Vec::new());

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config().with_ttl(60),
    )
    .unwrap();

    engine.reconcile().await.unwrap();

    assert_eq!(
        api.mutations(),
        vec![ApiCall::Add(
            "example.com".to_string(),
            DnsRecord::new("www", "A", "9.9.9.9").with_ttl(60),
        )]
    );
}

#[tokio::test]
async fn dry_run_never_mutates() {
    let ip = IpAddr::from([5, 6, 7, 8]);
    let stale = a_record("www", "1.2.3.4");
    let api = MockDnsApi::new(vec![stale.clone()]);

    let engine = DyndnsEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockDnsApi::sharing_calls_with(&api)),
        test_config().with_dry_run(true),
    )
    .unwrap();

    let outcome = engine.reconcile().await.unwrap();

    assert!(outcome.changed(), "dry run still reports the intended change");
    assert!(matches!(outcome, ReconcileOutcome::Replaced { previous, .. } if previous == stale));
    assert!(api.mutations().is_empty());
}

#[tokio::test]
async fn engine_rejects_invalid_config() {
    let result = DyndnsEngine::new(
        Box::new(FixedIpSource::new(IpAddr::from([1, 2, 3, 4]))),
        Box::new(MockDnsApi::new(Vec::new())),
        nfsn_core::DyndnsConfig::new("example.com", ""),
    );

    assert!(result.is_err());
}
