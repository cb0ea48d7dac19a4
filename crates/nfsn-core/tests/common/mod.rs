//! Test doubles and common utilities for dyndns contract tests
//!
//! This module provides minimal test doubles that record what the engine
//! asks of them without touching the network.

#![allow(dead_code)]

use nfsn_core::config::DyndnsConfig;
use nfsn_core::error::{Error, Result};
use nfsn_core::record::DnsRecord;
use nfsn_core::traits::{DnsApi, IpSource};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource that always reports the same address
pub struct FixedIpSource {
    ip: IpAddr,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<IpAddr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// An IpSource whose lookup always fails
pub struct FailingIpSource;

#[async_trait::async_trait]
impl IpSource for FailingIpSource {
    async fn current(&self) -> Result<IpAddr> {
        Err(Error::ip_source("echo service unreachable"))
    }
}

/// One call made against the MockDnsApi
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List(String),
    Add(String, DnsRecord),
    Delete(String, DnsRecord),
}

/// A mock DnsApi that serves canned records and records every call
pub struct MockDnsApi {
    records: Vec<DnsRecord>,
    calls: Arc<Mutex<Vec<ApiCall>>>,
    fail_list: bool,
    fail_add: bool,
    fail_delete: bool,
}

impl MockDnsApi {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        Self {
            records,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_list: false,
            fail_add: false,
            fail_delete: false,
        }
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_add(mut self) -> Self {
        self.fail_add = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Create a new MockDnsApi that shares the call log with an existing one
    pub fn sharing_calls_with(other: &Self) -> Self {
        Self {
            records: other.records.clone(),
            calls: Arc::clone(&other.calls),
            fail_list: other.fail_list,
            fail_add: other.fail_add,
            fail_delete: other.fail_delete,
        }
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the add and delete calls, in order
    pub fn mutations(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, ApiCall::List(_)))
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl DnsApi for MockDnsApi {
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        self.record(ApiCall::List(domain.to_string()));
        if self.fail_list {
            return Err(Error::protocol("500 Internal Server Error", "list failed"));
        }
        Ok(self.records.clone())
    }

    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        self.record(ApiCall::Add(domain.to_string(), record.clone()));
        if self.fail_add {
            return Err(Error::protocol("500 Internal Server Error", "add failed"));
        }
        Ok(())
    }

    async fn delete_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        self.record(ApiCall::Delete(domain.to_string(), record.clone()));
        if self.fail_delete {
            return Err(Error::transport("connection reset"));
        }
        Ok(())
    }

    fn api_name(&self) -> &'static str {
        "mock"
    }
}

/// An A record as the provider would list it
pub fn a_record(name: &str, data: &str) -> DnsRecord {
    DnsRecord::new(name, "A", data).with_ttl(300)
}

/// Helper to create a DyndnsConfig for testing
pub fn test_config() -> DyndnsConfig {
    DyndnsConfig::new("example.com", "www")
}
