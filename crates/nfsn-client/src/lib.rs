// # NFSN API Client
//
// This crate provides the NearlyFreeSpeech.NET API client for the DNS tools.
//
// ## Scope
//
// - ✅ Request authentication (`X-NFSN-Authentication`)
// - ✅ DNS record listing, adding and deleting
// - ✅ HTTP timeout configured (30 seconds)
// - ❌ NO retry logic: errors go straight back to the caller
// - ❌ NO caching: every call is one signed request
//
// ## Security Requirements
//
// - API key NEVER appears in logs or Debug output
// - Every request gets a fresh timestamp and salt; signed headers are never reused
//
// ## API Reference
//
// - Introduction and authentication: https://members.nearlyfreespeech.net/wiki/API/Introduction
// - List records: POST `/dns/:domain/listRRs`
// - Add record: POST `/dns/:domain/addRR`
// - Delete record: POST `/dns/:domain/deleteRR`

pub mod auth;
pub mod client;

pub use auth::{AUTH_HEADER, Authenticator, SaltGenerator, sign};
pub use client::{NFSN_API_BASE, NfsnClient};
