//! Integration tests for Sundry.
//!
//! The tests live in `tests/` and drive a running `sundry-api` server over
//! HTTP. They require:
//!
//! - A running `PostgreSQL` database with migrations applied
//!   (`cargo run -p sundry-cli -- migrate`)
//! - The API server running (`cargo run -p sundry-api`)
//!
//! Each test is `#[ignore]`-gated; run them with:
//!
//! ```bash
//! cargo test -p sundry-integration-tests -- --ignored
//! ```
//!
//! `SUNDRY_BASE_URL` overrides the default `http://localhost:3001`.

#![cfg_attr(not(test), forbid(unsafe_code))]
