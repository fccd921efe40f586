//! NVIDIA driver catalog client.
//!
//! Implements [`gecko_core::DriverCatalogPort`] on top of three endpoints:
//!
//! - the community GPU table (`gpu-data.json`) mapping product names to ids
//! - the community OS table (`os-data.json`) mapping OS versions to ids
//! - NVIDIA's `AjaxDriverService` manual lookup
//!
//! All requests go through an injectable [`http::HttpBackend`] so the client
//! can be exercised against canned JSON in tests.

#![deny(unsafe_code)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use client::DefaultNvidiaClient;
pub use config::NvidiaClientConfig;

