//! External exam-analysis client.
//!
//! HTTP client for the document-analysis service used as the fallback when
//! an event's details text carries no lab values. The service receives the
//! uploaded file's URL and answers with whatever values it could read out of
//! the document.

pub mod client;
pub mod payload;

pub use client::*;
pub use payload::*;
