// src/lib.rs

//! Tweet Sentiment Library
//!
//! Fetches recent posts for a keyword, labels each by polarity, exports the
//! results as CSV, and optionally uploads the file to S3.

pub mod config;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
