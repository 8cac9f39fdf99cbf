//! Metadata fetcher implementations

pub mod http;

pub use http::HttpMetadataFetcher;
