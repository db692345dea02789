//! Integration tests for permission-aware navigation

mod cache_invalidation;
mod cli_contracts;
mod http_backend;
mod parse_matrix;
mod support;
