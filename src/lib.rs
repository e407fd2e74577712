//! RandGate bid response backend.
//!
//! Companies publish tenders, respond to other companies' tenders with bids
//! and keep reusable proposal templates. [`store`] holds the data model and
//! its consistency rules; the rest is the HTTP service around it.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod store;
