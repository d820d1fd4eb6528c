//! Core business logic for Florin.
//!
//! This crate contains pure business logic with no web framework or database
//! dependencies. All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `currency` - Currency codes, USD-anchored rates, and conversion
//! - `sync` - Rate feed fetching and store synchronization

pub mod currency;
pub mod sync;
