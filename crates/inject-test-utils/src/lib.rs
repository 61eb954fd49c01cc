//! Shared test utilities for the depinject workspace.
//!
//! This crate provides standardised project fixtures so crate test suites
//! do not each rebuild a fake package directory by hand. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder for consumer files and packages

pub mod project;

pub use project::TestProject;
