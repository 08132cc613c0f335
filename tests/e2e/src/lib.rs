//! Council End-to-End Testing Framework
//!
//! Scenario support for exercising the search engine and the offline
//! controller together: a realistic catalog, a scripted network, a
//! recording notifier and a harness that wires them into one site.

#![no_std]
extern crate alloc;

pub mod assertions;
pub mod fixtures;
pub mod harness;

pub use fixtures::{CatalogFixtures, FakeNetwork, RecordingNotifier};
pub use harness::SiteHarness;
