//! Dokuly Lifecycle - release-state and revision core for PLM items
//!
//! Parts, assemblies, PCBAs and documents move through Draft, Review and
//! Released. This crate gates those transitions, creates new revisions and
//! serves the lookup lists the lifecycle screens need, talking to the PLM
//! backend through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
