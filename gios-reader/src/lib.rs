//! Air-quality station reader for the GIOŚ monitoring network.
//!
//! Resolves a measuring station, then periodically assembles the latest
//! pollutant measurements and index levels into one reading.

pub mod config;
pub mod domain;
pub mod gios;
pub mod reader;
pub mod scheduler;
pub mod web;
