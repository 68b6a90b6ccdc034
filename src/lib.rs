//! passplot - Solver result comparison charts
//!
//! Reads labeled CSV result files, sorts each by its lower bound and turns the
//! pass or transfer columns into named series for line charts and pass-count
//! histograms.

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
