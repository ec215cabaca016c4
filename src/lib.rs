//! Performance Support - Guided assistance for running business processes
//!
//! This crate keeps one navigation session per user display, turns process
//! engine callbacks into assistance steps and popups, and executes the
//! navigation commands the display sends back.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
