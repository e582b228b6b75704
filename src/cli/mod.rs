//! CLI infrastructure for the rps toolkit
//!
//! This module provides the command-line interface for playing against the
//! bot, simulating bot-vs-bot matches, and inspecting window sizing.

pub mod commands;
pub mod config;
pub mod output;
