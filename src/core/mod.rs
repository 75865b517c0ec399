//! Core protocol constants shared across the terminal.

pub mod constants;
