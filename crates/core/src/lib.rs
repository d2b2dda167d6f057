//! Core library for adfmd
//!
//! This crate implements the **Functional Core** of adfmd, following the
//! Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`adfmd_core`** (this crate): Pure transformation functions with zero I/O
//! - **`adfmd`**: File/stdin handling, terminal output and exit codes (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no shared state between calls
//! - **Never fails**: Unsupported input degrades to warnings instead of errors
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`atlassian::adf`]: Markdown ⇄ ADF (Atlassian Document Format) conversion
//! - [`atlassian::jira`]: Jira description/comment helpers built on the converter

pub mod atlassian;
