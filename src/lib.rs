//! Payroll computation engine for Japanese monthly payroll.
//!
//! This crate converts raw attendance events into paid working minutes and
//! gross salary, and calculates monthly withholding income tax under the
//! statutory bracket-and-deduction schedule for both withholding categories.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
