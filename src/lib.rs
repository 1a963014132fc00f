//! Payroll engine for a multi-tenant HR back office.
//!
//! This crate keeps the attendance, leave and reimbursement ledgers of each
//! employee, aggregates them per calendar month and computes a deterministic
//! net-salary breakdown from the employee's compensation parameters. The
//! [`api`] module exposes the operations over HTTP.

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod otp;
pub mod services;
pub mod store;
