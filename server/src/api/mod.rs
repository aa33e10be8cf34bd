//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness and component checks
//! - [`bookings`] - booking lifecycle: create, pause/resume, extend,
//!   complete, groups, manual refresh
//! - [`history`] - archived booking lookup
//! - [`pricing`] - rate cards, happy-hours windows, price quotes
//! - [`promotions`] - promotion CRUD and apply-preview
//! - [`loyalty`] - members, accrual config, rewards, redemptions
//! - [`credits`] - credit ledger: accounts, repayments, settlements
//! - [`food_items`] - menu and stock
//! - [`devices`] - seats per category
//! - [`expenses`] - operating expenses
//! - [`reports`] - revenue stats per period
//! - [`settings`] - operator-tunable key/value store

pub mod health;

pub mod bookings;
pub mod history;

pub mod credits;
pub mod devices;
pub mod expenses;
pub mod food_items;
pub mod loyalty;
pub mod pricing;
pub mod promotions;
pub mod reports;
pub mod settings;
