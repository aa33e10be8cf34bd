//! Pricing - tariff tables, happy-hours windows and price resolution

pub mod resolver;
pub mod window;
