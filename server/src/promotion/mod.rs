//! Promotions - read-time validity, discount/bonus application, usage counters

pub mod engine;
