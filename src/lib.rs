//! Soulframe Atlas - build lab metrics and wiki data administration

pub mod admin;
pub mod catalog;
pub mod core;
pub mod lab;
