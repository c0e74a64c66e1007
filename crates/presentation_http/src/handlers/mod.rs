//! HTTP request handlers

pub mod attorneys;
pub mod cases;
pub mod clients;
pub mod courts;
pub mod deadlines;
pub mod documents;
pub mod health;
pub mod judges;
pub mod reports;
