//! HTTP request handlers

pub mod admin;
pub mod auth;
pub mod companies;
pub mod health;
pub mod internal;
