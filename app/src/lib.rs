// src/lib.rs

//! TayarPro shop backend: catalog, cart, checkout with workshop appointments,
//! notifications and admin reporting, served over actix-web.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;
pub mod workflows;
