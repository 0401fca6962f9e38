// src/services/mod.rs

//! Business operations. Each call opens its own unit of work on the store.

pub mod accounts;
pub mod appointments;
pub mod cart_service;
pub mod catalog;
pub mod notifications;
pub mod order_service;
pub mod reporting;
pub mod validation;
pub mod vehicles;
