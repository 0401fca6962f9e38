// src/models/mod.rs

//! Data structures representing store entities.

pub mod account;
pub mod appointment;
pub mod car;
pub mod cart_line;
pub mod money;
pub mod notification;
pub mod order;
pub mod product;
pub mod report;

pub use account::{Account, AuthClaims};
pub use appointment::{Appointment, AppointmentStatus};
pub use car::{CarSpec, CarSpecInput, CarType, RegisteredCar};
pub use cart_line::{cart_total, CartLine};
pub use notification::{NewNotification, Notification};
pub use order::{Order, OrderDetail, PaymentMethod};
pub use product::{Product, Service, Tyre};
pub use report::{Dashboard, MonthCount, MonthWindow, SalesBucket};
