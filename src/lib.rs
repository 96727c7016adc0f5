// SPDX-License-Identifier: BSD-3-Clause

//! Backend API for the salon web application: public catalog, client portal
//! (bookings and treatment history), and the admin dashboard.

pub mod app;
pub mod config;
pub mod messages;
pub mod models;
pub mod routes;
pub mod services;
