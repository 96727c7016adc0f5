// SPDX-License-Identifier: BSD-3-Clause

pub mod auth;
pub mod auth_db;
pub mod logging;
pub mod salon_db;
pub mod session_cookies;
