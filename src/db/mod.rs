//! # Database Module
//!
//! This module organizes all database-related code into submodules:
//! - `models`: Data structures (Snippet)
//! - `snippets`: Insert/get/latest operations for snippets
//! - `users`: Insert/authenticate/exists operations for user accounts
//!
//! Domain outcomes (`NoRecord`, `InvalidCredentials`, `DuplicateEmail`)
//! surface as `AppError` sentinels so handlers can translate them into the
//! right HTTP-level response; everything else bubbles up as a storage
//! failure.

pub mod models;
pub mod snippets;
pub mod users;
