/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD, including the club-reference bookkeeping
/// - `clubs`: Club CRUD and member listing

pub mod clubs;
pub mod health;
pub mod users;
