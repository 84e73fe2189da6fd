//! Domain core of the sportlink match announcement service.
//!
//! Pure types and functions only; storage and transport live in the
//! `sportlink` binary crate.

pub mod announcement;
pub mod common;
pub mod storage;
pub mod team;
