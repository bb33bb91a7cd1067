//! # ClinicDesk Core
//!
//! Domain types shared by the client, the stores and the command line front
//! end: wire shapes of the clinic backend, derived appointment status, slot
//! normalization, pagination math, and the error taxonomy.
//!
//! Nothing in this crate performs I/O.

pub mod errors;
pub mod models;
pub mod validation;
