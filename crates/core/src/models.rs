pub mod analytics;
pub mod appointment;
pub mod auth;
pub mod availability;
pub mod booked_slot;
pub mod pagination;
pub mod patient;
pub mod prescription;
pub mod schedule;
