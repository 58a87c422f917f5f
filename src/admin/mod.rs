//! Admin back-office operations - image uploads and cascade deletes

pub mod cascade;
pub mod uploads;
