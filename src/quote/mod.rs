//! Quote domain logic - pricing, selection validation, messaging handoff

pub mod message;
pub mod pricing;
pub mod selection;
