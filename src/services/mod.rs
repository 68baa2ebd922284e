//! Business logic services.
//!
//! Services contain the multi-table write paths separated from HTTP
//! handlers. Each one pairs a log insert with the running-total update it
//! triggers, inside a single database transaction.

pub mod inventory_service;
pub mod loan_service;
