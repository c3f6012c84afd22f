//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod extraction_gateway;
pub mod key_value_store;
pub mod wizard_event;
