//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser storage and input rules from state and page
//! logic so both can be tested on the host.

pub mod token_store;
pub mod validation;
