//! Screen modules for each verifier phase

pub mod granted;
pub mod lockout;
pub mod pin_entry;
