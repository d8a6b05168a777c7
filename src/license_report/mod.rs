//! License report domain: package records, resolved licenses, report rows,
//! and the services that turn one into the other.
pub mod domain;
pub mod policies;
pub mod services;
