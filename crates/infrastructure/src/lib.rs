//! DNS Router Infrastructure Layer
pub mod dns;
