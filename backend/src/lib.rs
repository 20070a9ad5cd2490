//! Petition campaign backend library modules.
//!
//! The crate follows a hexagonal layout: the domain core in [`domain`],
//! HTTP adapters in [`inbound`], and storage/rendering adapters in
//! [`outbound`].

pub mod domain;
pub mod inbound;
pub mod outbound;
