//! Outbound adapters driven by the domain.

pub mod markdown;
pub mod persistence;
