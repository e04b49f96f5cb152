// src/lib.rs — Library root for Kaizen

pub mod analysis;
pub mod cli;
pub mod consistency;
pub mod infra;
pub mod journal;
pub mod provider;
pub mod store;
pub mod therapist;
