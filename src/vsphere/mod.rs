//! VMware vCenter access.
//!
//! [`VsphereClient`] talks to the vCenter REST API and implements
//! [`VmSource`](crate::inventory::VmSource).

pub mod client;
pub mod models;

pub use client::{Session, VsphereClient};
