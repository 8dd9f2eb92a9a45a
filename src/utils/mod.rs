//! Shared utilities: address derivation and port coercion.

pub mod ip_utils;
pub mod port;

pub use ip_utils::{cidr_prefix, derive_ip, placeholder_ip, ROUTER_LAST_OCTET};
pub use port::PortValue;
