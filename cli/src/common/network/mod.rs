//! # COESI Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Validation of the addresses services are deployed on. `validate_ip` is the
//! yes/no contract used by the commands; `check_ip` returns the reason an
//! address was refused so callers can show it to the operator.
//!
//! ## Rules
//!
//! - `localhost` and `127.0.0.1` are always accepted.
//! - Anything else must be four dot-separated groups of one to three decimal
//!   digits, each in 0-255.
//! - The first octet may not be 0, 127 (use `localhost` instead) or above 223
//!   (multicast, reserved and experimental ranges).
//!
//! ```rust
//! use crate::common::network::validate_ip;
//!
//! assert!(validate_ip("192.168.1.1"));
//! assert!(!validate_ip("256.1.1.1"));
//! assert!(!validate_ip("0.0.0.1"));
//! assert!(validate_ip("127.0.0.1"));
//! ```
//!
use thiserror::Error;

/// Why an address was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IpRejection {
    #[error("expected format xxx.xxx.xxx.xxx")]
    Format,
    #[error("each octet must be between 0-255")]
    OctetRange,
    #[error("IP appears to be in a reserved range")]
    Reserved,
}

/// Checks `address`, returning the reason it is unusable.
pub fn check_ip(address: &str) -> Result<(), IpRejection> {
    if address == "localhost" || address == "127.0.0.1" {
        return Ok(());
    }

    let groups: Vec<&str> = address.split('.').collect();
    if groups.len() != 4
        || groups
            .iter()
            .any(|g| g.is_empty() || g.len() > 3 || !g.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(IpRejection::Format);
    }

    let mut octets = [0u16; 4];
    for (octet, group) in octets.iter_mut().zip(&groups) {
        // At most three ASCII digits, so this cannot overflow a u16.
        *octet = group.parse().map_err(|_| IpRejection::Format)?;
        if *octet > 255 {
            return Err(IpRejection::OctetRange);
        }
    }

    match octets[0] {
        0 | 127 => Err(IpRejection::Reserved),
        first if first > 223 => Err(IpRejection::Reserved),
        _ => Ok(()),
    }
}

/// Returns true when `address` may be used as a deployment IP.
pub fn validate_ip(address: &str) -> bool {
    check_ip(address).is_ok()
}
