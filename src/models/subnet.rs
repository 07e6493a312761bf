//! Computed subnet record.

use super::ipv4::{block_size, mask_bits, usable_hosts, MAX_LENGTH};
use super::NetworkBlock;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// One allocated subnet, as handed to the presentation layer.
///
/// Built once by [`build_record`] and never modified.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetRecord {
    /// 1-based position in allocation order.
    pub index: usize,
    /// Network address.
    pub network: Ipv4Addr,
    /// Dotted subnet mask.
    pub mask: Ipv4Addr,
    /// Prefix length.
    pub prefix: u8,
    /// Broadcast address (None for /31 and /32).
    pub broadcast: Option<Ipv4Addr>,
    /// First usable host (None for /31 and /32).
    pub first_host: Option<Ipv4Addr>,
    /// Last usable host (None for /31 and /32).
    pub last_host: Option<Ipv4Addr>,
    /// Number of usable host addresses.
    pub usable_hosts: u64,
}

impl SubnetRecord {
    /// The record as a CIDR block.
    pub fn block(&self) -> NetworkBlock {
        NetworkBlock {
            base: self.network,
            prefix: self.prefix,
        }
    }

    /// Number of addresses the record occupies.
    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }
}

/// Derive the full record for the block at `base` with `prefix`.
///
/// `prefix` must already be within 0-32.
pub fn build_record(base: u32, prefix: u8, index: usize) -> SubnetRecord {
    let size = block_size(prefix);
    let network = base as u64;
    let (broadcast, first_host, last_host) = if prefix >= MAX_LENGTH - 1 {
        (None, None, None)
    } else {
        let broadcast = (network + size - 1) as u32;
        (
            Some(Ipv4Addr::from(broadcast)),
            Some(Ipv4Addr::from(base + 1)),
            Some(Ipv4Addr::from(broadcast - 1)),
        )
    };

    SubnetRecord {
        index,
        network: Ipv4Addr::from(base),
        mask: Ipv4Addr::from(mask_bits(prefix)),
        prefix,
        broadcast,
        first_host,
        last_host,
        usable_hosts: usable_hosts(prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_address;

    #[test]
    fn test_build_record_26() {
        let r = build_record(parse_address("10.0.0.64").unwrap(), 26, 2);
        assert_eq!(r.index, 2);
        assert_eq!(r.network, Ipv4Addr::new(10, 0, 0, 64));
        assert_eq!(r.mask, Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(r.broadcast, Some(Ipv4Addr::new(10, 0, 0, 127)));
        assert_eq!(r.first_host, Some(Ipv4Addr::new(10, 0, 0, 65)));
        assert_eq!(r.last_host, Some(Ipv4Addr::new(10, 0, 0, 126)));
        assert_eq!(r.usable_hosts, 62);
        assert_eq!(r.size(), 64);
        assert_eq!(r.block().to_string(), "10.0.0.64/26");
    }

    #[test]
    fn test_build_record_point_to_point() {
        let r = build_record(parse_address("10.0.0.2").unwrap(), 31, 1);
        assert_eq!(r.broadcast, None);
        assert_eq!(r.first_host, None);
        assert_eq!(r.last_host, None);
        assert_eq!(r.usable_hosts, 0);

        let r = build_record(parse_address("10.0.0.7").unwrap(), 32, 1);
        assert_eq!(r.usable_hosts, 0);
        assert_eq!(r.mask, Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn test_build_record_top_of_space() {
        let r = build_record(parse_address("255.255.255.0").unwrap(), 24, 1);
        assert_eq!(r.broadcast, Some(Ipv4Addr::new(255, 255, 255, 255)));
        assert_eq!(r.last_host, Some(Ipv4Addr::new(255, 255, 255, 254)));

        let r = build_record(0, 0, 1);
        assert_eq!(r.mask, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(r.broadcast, Some(Ipv4Addr::new(255, 255, 255, 255)));
        assert_eq!(r.usable_hosts, (1u64 << 32) - 2);
    }

    #[test]
    fn test_record_json_fields() {
        let r = build_record(parse_address("192.168.1.0").unwrap(), 31, 3);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["network"], "192.168.1.0");
        assert_eq!(json["mask"], "255.255.255.254");
        assert!(json["broadcast"].is_null());
        assert_eq!(json["usable_hosts"], 0);
    }
}
