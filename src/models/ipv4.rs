//! IPv4 address and CIDR arithmetic.
//!
//! Provides the dotted-decimal codec, mask/prefix conversion and the
//! [`NetworkBlock`] value type used by the partition engine.

use crate::error::SubnetError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Four dot-separated groups of one to three ASCII digits.
static DOTTED_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_regex() -> &'static Regex {
    DOTTED_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
            .expect("Invalid Regex")
    })
}

/// Split dotted text into its four digit groups, or `None` if the shape is wrong.
fn octet_groups(text: &str) -> Option<[&str; 4]> {
    let caps = get_dotted_regex().captures(text)?;
    Some([
        caps.get(1)?.as_str(),
        caps.get(2)?.as_str(),
        caps.get(3)?.as_str(),
        caps.get(4)?.as_str(),
    ])
}

/// Parse the groups as octets, or `None` if any is above 255.
fn groups_to_bits(groups: &[&str; 4]) -> Option<u32> {
    groups.iter().try_fold(0u32, |acc, group| {
        let octet: u8 = group.parse().ok()?;
        Some((acc << 8) | u32::from(octet))
    })
}

/// True if any group is longer than one digit and starts with `0`.
fn has_leading_zeros(groups: &[&str; 4]) -> bool {
    groups.iter().any(|g| g.len() > 1 && g.starts_with('0'))
}

/// Parse dotted-decimal text into its 32-bit value.
///
/// Accepts exactly four groups `0-255` without leading zeros.
///
/// # Examples
/// ```
/// use subnet_planner::models::parse_address;
/// assert_eq!(parse_address("10.0.0.1").unwrap(), 0x0A000001);
/// assert!(parse_address("10.0.0.01").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<u32, SubnetError> {
    let groups = octet_groups(text).ok_or_else(|| SubnetError::InvalidFormat {
        input: text.to_string(),
    })?;
    let bits = groups_to_bits(&groups).ok_or_else(|| SubnetError::OctetOutOfRange {
        input: text.to_string(),
    })?;
    if has_leading_zeros(&groups) {
        return Err(SubnetError::LeadingZeros {
            input: text.to_string(),
        });
    }
    Ok(bits)
}

/// Render a 32-bit value in canonical dotted-decimal form.
pub fn format_address(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// Mask bits for a prefix; prefixes above 32 are treated as 32.
pub(crate) fn mask_bits(prefix: u8) -> u32 {
    let right_len = MAX_LENGTH - prefix.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u32) -> Result<u32, SubnetError> {
    if len > MAX_LENGTH as u32 {
        Err(SubnetError::InvalidPrefix { prefix: len })
    } else {
        Ok(mask_bits(len as u8))
    }
}

/// Convert a CIDR prefix length to a dotted subnet mask.
pub fn prefix_to_mask(prefix: u32) -> Result<Ipv4Addr, SubnetError> {
    get_cidr_mask(prefix).map(Ipv4Addr::from)
}

/// Prefix length of a mask value, or `None` when a one-bit follows a zero-bit.
pub fn mask_bits_to_prefix(mask: u32) -> Option<u8> {
    let ones = mask.leading_ones();
    match mask.checked_shl(ones) {
        Some(rest) if rest != 0 => None,
        _ => Some(ones as u8),
    }
}

/// Convert dotted mask text (e.g. `255.255.255.0`) to its prefix length.
///
/// Returns `None` for unparseable text or a non-contiguous mask.
pub fn mask_to_prefix(mask: &str) -> Option<u8> {
    parse_address(mask).ok().and_then(mask_bits_to_prefix)
}

/// Clear the host bits of `addr` below `prefix`.
pub fn cut_addr(addr: u32, prefix: u8) -> u32 {
    addr & mask_bits(prefix)
}

/// Number of addresses in a block, `2^(32-prefix)`.
pub fn block_size(prefix: u8) -> u64 {
    1u64 << (MAX_LENGTH - prefix.min(MAX_LENGTH))
}

/// Usable host addresses in a block; zero for /31 and /32.
pub fn usable_hosts(prefix: u8) -> u64 {
    if prefix >= MAX_LENGTH - 1 {
        0
    } else {
        block_size(prefix) - 2
    }
}

/// Smallest block (largest prefix) holding `hosts` usable addresses.
///
/// Returns `None` when no IPv4 block is large enough.
pub fn required_prefix_for_hosts(hosts: u64) -> Option<u8> {
    let total = hosts.checked_add(2)?;
    // ceil(log2(total))
    let pow = u64::BITS - (total - 1).leading_zeros();
    if pow > MAX_LENGTH as u32 {
        None
    } else {
        Some(MAX_LENGTH - pow as u8)
    }
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
pub fn lo_mask(addr: u32) -> u8 {
    MAX_LENGTH - addr.trailing_zeros() as u8
}

/// An aligned IPv4 network block in CIDR notation.
///
/// `base` always has the bits below `prefix` cleared.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct NetworkBlock {
    /// The network address.
    pub base: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl NetworkBlock {
    /// Build a block, clearing any host bits of `base`.
    pub fn new(base: Ipv4Addr, prefix: u8) -> Result<NetworkBlock, SubnetError> {
        let mask = get_cidr_mask(prefix as u32)?;
        Ok(NetworkBlock {
            base: Ipv4Addr::from(u32::from(base) & mask),
            prefix,
        })
    }

    pub(crate) fn from_bits(base: u32, prefix: u8) -> NetworkBlock {
        NetworkBlock {
            base: Ipv4Addr::from(cut_addr(base, prefix)),
            prefix,
        }
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }

    /// Get the lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        self.base
    }

    /// Get the highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !mask_bits(self.prefix))
    }

    /// Check if an IP address is contained within this block.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    /// Check if two blocks share any address.
    pub fn overlaps(&self, other: &NetworkBlock) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }
}

impl FromStr for NetworkBlock {
    type Err = SubnetError;

    /// Parse `a.b.c.d/p`, normalising the address to its network.
    fn from_str(s: &str) -> Result<NetworkBlock, SubnetError> {
        let s = s.trim();
        let (addr, prefix) = s.split_once('/').ok_or_else(|| SubnetError::InvalidFormat {
            input: s.to_string(),
        })?;
        let addr = parse_address(addr)?;
        let prefix: u32 = prefix.parse().map_err(|_| SubnetError::InvalidFormat {
            input: s.to_string(),
        })?;
        get_cidr_mask(prefix)?;
        Ok(NetworkBlock::from_bits(addr, prefix as u8))
    }
}

impl Serialize for NetworkBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NetworkBlock {
    fn deserialize<D>(deserializer: D) -> Result<NetworkBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NetworkBlock::from_str(&s).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for NetworkBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}
