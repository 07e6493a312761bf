//! Error type for address parsing, validation and allocation.

/// Broad class of a [`SubnetError`], used by callers that only need to know
/// which kind of input was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed address or mask text.
    Format,
    /// Address inside a disallowed special-purpose range.
    Policy,
    /// Not enough address space for the request.
    Capacity,
    /// A block would end up with no usable hosts.
    HostUsability,
    /// Request parameters contradict each other.
    Consistency,
}

/// Errors raised while parsing, validating or partitioning an IPv4 network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubnetError {
    #[error("Invalid IPv4 format '{input}' (expected a.b.c.d)")]
    InvalidFormat { input: String },

    #[error("Octet out of range 0-255 in '{input}'")]
    OctetOutOfRange { input: String },

    #[error("Leading zeros are not allowed in octets of '{input}'")]
    LeadingZeros { input: String },

    #[error("Address 0.0.0.0 is reserved (unspecified address)")]
    UnspecifiedAddress,

    #[error("Address 255.255.255.255 is the limited broadcast address")]
    LimitedBroadcast,

    #[error("Address {address} is reserved for special use ({label})")]
    BlockedRange {
        address: String,
        label: &'static str,
    },

    #[error("Mask '{input}' is not contiguous (must be ones followed by zeros)")]
    NonContiguousMask { input: String },

    #[error("Invalid prefix /{prefix} (must be 0-32)")]
    InvalidPrefix { prefix: u32 },

    #[error("Splitting /{base} into {count} subnets needs /{required}, beyond /32")]
    PrefixOverflow {
        base: u8,
        count: usize,
        required: u32,
    },

    #[error("{context}: a /{prefix} block has no usable hosts")]
    NoUsableHosts { context: String, prefix: u8 },

    #[error("A /{prefix} block does not fit in the remaining space of {network}")]
    OutOfSpace { network: String, prefix: u8 },

    #[error("Not enough space left in {network} to split {remaining} more subnets")]
    InsufficientSpace { network: String, remaining: usize },

    #[error("{demands} host demands given but only {count} subnets requested")]
    DemandExceedsCount { demands: usize, count: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SubnetError {
    /// Map the error onto its broad category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SubnetError::InvalidFormat { .. }
            | SubnetError::OctetOutOfRange { .. }
            | SubnetError::LeadingZeros { .. }
            | SubnetError::NonContiguousMask { .. }
            | SubnetError::InvalidPrefix { .. } => ErrorCategory::Format,
            SubnetError::UnspecifiedAddress
            | SubnetError::LimitedBroadcast
            | SubnetError::BlockedRange { .. } => ErrorCategory::Policy,
            SubnetError::PrefixOverflow { .. }
            | SubnetError::OutOfSpace { .. }
            | SubnetError::InsufficientSpace { .. } => ErrorCategory::Capacity,
            SubnetError::NoUsableHosts { .. } => ErrorCategory::HostUsability,
            SubnetError::DemandExceedsCount { .. } | SubnetError::InvalidRequest(_) => {
                ErrorCategory::Consistency
            }
        }
    }

    /// Label of the special-purpose range that rejected an address, if any.
    pub fn blocked_by(&self) -> Option<&'static str> {
        match self {
            SubnetError::BlockedRange { label, .. } => Some(*label),
            _ => None,
        }
    }
}
