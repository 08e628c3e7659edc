use std::error::Error;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::addr::{IpAddressParseError, Ipv4Address};


/// The longest prefix length an IPv4 network can have.
pub const MAX_PREFIX_LENGTH: u8 = 32;


/// An IPv4 subnet mask, i.e. a run of one-bits followed by a run of zero-bits.
///
/// Both the dotted-decimal and the prefix-length forms normalize to this type, so a mask that has
/// been constructed is always contiguous.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubnetMask {
    prefix_length: u8,
}

impl SubnetMask {
    /// The mask of a single-address (/32) network.
    pub const HOST: SubnetMask = SubnetMask { prefix_length: MAX_PREFIX_LENGTH };

    /// Builds the mask with `prefix_length` leading one-bits.
    pub fn from_prefix_length(prefix_length: u8) -> Result<SubnetMask, MaskParseError> {
        if prefix_length > MAX_PREFIX_LENGTH {
            return Err(MaskParseError::PrefixOutOfRange(prefix_length.into(), MAX_PREFIX_LENGTH));
        }
        Ok(SubnetMask { prefix_length })
    }

    /// Interprets an address as a subnet mask, failing if its one-bits are not contiguous.
    pub fn from_address(addr: Ipv4Address) -> Result<SubnetMask, MaskParseError> {
        match prefix_from_mask_value(addr.value()) {
            Some(prefix_length) => Ok(SubnetMask { prefix_length }),
            None => Err(MaskParseError::NonContiguous(addr)),
        }
    }

    pub fn prefix_length(&self) -> u8 { self.prefix_length }

    pub fn to_address(&self) -> Ipv4Address {
        Ipv4Address::new(mask_value_from_prefix(self.prefix_length))
    }

    /// The Cisco-style wildcard (inverse) mask.
    pub fn wildcard(&self) -> Ipv4Address {
        self.to_address().bitwise_negate()
    }

    /// The mask that is one bit shorter than this one, unless this is already /0.
    pub fn shorter(&self) -> Option<SubnetMask> {
        self.prefix_length.checked_sub(1)
            .map(|prefix_length| SubnetMask { prefix_length })
    }

    /// The number of host bits left over by this mask.
    pub fn host_bits(&self) -> u8 {
        MAX_PREFIX_LENGTH - self.prefix_length
    }
}

impl FromStr for SubnetMask {
    type Err = MaskParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr: Ipv4Address = s.parse()
            .map_err(MaskParseError::Address)?;
        SubnetMask::from_address(addr)
    }
}

impl fmt::Display for SubnetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_address())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SubnetMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


/// Parses a subnet given either as a dotted-decimal mask (`255.255.255.0`) or as a prefix length
/// (`24`, optionally written `/24`).
pub fn parse_mask_or_prefix(spec: &str) -> Result<SubnetMask, MaskParseError> {
    let spec = spec.trim();
    let prefix_str = spec.strip_prefix('/').unwrap_or(spec);
    if !prefix_str.is_empty() && prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        let prefix: u32 = prefix_str.parse()
            .map_err(MaskParseError::PrefixParse)?;
        let prefix = u8::try_from(prefix)
            .map_err(|_| MaskParseError::PrefixOutOfRange(prefix, MAX_PREFIX_LENGTH))?;
        SubnetMask::from_prefix_length(prefix)
    } else {
        spec.parse()
    }
}


fn mask_value_from_prefix(prefix_length: u8) -> u32 {
    // a shift by 32 would overflow
    u32::MAX
        .checked_shl(u32::from(MAX_PREFIX_LENGTH - prefix_length))
        .unwrap_or(0)
}

fn prefix_from_mask_value(value: u32) -> Option<u8> {
    let ones = value.leading_ones();
    let rest = value.checked_shl(ones).unwrap_or(0);
    if rest != 0 {
        // one-bits after the first zero-bit
        return None;
    }
    u8::try_from(ones).ok()
}


/// An error that occurs when attempting to obtain a subnet mask.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MaskParseError {
    /// The mask could not be parsed as a dotted-decimal address.
    Address(IpAddressParseError),

    /// The mask is a valid address but its one-bits are not contiguous.
    NonContiguous(Ipv4Address),

    /// The prefix length could not be parsed.
    PrefixParse(ParseIntError),

    /// The prefix length is greater than the maximum (second value).
    PrefixOutOfRange(u32, u8),
}
impl fmt::Display for MaskParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskParseError::Address(e)
                => write!(f, "failed to parse mask: {}", e),
            MaskParseError::NonContiguous(addr)
                => write!(f, "subnet mask {} is not a contiguous run of one-bits followed by zero-bits", addr),
            MaskParseError::PrefixParse(e)
                => write!(f, "failed to parse prefix length: {}", e),
            MaskParseError::PrefixOutOfRange(got, max)
                => write!(f, "prefix length {} is greater than the maximum ({})", got, max),
        }
    }
}
impl Error for MaskParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MaskParseError::Address(e) => Some(e),
            MaskParseError::PrefixParse(e) => Some(e),
            _ => None,
        }
    }
}
