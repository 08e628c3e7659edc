use std::error::Error;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::addr::{IpAddressParseError, Ipv4Address};
use crate::mask::{MaskParseError, SubnetMask, MAX_PREFIX_LENGTH};


static IPV4_WITH_CIDR_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^(?P<addr>[^/]*)/(?P<cidr>[0-9]+)$").unwrap()
);


/// Returns the number of usable host addresses in a network with the given prefix length.
///
/// The network and broadcast addresses are not usable, except that a /31 has two usable addresses
/// (RFC 3021 point-to-point links) and a /32 has one.
pub fn usable_hosts_for_prefix(prefix_length: u8) -> u64 {
    match prefix_length {
        31 => 2,
        p if p >= MAX_PREFIX_LENGTH => 1,
        p => (1u64 << (MAX_PREFIX_LENGTH - p)) - 2,
    }
}


/// An IPv4 network in canonical form: the base address never has host bits set.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4Network {
    base_addr: Ipv4Address,
    subnet_mask: SubnetMask,
}

impl Ipv4Network {
    pub fn new(
        addr: Ipv4Address,
        subnet_mask: SubnetMask,
    ) -> Ipv4Network {
        // calculate base address by ANDing address with subnet mask
        let base_addr = addr & subnet_mask.to_address();
        Ipv4Network {
            base_addr,
            subnet_mask,
        }
    }

    pub fn new_with_prefix(
        addr: Ipv4Address,
        cidr_prefix: u8,
    ) -> Result<Ipv4Network, MaskParseError> {
        let subnet_mask = SubnetMask::from_prefix_length(cidr_prefix)?;
        Ok(Ipv4Network::new(addr, subnet_mask))
    }

    pub fn base_addr(&self) -> Ipv4Address { self.base_addr }
    pub fn subnet_mask(&self) -> SubnetMask { self.subnet_mask }
    pub fn cidr_prefix(&self) -> u8 { self.subnet_mask.prefix_length() }

    pub fn cisco_wildcard(&self) -> Ipv4Address {
        self.subnet_mask.wildcard()
    }

    /// The total number of addresses in this network, network and broadcast address included.
    pub fn address_count(&self) -> u64 {
        1u64 << self.subnet_mask.host_bits()
    }

    pub fn host_count(&self) -> u64 {
        usable_hosts_for_prefix(self.cidr_prefix())
    }

    /// The last address of the network. For a /32 this is the base address itself.
    pub fn broadcast_addr(&self) -> Ipv4Address {
        self.base_addr | self.cisco_wildcard()
    }

    pub fn first_host_addr(&self) -> Ipv4Address {
        if self.subnet_mask.host_bits() < 2 {
            // /31 and /32 have no network address to skip
            self.base_addr
        } else {
            self.base_addr.increment()
        }
    }

    pub fn last_host_addr(&self) -> Ipv4Address {
        if self.subnet_mask.host_bits() < 2 {
            self.broadcast_addr()
        } else {
            self.broadcast_addr().decrement()
        }
    }

    /// The base address of the network of the same size that directly follows this one. Wraps
    /// around to `0.0.0.0` at the end of the address space.
    pub fn next_subnet_base_addr(&self) -> Ipv4Address {
        self.broadcast_addr().increment()
    }

    pub fn contains(&self, addr: &Ipv4Address) -> bool {
        (*addr & self.subnet_mask.to_address()) == self.base_addr
    }

    pub fn is_superset_of(&self, other: &Ipv4Network) -> bool {
        // a network A is a superset of a network B if B's base address is contained in A and A's
        // prefix is not longer than B's
        self.contains(&other.base_addr)
            && self.cidr_prefix() <= other.cidr_prefix()
    }

    pub fn is_subset_of(&self, other: &Ipv4Network) -> bool {
        other.is_superset_of(self)
    }

    pub fn intersects(&self, other: &Ipv4Network) -> bool {
        // thisFirst <= otherLast && otherFirst <= thisLast
        self.base_addr <= other.broadcast_addr() && other.base_addr <= self.broadcast_addr()
    }
}

impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_addr, self.cidr_prefix())
    }
}

impl FromStr for Ipv4Network {
    type Err = ParseNetspecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_netspec(s).map(|(_addr, net)| net)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ipv4Network {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


/// Attempts to parse an IP network specification in `ADDRESS/CIDRPREFIX` form.
///
/// Returns the address as it was written alongside the (canonicalized) network, so that callers
/// may tell whether host bits were set.
pub fn parse_netspec(spec: &str) -> Result<(Ipv4Address, Ipv4Network), ParseNetspecError> {
    let spec = spec.trim();
    let caps = IPV4_WITH_CIDR_REGEX.captures(spec)
        .ok_or_else(|| ParseNetspecError::Unrecognized(String::from(spec)))?;
    let addr_str = caps.name("addr").expect("'addr' captured").as_str();
    let cidr_str = caps.name("cidr").expect("'cidr' captured").as_str();

    let addr: Ipv4Address = addr_str.parse()
        .map_err(ParseNetspecError::Address)?;
    let cidr: u32 = cidr_str.parse()
        .map_err(ParseNetspecError::CidrParse)?;
    let cidr = u8::try_from(cidr)
        .ok()
        .filter(|c| *c <= MAX_PREFIX_LENGTH)
        .ok_or(ParseNetspecError::CidrRange(cidr, MAX_PREFIX_LENGTH))?;

    let mask = SubnetMask::from_prefix_length(cidr)
        .map_err(ParseNetspecError::Mask)?;
    Ok((addr, Ipv4Network::new(addr, mask)))
}


/// An error that occurs when attempting to parse an IP network specification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseNetspecError {
    /// The format of the IP network specification was not recognized. The contained string is the
    /// original specification string.
    Unrecognized(String),

    /// The IP address could not be parsed.
    Address(IpAddressParseError),

    /// The subnet mask could not be obtained.
    Mask(MaskParseError),

    /// The CIDR prefix could not be parsed.
    CidrParse(ParseIntError),

    /// The parsed CIDR prefix is out of range. The first value is the CIDR prefix that was parsed
    /// and the second value is the maximum CIDR prefix.
    CidrRange(u32, u8),
}
impl fmt::Display for ParseNetspecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseNetspecError::Unrecognized(spec)
                => write!(f, "unrecognized network specification: {:?}", spec),
            ParseNetspecError::Address(e)
                => write!(f, "failed to parse address: {}", e),
            ParseNetspecError::Mask(e)
                => write!(f, "{}", e),
            ParseNetspecError::CidrParse(e)
                => write!(f, "failed to parse CIDR prefix: {}", e),
            ParseNetspecError::CidrRange(got, max)
                => write!(f, "CIDR prefix {} is greater than the maximum ({})", got, max),
        }
    }
}
impl Error for ParseNetspecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseNetspecError::Address(e) => Some(e),
            ParseNetspecError::Mask(e) => Some(e),
            ParseNetspecError::CidrParse(e) => Some(e),
            _ => None,
        }
    }
}
