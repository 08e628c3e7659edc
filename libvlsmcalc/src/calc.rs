//! The calculator facade: one call per calculation, each returning a self-contained report.


use std::error::Error;
use std::fmt;

use crate::addr::{AddressClass, IpAddressParseError, Ipv4Address};
use crate::mask::{parse_mask_or_prefix, MaskParseError, SubnetMask};
use crate::net::{Ipv4Network, ParseNetspecError};
use crate::subnet::{split_network, SplitError};
use crate::supernet::{supernet, SupernetError};
use crate::vlsm::{allocate, unallocated, Allocation, AllocationError, HostRequirement};


/// Options that influence the calculations.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CalcOptions {
    /// The maximum number of subnets listed by [`calculate_subnetting`]. `None` lists them all.
    pub subnet_limit: Option<usize>,
}


/// An error that occurs during a calculation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CalcError {
    Address(IpAddressParseError),
    Mask(MaskParseError),
    Network(ParseNetspecError),
    Supernet(SupernetError),
    Split(SplitError),
    Allocation(AllocationError),
}
impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Address(e) => write!(f, "invalid IP address: {}", e),
            CalcError::Mask(e) => write!(f, "invalid subnet mask: {}", e),
            CalcError::Network(e) => write!(f, "invalid CIDR notation: {}", e),
            CalcError::Supernet(e) => write!(f, "{}", e),
            CalcError::Split(e) => write!(f, "{}", e),
            CalcError::Allocation(e) => write!(f, "{}", e),
        }
    }
}
impl Error for CalcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CalcError::Address(e) => Some(e),
            CalcError::Mask(e) => Some(e),
            CalcError::Network(e) => Some(e),
            CalcError::Supernet(e) => Some(e),
            CalcError::Split(e) => Some(e),
            CalcError::Allocation(e) => Some(e),
        }
    }
}
impl From<IpAddressParseError> for CalcError {
    fn from(e: IpAddressParseError) -> Self { CalcError::Address(e) }
}
impl From<MaskParseError> for CalcError {
    fn from(e: MaskParseError) -> Self { CalcError::Mask(e) }
}
impl From<ParseNetspecError> for CalcError {
    fn from(e: ParseNetspecError) -> Self { CalcError::Network(e) }
}
impl From<SupernetError> for CalcError {
    fn from(e: SupernetError) -> Self { CalcError::Supernet(e) }
}
impl From<SplitError> for CalcError {
    fn from(e: SplitError) -> Self { CalcError::Split(e) }
}
impl From<AllocationError> for CalcError {
    fn from(e: AllocationError) -> Self { CalcError::Allocation(e) }
}


/// Everything there is to know about an address within its network.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubnetInfo {
    pub address: Ipv4Address,
    pub prefix_length: u8,
    pub mask: SubnetMask,
    pub network_address: Ipv4Address,
    pub broadcast_address: Ipv4Address,
    pub first_usable: Ipv4Address,
    pub last_usable: Ipv4Address,
    pub usable_range: String,
    pub usable_hosts: u64,
    pub total_hosts: u64,
    pub class: AddressClass,
    pub is_private: bool,
    pub wildcard_mask: Ipv4Address,
    pub network: Ipv4Network,
}
impl SubnetInfo {
    /// Describes `address` within `net`. Class and privacy are those of `address`.
    pub fn for_network(address: Ipv4Address, net: Ipv4Network) -> SubnetInfo {
        SubnetInfo {
            address,
            prefix_length: net.cidr_prefix(),
            mask: net.subnet_mask(),
            network_address: net.base_addr(),
            broadcast_address: net.broadcast_addr(),
            first_usable: net.first_host_addr(),
            last_usable: net.last_host_addr(),
            usable_range: format!("{} - {}", net.first_host_addr(), net.last_host_addr()),
            usable_hosts: net.host_count(),
            total_hosts: net.address_count(),
            class: address.class(),
            is_private: address.is_private(),
            wildcard_mask: net.cisco_wildcard(),
            network: net,
        }
    }
}

/// Calculates the network information of an address, given a subnet mask in either
/// dotted-decimal or prefix-length form.
pub fn calculate_subnet_info(address: &str, mask_or_prefix: &str) -> Result<SubnetInfo, CalcError> {
    let addr: Ipv4Address = address.trim().parse()?;
    let mask = parse_mask_or_prefix(mask_or_prefix)?;
    Ok(SubnetInfo::for_network(addr, Ipv4Network::new(addr, mask)))
}


/// The result of summarizing networks.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SupernetReport {
    pub result: Ipv4Network,
    pub prefix_length: u8,
    pub mask: SubnetMask,
    pub network: Ipv4Address,
    pub member_count: usize,
    pub warning: Option<String>,
}

/// Summarizes the given networks (in CIDR notation) into the smallest network containing them all.
///
/// Entries that cannot be parsed are skipped. If only one entry can be parsed, that network is
/// returned along with a warning.
pub fn calculate_supernetting<S: AsRef<str>>(subnets: &[S]) -> Result<SupernetReport, CalcError> {
    let summary = supernet(subnets)?;
    let net = summary.network();
    let warning = if summary.is_degenerate() {
        Some(String::from("need at least 2 subnets to supernet"))
    } else {
        None
    };
    Ok(SupernetReport {
        result: net,
        prefix_length: net.cidr_prefix(),
        mask: net.subnet_mask(),
        network: net.base_addr(),
        member_count: summary.member_count(),
        warning,
    })
}


/// One of the subnets produced by [`calculate_subnetting`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubnetEntry {
    pub index: u64,
    pub network: Ipv4Network,
    pub network_address: Ipv4Address,
    pub broadcast_address: Ipv4Address,
    pub mask: SubnetMask,
    pub prefix_length: u8,
    pub usable_hosts: u64,
}
impl SubnetEntry {
    fn new(index: u64, net: Ipv4Network) -> SubnetEntry {
        SubnetEntry {
            index,
            network: net,
            network_address: net.base_addr(),
            broadcast_address: net.broadcast_addr(),
            mask: net.subnet_mask(),
            prefix_length: net.cidr_prefix(),
            usable_hosts: net.host_count(),
        }
    }
}

/// The result of splitting a network into equally-sized subnets.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubnettingReport {
    pub parent: Ipv4Network,
    pub subnets: Vec<SubnetEntry>,

    /// The total number of subnets, even if not all of them are listed.
    pub subnet_count: u64,

    pub hosts_per_subnet: u64,

    /// Whether `subnets` was cut short by [`CalcOptions::subnet_limit`].
    pub truncated: bool,
}

/// Splits a network (in CIDR notation) into all its subnets with the prefix length `new_prefix`.
pub fn calculate_subnetting(parent: &str, new_prefix: u8, options: &CalcOptions) -> Result<SubnettingReport, CalcError> {
    let parent_net: Ipv4Network = parent.parse()?;
    let iter = split_network(parent_net, new_prefix)?;
    let subnet_count = iter.remaining();
    let hosts_per_subnet = iter.hosts_per_subnet();

    let limit = options.subnet_limit.unwrap_or(usize::MAX);
    let truncated = u64::try_from(limit)
        .map(|l| subnet_count > l)
        .unwrap_or(false);
    if truncated {
        log::debug!("listing only {} of {} subnets", limit, subnet_count);
    }

    let subnets = iter
        .take(limit)
        .zip(0..)
        .map(|(net, index)| SubnetEntry::new(index, net))
        .collect();

    Ok(SubnettingReport {
        parent: parent_net,
        subnets,
        subnet_count,
        hosts_per_subnet,
        truncated,
    })
}


/// The result of a variable-length subnet allocation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VlsmReport {
    pub parent_network: Ipv4Network,
    pub allocations: Vec<Allocation>,

    /// The remainder of the parent network, as a minimal list of networks.
    pub unallocated: Vec<Ipv4Network>,
}

/// Allocates a subnet of the parent network (in CIDR notation) to each requirement, largest first.
pub fn calculate_vlsm(parent: &str, requirements: &[HostRequirement]) -> Result<VlsmReport, CalcError> {
    if requirements.is_empty() {
        return Err(AllocationError::NoRequirements.into());
    }
    let parent_net: Ipv4Network = parent.parse()?;
    let allocations = allocate(parent_net, requirements)?;
    let unallocated = unallocated(parent_net, &allocations);
    Ok(VlsmReport {
        parent_network: parent_net,
        allocations,
        unallocated,
    })
}
