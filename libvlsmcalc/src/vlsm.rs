use std::error::Error;
use std::fmt;

use crate::mask::{SubnetMask, MAX_PREFIX_LENGTH};
use crate::net::{usable_hosts_for_prefix, Ipv4Network};
use crate::range::range_to_subnets;


/// A named demand for a subnet with a given number of usable hosts.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HostRequirement {
    pub name: String,
    pub hosts_needed: u64,
}
impl HostRequirement {
    pub fn new<N: Into<String>>(name: N, hosts_needed: u64) -> HostRequirement {
        HostRequirement {
            name: name.into(),
            hosts_needed,
        }
    }
}


/// A subnet carved out of a parent network to satisfy a [`HostRequirement`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Allocation {
    pub name: String,
    pub requested_hosts: u64,
    pub network: Ipv4Network,
    pub usable_hosts: u64,
}


/// An error that occurs when allocating subnets for host requirements.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum AllocationError {
    /// The list of host requirements was empty.
    NoRequirements,

    /// Even a subnet as large as the parent network cannot hold the requested number of hosts.
    InsufficientCapacity { requested: u64, prefix: u8, available: u64 },

    /// The parent network has no room left for the named requirement.
    ExceedsParent { name: String, requested: u64 },
}
impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::NoRequirements
                => write!(f, "no requirements provided"),
            AllocationError::InsufficientCapacity { requested, prefix, available }
                => write!(f, "cannot allocate {} hosts: largest available subnet (/{}) only has {} usable hosts", requested, prefix, available),
            AllocationError::ExceedsParent { name, requested }
                => write!(f, "allocation of {} hosts for {:?} exceeds parent network range", requested, name),
        }
    }
}
impl Error for AllocationError {
}


/// Returns the longest prefix length, not shorter than `min_prefix`, whose networks have at least
/// `hosts_needed` usable hosts. Falls back to `min_prefix` if none does.
fn prefix_for_hosts(min_prefix: u8, hosts_needed: u64) -> u8 {
    let mut best_prefix = min_prefix;
    for prefix in min_prefix..=MAX_PREFIX_LENGTH {
        if usable_hosts_for_prefix(prefix) < hosts_needed {
            break;
        }
        best_prefix = prefix;
    }
    best_prefix
}


/// Allocates subnets of `parent` to the given host requirements, largest requirement first.
///
/// The allocations are returned in the order in which they were made, i.e. sorted by descending
/// host count; requirements with equal host counts keep their relative order. A requirement of
/// zero hosts is treated as one host and a requirement without a name is named after its position.
pub fn allocate(parent: Ipv4Network, requirements: &[HostRequirement]) -> Result<Vec<Allocation>, AllocationError> {
    if requirements.is_empty() {
        return Err(AllocationError::NoRequirements);
    }

    let mut sorted: Vec<&HostRequirement> = requirements.iter().collect();
    // descending sort => reversed; sort_by is stable
    sorted.sort_by(|r1, r2| r2.hosts_needed.cmp(&r1.hosts_needed));

    let parent_broadcast = parent.broadcast_addr();
    let mut current_addr = parent.base_addr();
    let mut exhausted = false;
    let mut allocations: Vec<Allocation> = Vec::with_capacity(sorted.len());

    for requirement in sorted {
        let hosts_needed = requirement.hosts_needed.max(1);
        let name = if requirement.name.is_empty() {
            format!("Subnet {}", allocations.len() + 1)
        } else {
            requirement.name.clone()
        };

        let prefix = prefix_for_hosts(parent.cidr_prefix(), hosts_needed);
        let available = usable_hosts_for_prefix(prefix);
        if available < hosts_needed {
            return Err(AllocationError::InsufficientCapacity {
                requested: hosts_needed,
                prefix,
                available,
            });
        }

        let mask = SubnetMask::from_prefix_length(prefix)
            .map_err(|_| AllocationError::InsufficientCapacity { requested: hosts_needed, prefix, available })?;
        let network = Ipv4Network::new(current_addr, mask);
        if exhausted || !parent.contains(&network.base_addr()) || !parent.contains(&network.broadcast_addr()) {
            return Err(AllocationError::ExceedsParent {
                name,
                requested: hosts_needed,
            });
        }
        log::debug!("allocated {} for {:?} ({} hosts)", network, name, hosts_needed);

        // the next base address would wrap around to the start of the parent
        exhausted = network.broadcast_addr() == parent_broadcast;
        current_addr = network.next_subnet_base_addr();

        allocations.push(Allocation {
            name,
            requested_hosts: hosts_needed,
            network,
            usable_hosts: available,
        });
    }

    Ok(allocations)
}


/// Returns the part of `parent` that follows the last allocation, as a minimal list of networks.
pub fn unallocated(parent: Ipv4Network, allocations: &[Allocation]) -> Vec<Ipv4Network> {
    let max_used_address = match allocations.iter().map(|a| a.network.broadcast_addr()).max() {
        Some(mua) => mua,
        None => return vec![parent],
    };
    if max_used_address >= parent.broadcast_addr() {
        return Vec::new();
    }
    range_to_subnets(max_used_address.increment(), parent.broadcast_addr())
}
