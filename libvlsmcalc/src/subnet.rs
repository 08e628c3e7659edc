use std::error::Error;
use std::fmt;
use std::iter::{FusedIterator, Iterator};

use crate::addr::Ipv4Address;
use crate::mask::{SubnetMask, MAX_PREFIX_LENGTH};
use crate::net::{usable_hosts_for_prefix, Ipv4Network};


/// Iterates over the equally-sized subnets of a network in ascending order.
#[derive(Clone, Debug)]
pub struct SubnetIter {
    next_base_addr: Ipv4Address,
    subnet_mask: SubnetMask,
    remaining: u64,
}
impl SubnetIter {
    /// The prefix length shared by every subnet the iterator yields.
    pub fn subnet_mask(&self) -> SubnetMask { self.subnet_mask }

    /// The number of usable hosts in each of the subnets.
    pub fn hosts_per_subnet(&self) -> u64 {
        usable_hosts_for_prefix(self.subnet_mask.prefix_length())
    }

    /// The number of subnets that have not been yielded yet.
    pub fn remaining(&self) -> u64 { self.remaining }
}
impl Iterator for SubnetIter {
    type Item = Ipv4Network;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let net = Ipv4Network::new(self.next_base_addr, self.subnet_mask);
        self.remaining -= 1;
        // wraps to 0.0.0.0 after the final subnet of the address space, but remaining is 0 by then
        self.next_base_addr = net.next_subnet_base_addr();
        Some(net)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(r) => (r, Some(r)),
            Err(_) => (usize::MAX, None),
        }
    }
}
impl FusedIterator for SubnetIter {
}


/// An error that occurs when splitting a network into subnets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SplitError {
    /// The requested prefix length is not longer than the prefix length of the network being
    /// split.
    NotLonger { requested: u8, current: u8 },

    /// The requested prefix length is greater than the maximum.
    PrefixOutOfRange(u8),
}
impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::NotLonger { requested, current }
                => write!(f, "new prefix length /{} must be greater than the current prefix length /{}", requested, current),
            SplitError::PrefixOutOfRange(requested)
                => write!(f, "new prefix length /{} must not be greater than /{}", requested, MAX_PREFIX_LENGTH),
        }
    }
}
impl Error for SplitError {
}


/// Splits `parent` into all of its subnets with the prefix length `new_prefix`.
///
/// The subnets are yielded lazily, starting at the base address of `parent`.
pub fn split_network(parent: Ipv4Network, new_prefix: u8) -> Result<SubnetIter, SplitError> {
    if new_prefix > MAX_PREFIX_LENGTH {
        return Err(SplitError::PrefixOutOfRange(new_prefix));
    }
    if new_prefix <= parent.cidr_prefix() {
        return Err(SplitError::NotLonger {
            requested: new_prefix,
            current: parent.cidr_prefix(),
        });
    }
    let subnet_mask = SubnetMask::from_prefix_length(new_prefix)
        .map_err(|_| SplitError::PrefixOutOfRange(new_prefix))?;

    let remaining = 1u64 << (new_prefix - parent.cidr_prefix());
    log::debug!("splitting {} into {} subnets of /{}", parent, remaining, new_prefix);

    Ok(SubnetIter {
        next_base_addr: parent.base_addr(),
        subnet_mask,
        remaining,
    })
}
