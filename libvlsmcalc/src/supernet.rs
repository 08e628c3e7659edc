use std::error::Error;
use std::fmt;

use crate::bit_manip::common_prefix_length;
use crate::mask::SubnetMask;
use crate::net::Ipv4Network;


/// The smallest network that contains a set of networks.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Supernet {
    network: Ipv4Network,
    member_count: usize,
}
impl Supernet {
    pub fn network(&self) -> Ipv4Network { self.network }

    /// The number of networks that were passed in to be summarized.
    pub fn member_count(&self) -> usize { self.member_count }

    /// Whether only a single network was summarized (and the result is therefore that network).
    pub fn is_degenerate(&self) -> bool { self.member_count < 2 }
}


/// An error that occurs when summarizing networks.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SupernetError {
    /// No network specifications were passed.
    NoSubnets,

    /// None of the network specifications could be parsed.
    NoValidSubnets,

    /// No network with a prefix length of at least 1 contains all the networks.
    NotContiguous,
}
impl fmt::Display for SupernetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupernetError::NoSubnets
                => write!(f, "no subnets provided"),
            SupernetError::NoValidSubnets
                => write!(f, "no valid subnets found"),
            SupernetError::NotContiguous
                => write!(f, "cannot supernet these subnets (not contiguous)"),
        }
    }
}
impl Error for SupernetError {
}


/// Parses the given network specifications and summarizes them into the smallest network that
/// contains all of them.
///
/// Specifications that fail to parse are skipped. If only one specification parses, it is returned
/// as a degenerate supernet with a member count of 1. Otherwise, the member count is the number of
/// specifications passed, including those that were skipped.
pub fn supernet<S: AsRef<str>>(specs: &[S]) -> Result<Supernet, SupernetError> {
    if specs.is_empty() {
        return Err(SupernetError::NoSubnets);
    }

    let mut nets = Vec::with_capacity(specs.len());
    for spec in specs {
        match spec.as_ref().parse::<Ipv4Network>() {
            Ok(net) => nets.push(net),
            Err(e) => log::debug!("skipping network {:?}: {}", spec.as_ref(), e),
        }
    }

    match nets.len() {
        0 => Err(SupernetError::NoValidSubnets),
        1 => Ok(Supernet {
            network: nets[0],
            member_count: 1,
        }),
        _ => {
            let network = summarize(&nets)
                .ok_or(SupernetError::NotContiguous)?;
            Ok(Supernet {
                network,
                member_count: specs.len(),
            })
        },
    }
}

/// Returns the longest-prefix network that contains every one of the given networks.
///
/// Returns `None` if `nets` is empty or if only a /0 would contain them all.
pub fn summarize(nets: &[Ipv4Network]) -> Option<Ipv4Network> {
    let first = nets.first()?;

    let common_length = nets[1..].iter()
        .map(|net| common_prefix_length(first.base_addr(), net.base_addr()))
        .min()
        .unwrap_or(first.cidr_prefix());
    log::debug!("{} networks share {} leading bits", nets.len(), common_length);

    // the common bit prefix is only a starting point; containment decides
    for prefix in (1..=common_length).rev() {
        let mask = match SubnetMask::from_prefix_length(prefix) {
            Ok(m) => m,
            Err(_) => continue,
        };
        let candidate = Ipv4Network::new(first.base_addr(), mask);
        let all_contained = nets.iter().all(|net|
            candidate.base_addr() <= net.base_addr()
                && net.broadcast_addr() <= candidate.broadcast_addr()
        );
        log::trace!("candidate {} contains all: {}", candidate, all_contained);

        if all_contained {
            return Some(candidate);
        }
    }

    None
}
