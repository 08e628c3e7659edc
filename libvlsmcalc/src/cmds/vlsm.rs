use std::io;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::calc::calculate_vlsm;
use crate::cmds::{finish, write_json, CommandOptions, CommandResult, OutputFormat};
use crate::cmds::show_net::output_network;
use crate::output::Output;
use crate::vlsm::HostRequirement;


static REQUIREMENT_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^(?:(?P<name>[^=]*)=)?(?P<hosts>[0-9]+)$").unwrap()
);


/// Parses a host requirement in `[NAME=]HOSTCOUNT` form. A missing name is left empty.
pub fn parse_requirement(spec: &str) -> Option<HostRequirement> {
    let caps = REQUIREMENT_REGEX.captures(spec.trim())?;
    let name = caps.name("name").map(|n| n.as_str().trim()).unwrap_or("");
    let hosts_needed: u64 = caps.name("hosts")?.as_str().parse().ok()?;
    Some(HostRequirement::new(name, hosts_needed))
}


pub fn vlsm<S: AsRef<str>, O: Output, E: Output>(args: &[S], options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> CommandResult {
    // vlsmcalc --vlsm IPADDRESS/CIDRPREFIX [NAME=]HOSTCOUNT...
    if args.len() < 4 {
        return CommandResult::WrongUsage;
    }
    let result = run_vlsm(args[2].as_ref(), &args[3..], options, stdout, stderr);
    finish(result, stderr)
}

fn run_vlsm<S: AsRef<str>, O: Output, E: Output>(parent: &str, requirement_strs: &[S], options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> io::Result<CommandResult> {
    let mut requirements = Vec::with_capacity(requirement_strs.len());
    for requirement_str in requirement_strs {
        match parse_requirement(requirement_str.as_ref()) {
            Some(r) => requirements.push(r),
            None => {
                writeln!(stderr, "failed to parse host requirement {:?}: expected [NAME=]HOSTCOUNT", requirement_str.as_ref())?;
                return Ok(CommandResult::Error(1));
            },
        }
    }

    let report = match calculate_vlsm(parent, &requirements) {
        Ok(r) => r,
        Err(e) => {
            writeln!(stderr, "{}", e)?;
            return Ok(CommandResult::Error(1));
        },
    };

    if options.format == OutputFormat::Json {
        write_json(&report, stdout)?;
        return Ok(CommandResult::Ok);
    }

    writeln!(stdout, "Network to allocate from:")?;
    output_network(report.parent_network, stdout)?;
    writeln!(stdout)?;

    for allocation in &report.allocations {
        writeln!(stdout, "Subnet for {} ({} hosts):", allocation.name, allocation.requested_hosts)?;
        output_network(allocation.network, stdout)?;
        writeln!(stdout)?;
    }

    if !report.unallocated.is_empty() {
        writeln!(stdout, "Unused networks:")?;
        for unused_subnet in &report.unallocated {
            writeln!(stdout, "{}", unused_subnet)?;
        }
    }

    Ok(CommandResult::Ok)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::output::BufferOutput;

    fn run(args: &[&str], format: OutputFormat) -> (CommandResult, String, String) {
        let options = CommandOptions { format, ..CommandOptions::default() };
        let mut stdout = BufferOutput::new();
        let mut stderr = BufferOutput::new();
        let result = vlsm(args, &options, &mut stdout, &mut stderr);
        (result, stdout.to_string_lossy(), stderr.to_string_lossy())
    }

    #[test]
    fn test_parse_requirement() {
        assert_eq!(Some(HostRequirement::new("Engineering", 100)), parse_requirement("Engineering=100"));
        assert_eq!(Some(HostRequirement::new("Server room", 12)), parse_requirement("Server room=12"));
        assert_eq!(Some(HostRequirement::new("", 25)), parse_requirement("25"));
        assert_eq!(Some(HostRequirement::new("", 25)), parse_requirement("=25"));
        assert_eq!(None, parse_requirement("Sales="));
        assert_eq!(None, parse_requirement("Sales=-5"));
        assert_eq!(None, parse_requirement("a=b=5"));
        assert_eq!(None, parse_requirement("99999999999999999999999"));
    }

    #[test]
    fn test_vlsm_text() {
        let (result, stdout, stderr) = run(
            &["vlsmcalc", "--vlsm", "192.168.0.0/24", "Support=25", "Engineering=100", "Sales=50"],
            OutputFormat::Text,
        );
        assert_eq!(CommandResult::Ok, result);
        assert_eq!("", stderr);

        let blocks: Vec<&str> = stdout.split("\n\n").collect();
        assert_eq!(5, blocks.len());
        assert!(blocks[0].starts_with("Network to allocate from:\nNetwork:   192.168.0.0/24 "));
        assert!(blocks[1].starts_with("Subnet for Engineering (100 hosts):\nNetwork:   192.168.0.0/25 "));
        assert!(blocks[2].starts_with("Subnet for Sales (50 hosts):\nNetwork:   192.168.0.128/26 "));
        assert!(blocks[3].starts_with("Subnet for Support (25 hosts):\nNetwork:   192.168.0.192/27 "));
        assert_eq!("Unused networks:\n192.168.0.224/27\n", blocks[4]);
    }

    #[test]
    fn test_vlsm_unnamed() {
        let (result, stdout, _) = run(&["vlsmcalc", "-v", "10.0.0.0/30", "2"], OutputFormat::Text);
        assert_eq!(CommandResult::Ok, result);
        assert!(stdout.contains("Subnet for Subnet 1 (2 hosts):\nNetwork:   10.0.0.0/31 "));
        assert!(stdout.ends_with("Unused networks:\n10.0.0.2/31\n"));
    }

    #[test]
    fn test_vlsm_errors() {
        let (result, stdout, stderr) = run(&["vlsmcalc", "-v", "192.168.0.0/24", "huge=300"], OutputFormat::Text);
        assert_eq!(CommandResult::Error(1), result);
        assert_eq!("", stdout);
        assert_eq!("cannot allocate 300 hosts: largest available subnet (/24) only has 254 usable hosts\n", stderr);

        let (result, _, stderr) = run(&["vlsmcalc", "-v", "192.168.0.0/24", "many"], OutputFormat::Text);
        assert_eq!(CommandResult::Error(1), result);
        assert!(stderr.starts_with("failed to parse host requirement \"many\""));

        let (result, _, _) = run(&["vlsmcalc", "-v", "192.168.0.0/24"], OutputFormat::Text);
        assert_eq!(CommandResult::WrongUsage, result);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_vlsm_json() {
        let (result, stdout, _) = run(&["vlsmcalc", "-v", "10.0.0.0/16", "Engineering=100", "Sales=50"], OutputFormat::Json);
        assert_eq!(CommandResult::Ok, result);

        let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!("10.0.0.0/16", value["parent_network"]);
        assert_eq!("Engineering", value["allocations"][0]["name"]);
        assert_eq!(100, value["allocations"][0]["requested_hosts"]);
        assert_eq!("10.0.0.0/25", value["allocations"][0]["network"]);
        assert_eq!(126, value["allocations"][0]["usable_hosts"]);
        assert_eq!("10.0.0.128/26", value["allocations"][1]["network"]);
        assert_eq!("10.0.0.192/26", value["unallocated"][0]);
    }
}
