use std::io;

use crate::calc::{calculate_subnetting, SubnetEntry};
use crate::cmds::{finish, write_json, CommandOptions, CommandResult, OutputFormat};
use crate::cmds::show_net::output_network;
use crate::output::{Color, Output};


const NETWORK_COLOR: Color = Color::Blue;
const RANGE_COLOR: Color = Color::Yellow;
const NOTE_COLOR: Color = Color::White;


pub fn subnet<S: AsRef<str>, O: Output, E: Output>(args: &[S], options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> CommandResult {
    // vlsmcalc --subnet IPADDRESS/CIDRPREFIX NEWPREFIX
    if args.len() != 4 {
        return CommandResult::WrongUsage;
    }
    let result = run_subnet(args[2].as_ref(), args[3].as_ref(), options, stdout, stderr);
    finish(result, stderr)
}

fn run_subnet<O: Output, E: Output>(parent: &str, new_prefix_str: &str, options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> io::Result<CommandResult> {
    let prefix_str = new_prefix_str.trim();
    let prefix_str = prefix_str.strip_prefix('/').unwrap_or(prefix_str);
    let new_prefix: u8 = match prefix_str.parse() {
        Ok(np) => np,
        Err(e) => {
            writeln!(stderr, "failed to parse new prefix length {:?}: {}", new_prefix_str, e)?;
            return Ok(CommandResult::Error(1));
        },
    };

    let report = match calculate_subnetting(parent, new_prefix, &options.calc) {
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

    writeln!(stdout, "Network to subnet:")?;
    output_network(report.parent, stdout)?;
    writeln!(stdout)?;

    writeln!(
        stdout, "{} subnets of /{} with {} hosts each:",
        report.subnet_count, new_prefix, report.hosts_per_subnet,
    )?;
    for entry in &report.subnets {
        output_subnet_entry(entry, stdout)?;
    }
    if report.truncated {
        let mut note_color_writer = stdout.in_color(NOTE_COLOR);
        writeln!(
            note_color_writer, "(only the first {} of {} subnets are listed)",
            report.subnets.len(), report.subnet_count,
        )?;
    }

    Ok(CommandResult::Ok)
}

fn output_subnet_entry<O: Output>(entry: &SubnetEntry, stdout: &mut O) -> io::Result<()> {
    {
        let mut network_color_writer = stdout.in_color(NETWORK_COLOR);
        write!(network_color_writer, "{0:1$}", entry.network.to_string(), 20)?;
    }
    {
        let range = format!(
            "{} - {}",
            entry.network.first_host_addr(), entry.network.last_host_addr(),
        );
        let mut range_color_writer = stdout.in_color(RANGE_COLOR);
        write!(range_color_writer, "{0:1$}", range, 34)?;
    }
    writeln!(stdout, "broadcast {}", entry.broadcast_address)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::calc::CalcOptions;
    use crate::output::BufferOutput;

    fn run(args: &[&str], options: CommandOptions) -> (CommandResult, String, String) {
        let mut stdout = BufferOutput::new();
        let mut stderr = BufferOutput::new();
        let result = subnet(args, &options, &mut stdout, &mut stderr);
        (result, stdout.to_string_lossy(), stderr.to_string_lossy())
    }

    #[test]
    fn test_subnet_text() {
        let (result, stdout, stderr) = run(&["vlsmcalc", "-s", "192.168.0.0/24", "26"], CommandOptions::default());
        assert_eq!(CommandResult::Ok, result);
        assert_eq!("", stderr);

        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!("Network to subnet:", lines[0]);
        assert!(lines[1].starts_with("Network:   192.168.0.0/24 "));
        assert_eq!("", lines[6]);
        assert_eq!("4 subnets of /26 with 62 hosts each:", lines[7]);
        assert_eq!(
            "192.168.0.0/26      192.168.0.1 - 192.168.0.62        broadcast 192.168.0.63",
            lines[8],
        );
        assert!(lines[9].starts_with("192.168.0.64/26 "));
        assert!(lines[10].starts_with("192.168.0.128/26 "));
        assert!(lines[11].starts_with("192.168.0.192/26 "));
        assert_eq!(12, lines.len());
    }

    #[test]
    fn test_subnet_limit() {
        let options = CommandOptions {
            calc: CalcOptions { subnet_limit: Some(2) },
            ..CommandOptions::default()
        };
        let (result, stdout, _) = run(&["vlsmcalc", "--subnet", "10.0.0.0/8", "/16"], options);
        assert_eq!(CommandResult::Ok, result);

        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!("256 subnets of /16 with 65534 hosts each:", lines[7]);
        assert!(lines[8].starts_with("10.0.0.0/16 "));
        assert!(lines[9].starts_with("10.1.0.0/16 "));
        assert_eq!("(only the first 2 of 256 subnets are listed)", lines[10]);
    }

    #[test]
    fn test_subnet_errors() {
        let (result, _, stderr) = run(&["vlsmcalc", "-s", "192.168.0.0/24", "24"], CommandOptions::default());
        assert_eq!(CommandResult::Error(1), result);
        assert!(stderr.contains("must be greater than the current prefix length /24"));

        let (result, _, stderr) = run(&["vlsmcalc", "-s", "192.168.0.0/24", "x"], CommandOptions::default());
        assert_eq!(CommandResult::Error(1), result);
        assert!(stderr.starts_with("failed to parse new prefix length \"x\""));

        let (result, _, stderr) = run(&["vlsmcalc", "-s", "192.168.0.0", "26"], CommandOptions::default());
        assert_eq!(CommandResult::Error(1), result);
        assert!(stderr.starts_with("invalid CIDR notation"));

        let (result, _, _) = run(&["vlsmcalc", "-s", "192.168.0.0/24"], CommandOptions::default());
        assert_eq!(CommandResult::WrongUsage, result);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_subnet_json() {
        let options = CommandOptions { format: OutputFormat::Json, ..CommandOptions::default() };
        let (result, stdout, _) = run(&["vlsmcalc", "-s", "192.168.0.0/24", "26"], options);
        assert_eq!(CommandResult::Ok, result);

        let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!("192.168.0.0/24", value["parent"]);
        assert_eq!(4, value["subnet_count"]);
        assert_eq!(62, value["hosts_per_subnet"]);
        assert_eq!(false, value["truncated"]);
        assert_eq!("192.168.0.64/26", value["subnets"][1]["network"]);
        assert_eq!("192.168.0.127", value["subnets"][1]["broadcast_address"]);
        assert_eq!(1, value["subnets"][1]["index"]);
    }
}
