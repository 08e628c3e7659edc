use std::io;

use crate::calc::calculate_supernetting;
use crate::cmds::{finish, write_json, CommandOptions, CommandResult, OutputFormat};
use crate::cmds::show_net::output_network;
use crate::output::Output;


pub fn supernet<S: AsRef<str>, O: Output, E: Output>(args: &[S], options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> CommandResult {
    // vlsmcalc --supernet IPADDRESS/CIDRPREFIX...
    if args.len() < 3 {
        return CommandResult::WrongUsage;
    }
    let result = run_supernet(&args[2..], options, stdout, stderr);
    finish(result, stderr)
}

fn run_supernet<S: AsRef<str>, O: Output, E: Output>(specs: &[S], options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> io::Result<CommandResult> {
    let report = match calculate_supernetting(specs) {
        Ok(r) => r,
        Err(e) => {
            writeln!(stderr, "{}", e)?;
            return Ok(CommandResult::Error(1));
        },
    };

    if let Some(warning) = &report.warning {
        writeln!(stderr, "warning: {}", warning)?;
    }

    if options.format == OutputFormat::Json {
        write_json(&report, stdout)?;
        return Ok(CommandResult::Ok);
    }

    writeln!(stdout, "Supernet of {} networks:", report.member_count)?;
    output_network(report.result, stdout)?;

    Ok(CommandResult::Ok)
}
