pub mod show_net;
pub mod subnet;
pub mod supernet;
pub mod vlsm;


use std::io;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::calc::CalcOptions;
use crate::output::Output;


static IPV4_WITH_SUBNET_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^(?P<addr>[^/]+)/(?P<subnet>[^/]+)$").unwrap()
);


/// The outcome of running a command.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandResult {
    Ok,
    WrongUsage,
    Error(i32),
}
impl CommandResult {
    /// The process exit code corresponding to this result.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandResult::Ok => 0,
            CommandResult::WrongUsage => 1,
            CommandResult::Error(code) => *code,
        }
    }
}


/// The format in which reports are written.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}


/// Options shared by all commands.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CommandOptions {
    pub format: OutputFormat,
    pub calc: CalcOptions,
}


/// Splits an `IPADDRESS/SUBNET` specification into the address and the subnet (mask or prefix).
pub fn split_address_and_subnet(spec: &str) -> Option<(&str, &str)> {
    let caps = IPV4_WITH_SUBNET_REGEX.captures(spec.trim())?;
    let addr = caps.name("addr")?.as_str();
    let subnet = caps.name("subnet")?.as_str();
    Some((addr, subnet))
}


#[cfg(feature = "serde")]
pub(crate) fn write_json<T: serde::Serialize, O: Output>(value: &T, stdout: &mut O) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *stdout, value)?;
    writeln!(stdout)
}

#[cfg(not(feature = "serde"))]
pub(crate) fn write_json<T, O: Output>(_value: &T, _stdout: &mut O) -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "this build does not support JSON output"))
}

/// Converts the result of a command that performs I/O into a command result.
pub(crate) fn finish<E: Output>(result: io::Result<CommandResult>, stderr: &mut E) -> CommandResult {
    match result {
        Ok(cr) => cr,
        Err(e) => {
            // stderr might be the culprit, but it is worth a try
            let _ = writeln!(stderr, "failed to write output: {}", e);
            CommandResult::Error(1)
        },
    }
}
