use std::io;

use crate::addr::{AddressClass, Ipv4Address};
use crate::bit_manip::address_to_bits;
use crate::calc::{calculate_subnet_info, SubnetInfo};
use crate::cmds::{finish, split_address_and_subnet, write_json, CommandOptions, CommandResult, OutputFormat};
use crate::mask::SubnetMask;
use crate::net::Ipv4Network;
use crate::output::{Color, Output};


const LABEL_COLOR: Color = Color::White;
const IP_ADDRESS_COLOR: Color = Color::Blue;
const HOST_BITS_COLOR: Color = Color::Yellow;
const NET_BITS_COLOR: Color = Color::Green;
const MASK_BITS_COLOR: Color = Color::Red;
const CLASS_BITS_COLOR: Color = Color::Magenta;
const ADDR_SEP_COLOR: Color = Color::White;

const LABEL_WIDTH: usize = 11;
const ADDRESS_WIDTH: usize = 21;


pub fn show_net<S: AsRef<str>, O: Output, E: Output>(args: &[S], options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> CommandResult {
    // vlsmcalc IPADDRESS/SUBNET...
    if args.len() < 2 {
        return CommandResult::WrongUsage;
    }
    let result = run_show_net(&args[1..], options, stdout, stderr);
    finish(result, stderr)
}

fn run_show_net<S: AsRef<str>, O: Output, E: Output>(specs: &[S], options: &CommandOptions, stdout: &mut O, stderr: &mut E) -> io::Result<CommandResult> {
    let mut infos = Vec::with_capacity(specs.len());
    for spec in specs {
        let (addr_str, subnet_str) = match split_address_and_subnet(spec.as_ref()) {
            Some(aas) => aas,
            None => {
                writeln!(stderr, "failed to parse network specification {:?}: expected IPADDRESS/SUBNET", spec.as_ref())?;
                return Ok(CommandResult::Error(1));
            },
        };
        match calculate_subnet_info(addr_str, subnet_str) {
            Ok(info) => infos.push(info),
            Err(e) => {
                writeln!(stderr, "{:?}: {}", spec.as_ref(), e)?;
                return Ok(CommandResult::Error(1));
            },
        };
    }

    if options.format == OutputFormat::Json {
        write_json(&infos, stdout)?;
        return Ok(CommandResult::Ok);
    }

    let mut is_first = true;
    for info in &infos {
        if !is_first {
            writeln!(stdout)?;
        }
        is_first = false;

        output_subnet_info(info, true, stdout)?;
    }

    Ok(CommandResult::Ok)
}

fn output_initial_columns<O: Output>(label: &str, address: &str, stdout: &mut O) -> io::Result<()> {
    {
        let mut label_color_writer = stdout.in_color(LABEL_COLOR);
        write!(label_color_writer, "{0:1$}", label, LABEL_WIDTH)?;
    }
    {
        let mut ip_color_writer = stdout.in_color(IP_ADDRESS_COLOR);
        write!(ip_color_writer, "{0:1$}", address, ADDRESS_WIDTH)?;
    }
    Ok(())
}

fn class_bit_count(class: AddressClass) -> usize {
    match class {
        AddressClass::A => 1,
        AddressClass::B => 2,
        AddressClass::C => 3,
        AddressClass::D|AddressClass::E => 4,
    }
}

/// Outputs the bits of an address, coloring network and host bits differently if a mask is given.
///
/// If `color_class` is set and the network is at least as long as the class-defining leading bits,
/// those bits are colored too.
fn output_binary_address<O: Output>(
    addr: Ipv4Address,
    subnet_mask: Option<SubnetMask>,
    color_class: bool,
    override_color: Option<Color>,
    stdout: &mut O,
) -> io::Result<()> {
    let bits = address_to_bits(addr);
    let prefix_length = subnet_mask.map(|m| usize::from(m.prefix_length()));
    let class_bits = class_bit_count(addr.class());
    let color_class = color_class && prefix_length.map(|pl| pl >= class_bits).unwrap_or(false);

    for (i, bit) in bits.iter().enumerate() {
        if i > 0 && i % 8 == 0 {
            let mut color_writer = stdout.in_color(ADDR_SEP_COLOR);
            write!(color_writer, ".")?;
        }

        let color = if let Some(oc) = override_color {
            oc
        } else if color_class && i < class_bits {
            CLASS_BITS_COLOR
        } else if prefix_length.map(|pl| i < pl).unwrap_or(false) {
            NET_BITS_COLOR
        } else {
            HOST_BITS_COLOR
        };

        let mut color_writer = stdout.in_color(color);
        write!(color_writer, "{}", if *bit { '1' } else { '0' })?;
    }
    Ok(())
}

fn output_address_line<O: Output>(label: &str, addr: Ipv4Address, stdout: &mut O) -> io::Result<()> {
    output_initial_columns(label, &addr.to_string(), stdout)?;
    output_binary_address(addr, None, false, None, stdout)?;
    writeln!(stdout)
}

/// Outputs and dissects information about an address within its network.
///
/// The address, netmask and wildcard lines are only output if `with_address` is set.
pub fn output_subnet_info<O: Output>(info: &SubnetInfo, with_address: bool, stdout: &mut O) -> io::Result<()> {
    if with_address {
        output_initial_columns("Address:", &info.address.to_string(), stdout)?;
        output_binary_address(info.address, Some(info.mask), false, None, stdout)?;
        writeln!(stdout)?;

        let netmask_str = format!("{} = {}", info.mask, info.prefix_length);
        output_initial_columns("Netmask:", &netmask_str, stdout)?;
        output_binary_address(info.mask.to_address(), None, false, Some(MASK_BITS_COLOR), stdout)?;
        writeln!(stdout)?;

        output_address_line("Wildcard:", info.wildcard_mask, stdout)?;

        {
            let mut label_color_writer = stdout.in_color(LABEL_COLOR);
            write!(label_color_writer, "=>")?;
        }
        writeln!(stdout)?;
    }

    output_initial_columns("Network:", &info.network.to_string(), stdout)?;
    output_binary_address(info.network_address, Some(info.mask), true, None, stdout)?;
    writeln!(stdout)?;

    output_address_line("HostMin:", info.first_usable, stdout)?;
    output_address_line("HostMax:", info.last_usable, stdout)?;
    output_address_line("Broadcast:", info.broadcast_address, stdout)?;

    output_initial_columns("Hosts/Net:", &info.usable_hosts.to_string(), stdout)?;
    {
        let mut class_color_writer = stdout.in_color(CLASS_BITS_COLOR);
        write!(class_color_writer, "Class {}", info.class)?;
    }
    if info.is_private {
        let mut label_color_writer = stdout.in_color(LABEL_COLOR);
        write!(label_color_writer, ", Private")?;
    }
    writeln!(stdout)
}

/// Outputs and dissects information about a network.
pub fn output_network<O: Output>(net: Ipv4Network, stdout: &mut O) -> io::Result<()> {
    let info = SubnetInfo::for_network(net.base_addr(), net);
    output_subnet_info(&info, false, stdout)
}
