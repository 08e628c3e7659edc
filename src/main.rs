use std::io::{self, Write};
use std::str::FromStr;

use libvlsmcalc::cmds::{CommandOptions, CommandResult, OutputFormat};
use libvlsmcalc::output::{Color, Output, StderrOutput, StdoutOutput};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;


const LOG_LEVEL_VAR: &str = "VLSMCALC_LOG";
const SUBNET_LIMIT_VAR: &str = "VLSMCALC_SUBNET_LIMIT";


fn init_logging() {
    let level = match std::env::var(LOG_LEVEL_VAR) {
        Ok(l) => match LevelFilter::from_str(l.trim()) {
            Ok(lf) => lf,
            Err(_) => {
                eprintln!("warning: unknown log level {:?} in {}; using \"warn\"", l, LOG_LEVEL_VAR);
                LevelFilter::Warn
            },
        },
        Err(_) => LevelFilter::Warn,
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config_res = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(level));
    let config = match config_res {
        Ok(c) => c,
        Err(e) => {
            eprintln!("warning: failed to configure logging: {}", e);
            return;
        },
    };
    if let Err(e) = log4rs::init_config(config) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }
}

fn color_test<O: Output>(stdout: &mut O) -> io::Result<()> {
    for color in Color::ALL {
        {
            let mut color_writer = stdout.in_color(color);
            write!(color_writer, "{:20}", format!("{:?}", color))?;
        }
        writeln!(stdout)?;
    }
    Ok(())
}

fn usage() {
    eprintln!("Usage: vlsmcalc [GLOBAL...] IPADDRESS/SUBNET...");
    eprintln!("       vlsmcalc [GLOBAL...] -S|--supernet IPADDRESS/CIDRPREFIX...");
    eprintln!("       vlsmcalc [GLOBAL...] -s|--subnet IPADDRESS/CIDRPREFIX NEWPREFIX");
    eprintln!("       vlsmcalc [GLOBAL...] -v|--vlsm IPADDRESS/CIDRPREFIX [NAME=]HOSTCOUNT...");
    eprintln!("       vlsmcalc --help | --color-test");
    eprintln!();
    eprintln!("GLOBAL is one of: --json       output JSON instead of text");
    eprintln!("                  --limit=N    list at most N subnets with --subnet");
    eprintln!();
    eprintln!("SUBNET is one of: SUBNETMASK");
    eprintln!("                  CIDRPREFIX");
    eprintln!();
    eprintln!("Set {} to a log level (e.g. debug) to see what the calculator is doing.", LOG_LEVEL_VAR);
}

/// Removes the global options from the arguments, returning the options and the rest of the
/// arguments (program name included).
fn extract_global_options(args: Vec<String>) -> Result<(CommandOptions, Vec<String>), String> {
    let mut options = CommandOptions::default();
    if let Ok(limit_str) = std::env::var(SUBNET_LIMIT_VAR) {
        let limit: usize = limit_str.trim().parse()
            .map_err(|e| format!("failed to parse {} value {:?}: {}", SUBNET_LIMIT_VAR, limit_str, e))?;
        options.calc.subnet_limit = Some(limit);
    }

    let mut rest = Vec::with_capacity(args.len());
    let mut args_iter = args.into_iter();
    if let Some(program) = args_iter.next() {
        rest.push(program);
    }

    let mut args_iter = args_iter.peekable();
    while let Some(arg) = args_iter.peek() {
        if arg == "--json" {
            options.format = OutputFormat::Json;
        } else if let Some(limit_str) = arg.strip_prefix("--limit=") {
            let limit: usize = limit_str.parse()
                .map_err(|e| format!("failed to parse subnet limit {:?}: {}", limit_str, e))?;
            options.calc.subnet_limit = Some(limit);
        } else {
            break;
        }
        args_iter.next();
    }
    rest.extend(args_iter);

    Ok((options, rest))
}

fn do_main() -> i32 {
    init_logging();

    let (options, args) = match extract_global_options(std::env::args().collect()) {
        Ok(oa) => oa,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        },
    };
    log::debug!("options: {:?}", options);

    if args.len() < 2 {
        usage();
        return 1;
    }

    let mut stdout = StdoutOutput;
    let mut stderr = StderrOutput;

    let result = if args[1] == "-S" || args[1] == "--supernet" {
        libvlsmcalc::cmds::supernet::supernet(&args, &options, &mut stdout, &mut stderr)
    } else if args[1] == "-s" || args[1] == "--subnet" {
        libvlsmcalc::cmds::subnet::subnet(&args, &options, &mut stdout, &mut stderr)
    } else if args[1] == "-v" || args[1] == "--vlsm" {
        libvlsmcalc::cmds::vlsm::vlsm(&args, &options, &mut stdout, &mut stderr)
    } else if args[1] == "--color-test" {
        match color_test(&mut stdout) {
            Ok(()) => CommandResult::Ok,
            Err(_) => CommandResult::Error(1),
        }
    } else if args[1] == "--help" {
        usage();
        CommandResult::Ok
    } else {
        libvlsmcalc::cmds::show_net::show_net(&args, &options, &mut stdout, &mut stderr)
    };

    if result == CommandResult::WrongUsage {
        usage();
    }
    let _ = stdout.flush();
    result.exit_code()
}

fn main() {
    std::process::exit(do_main());
}
