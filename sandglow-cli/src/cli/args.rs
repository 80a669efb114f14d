//! CLI argument definitions for `sandglow-cli`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    // Build the CLI definition in one place to keep main.rs slim.
    Command::new("Sandglow")
        .version("0.1.0")
        .about("Inspect and simulate position-synchronized lighting")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("plan")
                .about("Print the localized-mode segment plan as JSON")
                .arg(
                    Arg::new("theta")
                        .long("theta")
                        .value_name("RADIANS")
                        .default_value("0.0")
                        .help("Angular position in radians"),
                )
                .arg(
                    Arg::new("rho")
                        .long("rho")
                        .value_name("RHO")
                        .default_value("1.0")
                        .help("Radial position (0 = center, 1 = perimeter)"),
                )
                .arg(
                    Arg::new("leds")
                        .long("leds")
                        .value_name("COUNT")
                        .default_value("60")
                        .help("Total LEDs on the strip"),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_name("LEDS")
                        .default_value("8")
                        .help("Lit arc width in LEDs"),
                ),
        )
        .subcommand(
            Command::new("color")
                .about("Print the coordinate-to-color mapping as JSON")
                .arg(
                    Arg::new("theta")
                        .long("theta")
                        .value_name("RADIANS")
                        .default_value("0.0")
                        .help("Angular position in radians"),
                )
                .arg(
                    Arg::new("rho")
                        .long("rho")
                        .value_name("RHO")
                        .default_value("1.0")
                        .help("Radial position (0 = center, 1 = perimeter)"),
                )
                .arg(
                    Arg::new("demo")
                        .long("demo")
                        .action(ArgAction::SetTrue)
                        .help("Use the discrete high-contrast demo palette"),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Drive a simulated spiral through the sync engine with a dry-run device")
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_name("MODE")
                        .default_value("position")
                        .help("Sync mode: position, speed, progress, trail, demo, or localized"),
                )
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .value_name("COUNT")
                        .default_value("200")
                        .help("Number of position samples to generate"),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .value_name("MS")
                        .default_value("20")
                        .help("Delay between samples"),
                )
                .arg(
                    Arg::new("throttle-ms")
                        .long("throttle-ms")
                        .value_name("MS")
                        .default_value("50")
                        .help("Minimum interval between accepted samples"),
                )
                .arg(
                    Arg::new("leds")
                        .long("leds")
                        .value_name("COUNT")
                        .default_value("60")
                        .help("Total LEDs on the strip"),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_name("LEDS")
                        .default_value("8")
                        .help("Lit arc width in LEDs (localized mode)"),
                )
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .action(ArgAction::SetTrue)
                        .help("Simulate an unreachable device"),
                ),
        )
        .subcommand(
            Command::new("state")
                .about("Print the persisted session state record as JSON")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_name("PATH")
                        .default_value("state.json")
                        .help("Path to the state file"),
                ),
        )
}
