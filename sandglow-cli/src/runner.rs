use std::error::Error;
use std::f64::consts::TAU;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use clap::ArgMatches;
use log::info;
use rand::Rng;
use serde_json::json;

use sandglow_lib::color;
use sandglow_lib::device::dry_run::DryRunDevice;
use sandglow_lib::segments;
use sandglow_lib::state;
use sandglow_lib::sync::{PositionSample, SyncEngine, SyncMode, SyncSettings, TickOutcome};

// Turns traced by the simulated spiral from center to perimeter.
const SIMULATED_TURNS: f64 = 8.0;

pub fn run(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    match args.subcommand() {
        Some(("plan", sub)) => run_plan(sub),
        Some(("color", sub)) => run_color(sub),
        Some(("simulate", sub)) => run_simulate(sub),
        Some(("state", sub)) => run_state(sub),
        _ => Ok(-1),
    }
}

fn parse_arg<T>(args: &ArgMatches, name: &str) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    // Every argument carries a default, so the value is always present.
    let raw = args.get_one::<String>(name).unwrap();
    raw.parse::<T>().map_err(Into::into)
}

fn run_plan(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    let theta: f64 = parse_arg(args, "theta")?;
    let rho: f64 = parse_arg(args, "rho")?;
    let total_leds: u16 = parse_arg(args, "leds")?;
    let width: u16 = parse_arg(args, "width")?;

    let hue = color::hue_from_theta(theta);
    let lit = color::hsv_to_rgb(hue as f64, 1.0, 1.0);
    let plan = segments::plan(theta, total_leds, width, lit)?;

    println!(
        "{}",
        json!({
            "led_position": segments::led_position(theta, total_leds),
            "brightness": color::brightness_from_rho(rho, 50, 255),
            "segments": plan,
        })
    );
    Ok(0)
}

fn run_color(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    let theta: f64 = parse_arg(args, "theta")?;
    let rho: f64 = parse_arg(args, "rho")?;
    let demo = args.get_flag("demo");

    let hue = color::hue_from_theta(theta);
    let (rgb, brightness) = if demo {
        (color::sextant_color(hue), color::brightness_from_rho(rho, 100, 255))
    } else {
        (
            color::hsv_to_rgb(hue as f64, 1.0, 1.0),
            color::brightness_from_rho(rho, 30, 255),
        )
    };

    println!(
        "{}",
        json!({
            "hue": hue,
            "brightness": brightness,
            "rgb": rgb,
        })
    );
    Ok(0)
}

fn run_simulate(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    let mode: SyncMode = args.get_one::<String>("mode").unwrap().parse()?;
    let ticks: u32 = parse_arg(args, "ticks")?;
    let interval_ms: u64 = parse_arg(args, "interval-ms")?;
    let throttle_ms: u64 = parse_arg(args, "throttle-ms")?;
    let total_leds: u16 = parse_arg(args, "leds")?;
    let segment_width: u16 = parse_arg(args, "width")?;

    let device = Arc::new(DryRunDevice::new());
    if args.get_flag("offline") {
        device.set_offline(true);
    }

    let engine = SyncEngine::with_settings(
        device.clone(),
        SyncSettings {
            enabled: true,
            mode,
            throttle_ms,
            total_leds,
            segment_width,
        },
    );

    info!("simulating {} ticks in {} mode", ticks, mode);
    let mut rng = rand::thread_rng();
    let mut sent = 0u32;
    let mut failed = 0u32;
    let mut throttled = 0u32;

    for tick in 0..ticks {
        let t = tick as f64 / ticks.max(1) as f64;
        let theta = t * SIMULATED_TURNS * TAU;
        let rho = (t + rng.gen_range(-0.01..0.01)).clamp(0.0, 1.0);
        let sample = PositionSample {
            theta,
            rho,
            progress: Some(t),
            speed: Some(rng.gen_range(0.5..2.0)),
        };

        match engine.tick(&sample) {
            TickOutcome::Sent(status) if status.connected => sent += 1,
            TickOutcome::Sent(_) => failed += 1,
            TickOutcome::Throttled => throttled += 1,
            TickOutcome::Disabled => {}
        }

        if interval_ms > 0 {
            sleep(Duration::from_millis(interval_ms));
        }
    }

    println!(
        "{}",
        json!({
            "ticks": ticks,
            "sent": sent,
            "failed": failed,
            "throttled": throttled,
            "commands_recorded": device.commands_sent(),
        })
    );
    Ok(0)
}

fn run_state(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    let path = args.get_one::<String>("file").unwrap();
    let record = state::load_or_default(Path::new(path));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(0)
}
