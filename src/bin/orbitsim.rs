use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use colored::*;
use orbitsim::scenario::Preset;
use orbitsim::telemetry::{TelemetryFrame, TelemetryRecorder};
use orbitsim::{ScenarioConfig, System};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_TICKS: &str = "1440";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = App::new("orbitsim")
        .version("0.1.0")
        .author("Space Systems Engineering Team")
        .about("🛰️  Orbit Simulator - N-body gravity with relaying, station-keeping satellites")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .takes_value(true)
                .possible_values(&["json", "table", "compact"])
                .default_value("table")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("▶️  Run a scenario headless and print telemetry")
                .arg(
                    Arg::with_name("preset")
                        .short("s")
                        .long("preset")
                        .value_name("NAME")
                        .help("Built-in scenario")
                        .takes_value(true)
                        .possible_values(&["earth-moon", "solar-system", "sirius", "mars-relay"])
                        .default_value("mars-relay")
                        .conflicts_with("config"),
                )
                .arg(
                    Arg::with_name("config")
                        .short("c")
                        .long("config")
                        .value_name("FILE")
                        .help("JSON scenario file")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("ticks")
                        .short("n")
                        .long("ticks")
                        .value_name("TICKS")
                        .help("Number of ticks to simulate")
                        .takes_value(true)
                        .default_value(DEFAULT_TICKS)
                        .validator(|v| match v.parse::<u64>() {
                            Ok(_) => Ok(()),
                            Err(_) => Err("Tick count must be a valid number".into()),
                        }),
                )
                .arg(
                    Arg::with_name("every")
                        .short("e")
                        .long("every")
                        .value_name("N")
                        .help("Print one frame out of every N")
                        .takes_value(true)
                        .default_value("60")
                        .validator(|v| match v.parse::<u64>() {
                            Ok(n) if n > 0 => Ok(()),
                            _ => Err("Sampling interval must be a positive number".into()),
                        }),
                ),
        )
        .subcommand(SubCommand::with_name("presets").about("📋 List built-in scenarios"))
        .subcommand(
            SubCommand::with_name("export")
                .about("💾 Print a built-in scenario as a JSON config")
                .arg(
                    Arg::with_name("preset")
                        .help("Scenario name")
                        .required(true)
                        .possible_values(&["earth-moon", "solar-system", "sirius", "mars-relay"]),
                ),
        )
        .subcommand(
            SubCommand::with_name("monitor")
                .about("📈 Follow the telemetry stream of a running orbitsim-server")
                .arg(
                    Arg::with_name("host")
                        .long("host")
                        .value_name("HOST")
                        .takes_value(true)
                        .default_value(DEFAULT_HOST),
                )
                .arg(
                    Arg::with_name("port")
                        .short("p")
                        .long("port")
                        .value_name("PORT")
                        .takes_value(true)
                        .default_value(DEFAULT_PORT),
                ),
        )
        .get_matches();

    let format = matches.value_of("format").unwrap_or("table");

    match matches.subcommand() {
        ("run", Some(sub)) => handle_run(sub, format)?,
        ("presets", Some(_)) => handle_presets(format)?,
        ("export", Some(sub)) => handle_export(sub)?,
        ("monitor", Some(sub)) => handle_monitor(sub, format).await?,
        _ => unreachable!("clap enforces a subcommand"),
    }

    Ok(())
}

fn load_system(matches: &ArgMatches<'_>) -> Result<(String, System), Box<dyn std::error::Error>> {
    let config = match matches.value_of("config") {
        Some(path) => ScenarioConfig::from_file(path)?,
        None => {
            let name = matches.value_of("preset").unwrap_or("mars-relay");
            Preset::from_name(name)
                .ok_or_else(|| format!("unknown preset {}", name))?
                .config()
        }
    };
    let system = config.build()?;
    Ok((config.name, system))
}

fn handle_run(matches: &ArgMatches<'_>, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ticks = matches.value_of("ticks").unwrap_or(DEFAULT_TICKS).parse::<u64>()?;
    let every = matches.value_of("every").unwrap_or("60").parse::<u64>()?;
    let (name, mut system) = load_system(matches)?;

    if format == "table" {
        println!(
            "{} {} ({} bodies, {} satellites, Δt = {} s)",
            "🚀".bright_green(),
            name.bright_white().bold(),
            system.bodies().len(),
            system.satellites().len(),
            system.dt_s()
        );
    }

    let mut recorder = TelemetryRecorder::new();
    for _ in 0..ticks {
        let frame = system.tick()?;
        if frame.tick % every == 0 {
            print_frame(&frame, format)?;
        }
        recorder.record(frame);
    }

    if format == "table" {
        print_summary(&system, &recorder);
    }
    Ok(())
}

fn print_frame(frame: &TelemetryFrame, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => println!("{}", frame.to_json()?),
        "compact" => {
            let parts: Vec<String> = frame
                .records
                .iter()
                .map(|r| {
                    let link = if r.is_connected() { "LINK".green() } else { "LOS".red() };
                    format!("{}={:.0}km/{:.0}%/{}", r.satellite, r.altitude / 1e3, r.battery, link)
                })
                .collect();
            println!("t={:>8.0}s {}", frame.time_s, parts.join(" "));
        }
        _ => {
            if frame.records.is_empty() {
                println!("{} t = {:.0} s", "⏱".bright_blue(), frame.time_s);
                return Ok(());
            }
            println!("{}", format!("── tick {} (t = {:.0} s) ──", frame.tick, frame.time_s).bright_blue());
            for r in &frame.records {
                let battery = format!("{:>6.1}%", r.battery);
                let battery = if r.battery > 50.0 {
                    battery.green()
                } else if r.battery > 20.0 {
                    battery.yellow()
                } else {
                    battery.red()
                };
                let links = format!("{}/{}", r.connections, r.attempted_connections);
                let links = if r.is_connected() { links.green() } else { links.red() };
                let burn = if r.boosting { "🔥 BURN".bright_yellow() } else { "".normal() };
                println!(
                    "  {:<14} alt {:>10.1} km  bat {}  links {}  {}",
                    r.satellite.bright_white(),
                    r.altitude / 1e3,
                    battery,
                    links,
                    burn
                );
            }
        }
    }
    Ok(())
}

fn print_summary(system: &System, recorder: &TelemetryRecorder) {
    if system.satellites().is_empty() {
        return;
    }
    println!("\n{}", "📊 Summary".bright_blue().bold());
    for satellite in system.satellites() {
        if let Some(summary) = recorder.summary(satellite.name()) {
            println!(
                "  {:<14} alt {:.1}..{:.1} km  min battery {:.1}%  connected {:.0}%  burn ticks {}",
                satellite.name().bright_white(),
                summary.min_altitude / 1e3,
                summary.max_altitude / 1e3,
                summary.min_battery,
                summary.connected_ratio * 100.0,
                summary.boosting_ticks
            );
        }
    }
}

fn handle_presets(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if format == "json" {
        let names: Vec<&str> = Preset::all().iter().map(|p| p.name()).collect();
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }
    println!("{}", "📋 Built-in scenarios".bright_blue().bold());
    for preset in Preset::all() {
        println!("  {:<14} {}", preset.name().bright_cyan(), preset.description());
    }
    Ok(())
}

fn handle_export(matches: &ArgMatches<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches.value_of("preset").unwrap_or_default();
    let preset = Preset::from_name(name).ok_or_else(|| format!("unknown preset {}", name))?;
    println!("{}", preset.config().to_json()?);
    Ok(())
}

async fn handle_monitor(matches: &ArgMatches<'_>, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let host = matches.value_of("host").unwrap_or(DEFAULT_HOST);
    let port = matches.value_of("port").unwrap_or(DEFAULT_PORT).parse::<u16>()?;
    let addr = format!("{}:{}", host, port);

    let stream = match TcpStream::connect(&addr).await {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("{} Failed to connect to orbitsim-server at {}", "❌".red(), addr.bright_white());
            return Err(e.into());
        }
    };
    println!("{}", "📡 Monitoring telemetry (Press Ctrl+C to stop)...".bright_blue().bold());

    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        match serde_json::from_str::<TelemetryFrame>(&line) {
            Ok(frame) => print_frame(&frame, format)?,
            Err(e) => eprintln!("{} Malformed telemetry line: {}", "⚠️".yellow(), e),
        }
    }

    println!("{} Server closed the stream", "🔌".bright_blue());
    Ok(())
}
