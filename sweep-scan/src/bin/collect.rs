use clap::{value_parser, Arg, ArgAction, Command};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use sweep_scan::{
    run_sweep, write_records, ClientError, MeasurementSource, MockSource, NetworkedSource,
    ProgressSink, ScanBounds,
};
use tracing::info;

struct Args {
    host: Option<String>,
    port: Option<u16>,
    output: PathBuf,
    mock: bool,
    bounds: ScanBounds,
    attempts: u32,
    io_timeout_secs: Option<u64>,
}

fn parse_args() -> Args {
    let matches = Command::new("Sweep collector.")
        .about("Sweeps a pan/tilt range sensor and writes the point cloud as CSV.")
        .disable_version_flag(true)
        .arg(
            Arg::new("host")
                .short('H')
                .long("host")
                .help("Hostname or address of the measurement station")
                .required_unless_present("mock"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("TCP port of the measurement station")
                .value_parser(value_parser!(u16))
                .required_unless_present("mock"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("File to write the collected records to")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .help("Sweep against fixed readings without a station")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("min-theta")
                .long("min-theta")
                .help("First tilt angle in degrees")
                .value_parser(value_parser!(i32))
                .default_value("90"),
        )
        .arg(
            Arg::new("max-theta")
                .long("max-theta")
                .help("Last tilt angle in degrees, inclusive")
                .value_parser(value_parser!(i32))
                .default_value("160"),
        )
        .arg(
            Arg::new("theta-step")
                .long("theta-step")
                .help("Tilt increment in degrees")
                .value_parser(value_parser!(i32))
                .default_value("5"),
        )
        .arg(
            Arg::new("min-phi")
                .long("min-phi")
                .help("First pan angle in degrees")
                .value_parser(value_parser!(i32))
                .default_value("0"),
        )
        .arg(
            Arg::new("max-phi")
                .long("max-phi")
                .help("Last pan angle in degrees, inclusive")
                .value_parser(value_parser!(i32))
                .default_value("160"),
        )
        .arg(
            Arg::new("phi-step")
                .long("phi-step")
                .help("Pan increment in degrees")
                .value_parser(value_parser!(i32))
                .default_value("5"),
        )
        .arg(
            Arg::new("attempts")
                .long("attempts")
                .help("Measurement attempts per orientation before the point is skipped")
                .value_parser(value_parser!(u32))
                .default_value("10"),
        )
        .arg(
            Arg::new("io-timeout-secs")
                .long("io-timeout-secs")
                .help("Abort the sweep if the station takes longer than this to reply")
                .value_parser(value_parser!(u64)),
        )
        .get_matches();

    Args {
        host: matches.get_one::<String>("host").map(String::to_string),
        port: matches.get_one("port").copied(),
        output: matches.get_one::<PathBuf>("output").unwrap().clone(),
        mock: matches.get_flag("mock"),
        bounds: ScanBounds {
            min_theta: *matches.get_one("min-theta").unwrap(),
            max_theta: *matches.get_one("max-theta").unwrap(),
            theta_step: *matches.get_one("theta-step").unwrap(),
            min_phi: *matches.get_one("min-phi").unwrap(),
            max_phi: *matches.get_one("max-phi").unwrap(),
            phi_step: *matches.get_one("phi-step").unwrap(),
        },
        attempts: *matches.get_one("attempts").unwrap(),
        io_timeout_secs: matches.get_one("io-timeout-secs").copied(),
    }
}

struct BarProgress {
    bar: ProgressBar,
}

impl ProgressSink for BarProgress {
    fn update(&mut self, completed: usize, _total: usize, last_temperature: Option<f64>) {
        self.bar.set_position(completed as u64);
        if let Some(temperature) = last_temperature {
            self.bar.set_message(format!("temperature={temperature}"));
        }
    }
}

fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt::init();
    let args = parse_args();

    let mut source: Box<dyn MeasurementSource> = if args.mock {
        Box::new(MockSource)
    } else {
        let host = args.host.unwrap();
        let port = args.port.unwrap();
        info!(host = %host, port, "connecting to measurement station");
        let mut source = NetworkedSource::connect(&host, port)?;
        if let Some(seconds) = args.io_timeout_secs {
            source.set_read_timeout(Some(Duration::from_secs(seconds)))?;
        }
        Box::new(source)
    };

    let bar = ProgressBar::new(args.bounds.total() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("Collecting measurements [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap(),
    );
    let mut progress = BarProgress { bar: bar.clone() };

    let sweep = run_sweep(source.as_mut(), &args.bounds, args.attempts, &mut progress)?;
    bar.finish();

    info!(
        path = %args.output.display(),
        points = sweep.points.len(),
        "writing records"
    );
    write_records(&args.output, &sweep)?;
    Ok(())
}
