use clap::{value_parser, Arg, ArgAction, Command};
use std::net::TcpListener;
use sweep_station::{
    serve, I2cPwmBus, MeasurementService, MockRangeSensor, MockServoDrive, SerialRangeSensor,
    ServoController, StationError,
};
use tracing::info;

struct Args {
    port: u16,
    serial_port: String,
    i2c_bus: u8,
    mock: bool,
}

fn parse_args() -> Args {
    let matches = Command::new("Sweep measurement station.")
        .about("Serves one-point range measurements over TCP.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("TCP port to listen on")
                .value_parser(value_parser!(u16))
                .required(true),
        )
        .arg(
            Arg::new("serial-port")
                .long("serial-port")
                .help("The device path to the range sensor serial port")
                .default_value("/dev/ttyUSB0"),
        )
        .arg(
            Arg::new("i2c-bus")
                .long("i2c-bus")
                .help("Linux I2C bus number of the servo controller")
                .value_parser(value_parser!(u8))
                .default_value("1"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .help("Serve fixed readings without touching any hardware")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    Args {
        port: *matches.get_one("port").unwrap(),
        serial_port: matches
            .get_one::<String>("serial-port")
            .unwrap()
            .to_string(),
        i2c_bus: *matches.get_one("i2c-bus").unwrap(),
        mock: matches.get_flag("mock"),
    }
}

fn main() -> Result<(), StationError> {
    tracing_subscriber::fmt::init();
    let args = parse_args();

    let service = if args.mock {
        MeasurementService::new(Box::new(MockServoDrive), Box::new(MockRangeSensor))
    } else {
        let bus = I2cPwmBus::open(args.i2c_bus)?;
        let servos = ServoController::new(Box::new(bus))?;
        let sensor = SerialRangeSensor::open(&args.serial_port)?;
        MeasurementService::new(Box::new(servos), Box::new(sensor))
    };

    info!(port = args.port, "starting server");
    let listener = TcpListener::bind(("0.0.0.0", args.port))?;
    info!(port = args.port, "listening for connections");
    serve(listener, service)
}
