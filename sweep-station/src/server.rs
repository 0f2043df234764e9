use crate::error::StationError;
use crate::service::MeasurementService;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use sweep_data::wire::{CHECKSUM_INVALID, REQUEST_FAILED, SIGNAL_TOO_WEAK};
use sweep_data::{MeasurementOutcome, Response, ScanTarget};
use tracing::{info, warn};

/// Accepts one client at a time and serves its requests until it
/// disconnects. A failure while serving one client drops that connection
/// and the listener accepts the next; only the listener itself failing ends
/// the loop.
pub fn serve(listener: TcpListener, mut service: MeasurementService) -> Result<(), StationError> {
    loop {
        info!("waiting for connection");
        let (stream, address) = listener.accept()?;
        info!(ip = %address.ip(), "client connected");
        if let Err(err) = handle_connection(stream, &mut service) {
            warn!(error = %err, "dropping connection after request failure");
        }
        info!(ip = %address.ip(), "client disconnected");
    }
}

fn handle_connection(
    mut stream: TcpStream,
    service: &mut MeasurementService,
) -> Result<(), StationError> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let target: ScanTarget = match serde_json::from_str(line.trim_end()) {
            Ok(target) => target,
            Err(err) => {
                warn!(error = %err, "dropping connection after malformed request");
                return Ok(());
            }
        };
        info!(phi = target.phi, theta = target.theta, "received request");

        let response = match service.measure_at(target.theta, target.phi) {
            Ok(MeasurementOutcome::Measured(measurement)) => {
                info!(
                    phi = target.phi,
                    theta = target.theta,
                    distance = measurement.distance,
                    strength = measurement.strength,
                    temperature = measurement.temperature,
                    "collected measurement"
                );
                Response::Reading(measurement)
            }
            Ok(MeasurementOutcome::ChecksumInvalid) => {
                warn!(
                    phi = target.phi,
                    theta = target.theta,
                    "collected data failed checksum verification"
                );
                Response::Fault {
                    error_code: CHECKSUM_INVALID,
                }
            }
            Ok(MeasurementOutcome::WeakSignal) => {
                warn!(
                    phi = target.phi,
                    theta = target.theta,
                    "collected data signal was too weak"
                );
                Response::Fault {
                    error_code: SIGNAL_TOO_WEAK,
                }
            }
            Ok(MeasurementOutcome::Unavailable) => {
                warn!(
                    phi = target.phi,
                    theta = target.theta,
                    "no measurement available for request"
                );
                Response::Fault {
                    error_code: REQUEST_FAILED,
                }
            }
            Err(StationError::AngleOutOfRange(angle)) => {
                warn!(
                    phi = target.phi,
                    theta = target.theta,
                    angle,
                    "rejected request outside the servo range"
                );
                Response::Fault {
                    error_code: REQUEST_FAILED,
                }
            }
            Err(err) => return Err(err),
        };

        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        stream.write_all(payload.as_bytes())?;
    }
}
