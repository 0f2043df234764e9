use crate::error::ClientError;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::time::Duration;
use sweep_data::wire::{CHECKSUM_INVALID, SIGNAL_TOO_WEAK};
use sweep_data::{Measurement, MeasurementOutcome, Response, ScanTarget};
use tracing::warn;

/// A measurement backend the sweep is driven against.
pub trait MeasurementSource {
    /// Executes one request/response exchange for one orientation.
    fn request_measurement(
        &mut self,
        target: ScanTarget,
    ) -> Result<MeasurementOutcome, ClientError>;
}

/// Source that speaks the wire protocol to a measurement station.
pub struct NetworkedSource {
    reader: BufReader<TcpStream>,
    stream: TcpStream,
}

impl NetworkedSource {
    pub fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let stream = TcpStream::connect((host, port))?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(NetworkedSource { reader, stream })
    }

    /// Bounds every wire read so a hung station fails the sweep instead of
    /// blocking it forever.
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<(), ClientError> {
        self.stream.set_read_timeout(timeout)?;
        Ok(())
    }
}

impl MeasurementSource for NetworkedSource {
    fn request_measurement(
        &mut self,
        target: ScanTarget,
    ) -> Result<MeasurementOutcome, ClientError> {
        let mut request = serde_json::to_string(&target)?;
        request.push('\n');
        self.stream.write_all(request.as_bytes())?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ClientError::ConnectionClosed());
        }

        match serde_json::from_str(line.trim_end())? {
            Response::Reading(measurement) => Ok(MeasurementOutcome::Measured(measurement)),
            Response::Fault {
                error_code: CHECKSUM_INVALID,
            } => Ok(MeasurementOutcome::ChecksumInvalid),
            Response::Fault {
                error_code: SIGNAL_TOO_WEAK,
            } => Ok(MeasurementOutcome::WeakSignal),
            Response::Fault { error_code } => Err(ClientError::UnknownErrorCode(error_code)),
        }
    }
}

/// Source that answers every request with a fixed nearby reading.
pub struct MockSource;

impl MeasurementSource for MockSource {
    fn request_measurement(
        &mut self,
        _target: ScanTarget,
    ) -> Result<MeasurementOutcome, ClientError> {
        Ok(MeasurementOutcome::Measured(Measurement {
            distance: 10.,
            strength: 10.,
            temperature: 10.,
        }))
    }
}

/// Requests one measurement, retrying the two transient sensor faults until
/// the attempt budget runs out. Exhaustion degrades to `Unavailable`;
/// unknown error codes and transport failures abort instead of retrying.
pub fn fetch_measurement(
    source: &mut dyn MeasurementSource,
    target: ScanTarget,
    max_attempts: u32,
) -> Result<MeasurementOutcome, ClientError> {
    for attempt in 0..max_attempts {
        let outcome = source.request_measurement(target)?;
        match outcome {
            MeasurementOutcome::Measured(_) | MeasurementOutcome::Unavailable => {
                return Ok(outcome)
            }
            MeasurementOutcome::ChecksumInvalid => {
                warn!(
                    theta = target.theta,
                    phi = target.phi,
                    attempt,
                    max_attempts,
                    "collected data failed checksum verification"
                );
            }
            MeasurementOutcome::WeakSignal => {
                warn!(
                    phi = target.phi,
                    theta = target.theta,
                    attempt,
                    max_attempts,
                    "collected data signal was too weak"
                );
            }
        }
    }

    warn!(
        phi = target.phi,
        theta = target.theta,
        max_attempts,
        "exceeded max retries; skipping data point"
    );
    Ok(MeasurementOutcome::Unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{SocketAddr, TcpListener};
    use std::thread;

    const READING: &str = "{\"distance\": 10.0, \"strength\": 210.0, \"temperature\": 4.0}";

    // Replies with the scripted lines in order, repeating the last one, and
    // reports how many requests it saw once the client hangs up.
    fn scripted_station(replies: Vec<&'static str>) -> (SocketAddr, thread::JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut requests = 0usize;
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 {
                    return requests;
                }
                let reply = replies[requests.min(replies.len() - 1)];
                requests += 1;
                stream.write_all(reply.as_bytes()).unwrap();
                stream.write_all(b"\n").unwrap();
            }
        });
        (address, handle)
    }

    fn connect(address: SocketAddr) -> NetworkedSource {
        NetworkedSource::connect("127.0.0.1", address.port()).unwrap()
    }

    fn target() -> ScanTarget {
        ScanTarget { theta: 90., phi: 0. }
    }

    #[test]
    fn test_fetch_returns_first_good_measurement() {
        let (address, station) = scripted_station(vec![READING]);
        let mut source = connect(address);

        let outcome = fetch_measurement(&mut source, target(), 10).unwrap();
        let expected = Measurement {
            distance: 10.,
            strength: 210.,
            temperature: 4.,
        };
        assert!(matches!(outcome, MeasurementOutcome::Measured(m) if m == expected));

        drop(source);
        assert_eq!(station.join().unwrap(), 1);
    }

    #[test]
    fn test_fetch_exhausts_attempts_then_gives_up() {
        let (address, station) = scripted_station(vec!["{\"error_code\": 2}"]);
        let mut source = connect(address);

        let outcome = fetch_measurement(&mut source, target(), 10).unwrap();
        assert!(matches!(outcome, MeasurementOutcome::Unavailable));

        drop(source);
        assert_eq!(station.join().unwrap(), 10);
    }

    #[test]
    fn test_fetch_retries_transient_faults() {
        let (address, station) = scripted_station(vec![
            "{\"error_code\": 1}",
            "{\"error_code\": 2}",
            READING,
        ]);
        let mut source = connect(address);

        let outcome = fetch_measurement(&mut source, target(), 10).unwrap();
        assert!(matches!(outcome, MeasurementOutcome::Measured(_)));

        drop(source);
        assert_eq!(station.join().unwrap(), 3);
    }

    #[test]
    fn test_unknown_error_code_aborts_immediately() {
        let (address, station) = scripted_station(vec!["{\"error_code\": 3}"]);
        let mut source = connect(address);

        let result = fetch_measurement(&mut source, target(), 10);
        assert!(matches!(result, Err(ClientError::UnknownErrorCode(3))));

        drop(source);
        assert_eq!(station.join().unwrap(), 1);
    }

    #[test]
    fn test_malformed_payload_aborts() {
        let (address, _station) = scripted_station(vec!["not json"]);
        let mut source = connect(address);

        let result = fetch_measurement(&mut source, target(), 10);
        assert!(matches!(result, Err(ClientError::Json(_))));
    }

    #[test]
    fn test_closed_connection_aborts() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        // reads one request, then hangs up without replying
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
        });

        let mut source = connect(address);
        let result = source.request_measurement(target());
        assert!(matches!(result, Err(ClientError::ConnectionClosed())));
    }
}
