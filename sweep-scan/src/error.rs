use std::error::Error;
use std::fmt::Display;
use std::{fmt, io};

#[derive(Debug)]
pub enum ClientError {
    UnknownErrorCode(u8),
    ConnectionClosed(),
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::UnknownErrorCode(code) => {
                write!(f, "The station reported unknown error code {}.", code)
            }
            ClientError::ConnectionClosed() => {
                write!(f, "The station closed the connection before responding")
            }
            ClientError::Json(err) => Display::fmt(&err, f),
            ClientError::Io(err) => Display::fmt(&err, f),
        }
    }
}

impl Error for ClientError {}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        ClientError::Io(err)
    }
}
impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json(err)
    }
}
