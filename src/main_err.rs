use std::{error::Error, fmt::{self, Display}, io};

use crate::history::HistoryError;
use crate::server::ServerError;
use crate::transceiver::TransceiverError;

#[derive(Debug)]
pub enum MainErr {
    Generic(String),
    IO(io::Error),
    History(HistoryError),
    Transceiver(TransceiverError),
    Server(ServerError)
}

impl Display for MainErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainErr::Generic(s) => f.write_str(&s),
            MainErr::IO(e) => f.write_fmt(format_args!("i/o error: {e}")),
            MainErr::History(e) => f.write_fmt(format_args!("history error: {e}")),
            MainErr::Transceiver(e) => f.write_fmt(format_args!("transceiver error: {e}")),
            MainErr::Server(e) => f.write_fmt(format_args!("server error: {e}"))
        }
    }
}

impl Error for MainErr {}

impl From<io::Error> for MainErr {
    fn from(value: io::Error) -> Self {
        return Self::IO(value);
    }
}

impl From<HistoryError> for MainErr {
    fn from(value: HistoryError) -> Self {
        return Self::History(value);
    }
}

impl From<TransceiverError> for MainErr {
    fn from(value: TransceiverError) -> Self {
        return Self::Transceiver(value);
    }
}

impl From<ServerError> for MainErr {
    fn from(value: ServerError) -> Self {
        return Self::Server(value);
    }
}

impl From<&str> for MainErr {
    fn from(value: &str) -> Self {
        return Self::Generic(String::from(value));
    }
}

impl From<String> for MainErr {
    fn from(value: String) -> Self {
        return Self::Generic(value);
    }
}
