use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Self::Io
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Io,
    InvalidHeader(u8),
    InvalidTail(u8),
    InvalidCodePoint(u32),
    Overlong(u32),
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io => write!(formatter, "io error"),
            Error::InvalidHeader(byte) => {
                write!(formatter, "Invalid UTF-8 header byte: 0x{:02X}", byte)
            }
            Error::InvalidTail(byte) => {
                write!(formatter, "Invalid UTF-8 tail byte: 0x{:02X}", byte)
            }
            Error::InvalidCodePoint(code) => {
                write!(formatter, "Invalid UTF-8 code point: U+{:04X}", code)
            }
            Error::Overlong(code) => {
                write!(formatter, "Overlong UTF-8 code point: U+{:04X}", code)
            }
        }
    }
}

impl std::error::Error for Error {}
