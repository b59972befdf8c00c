use super::error::{Error, Result};
use std::fmt::{self, Display};
use std::io::{self, Read};

const HEADER_1: u8 = 0b0000_0000; // 0xxxxxxx
const HEADER_1_MASK: u8 = 0b1000_0000;
const HEADER_2: u8 = 0b1100_0000; // 110xxxxx
const HEADER_2_MASK: u8 = 0b1110_0000;
const HEADER_3: u8 = 0b1110_0000; // 1110xxxx
const HEADER_3_MASK: u8 = 0b1111_0000;
const HEADER_4: u8 = 0b1111_0000; // 11110xxx
const HEADER_4_MASK: u8 = 0b1111_1000;
const TAIL: u8 = 0b1000_0000; // 10xxxxxx
const TAIL_MASK: u8 = 0b1100_0000;

// highest code point each encoding length can carry
const LAST_1: u32 = 0x7F;
const LAST_2: u32 = 0x7FF;
const LAST_3: u32 = 0xFFFF;
const LAST_4: u32 = 0x10FFFF;

// UTF-16 surrogate halves, never valid scalar values
const SURROGATE_FIRST: u32 = 0xD800;
const SURROGATE_LAST: u32 = 0xDFFF;

pub trait Source {
    fn next_byte(&mut self) -> Result<Option<u8>>;
}

pub struct SourceFromBytes<I>(I);
pub struct SourceFromIo<I>(I);

impl<I> Source for SourceFromBytes<I>
where
    I: Iterator<Item = u8>,
{
    fn next_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.0.next())
    }
}

impl<I> Source for SourceFromIo<I>
where
    I: Iterator<Item = io::Result<u8>>,
{
    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.0.next() {
            Some(byte) => Ok(Some(byte?)),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub ascii: u64,
    pub multi: u64,
}

impl Counts {
    fn record(&mut self, scalar: char) {
        if scalar.is_ascii() {
            self.ascii += 1;
        } else {
            self.multi += 1;
        }
    }
}

impl Display for Counts {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "Found {} ASCII and {} multi-byte UTF-8 characters.",
            self.ascii, self.multi
        )
    }
}

pub struct Scanner<S: Source> {
    offset: u64,
    counts: Counts,
    input: S,
}

impl<S> Scanner<S>
where
    S: Source,
{
    pub fn new(input: S) -> Self {
        Self {
            offset: 0,
            counts: Counts::default(),
            input,
        }
    }

    /// Bytes consumed so far, the failing byte included.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Characters seen before the current position.
    pub fn counts(&self) -> Counts {
        self.counts
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.input.next_byte()?;
        if byte.is_some() {
            self.offset += 1;
        }
        Ok(byte)
    }

    pub fn next_scalar(&mut self) -> Result<Option<char>> {
        let Some(scalar) = self.decode_scalar()? else {
            return Ok(None);
        };
        self.counts.record(scalar);
        Ok(Some(scalar))
    }

    pub fn scan(&mut self) -> Result<Counts> {
        while self.next_scalar()?.is_some() {}
        Ok(self.counts)
    }

    fn decode_scalar(&mut self) -> Result<Option<char>> {
        let Some(header) = self.next_byte()? else {
            return Ok(None);
        };
        if header & HEADER_1_MASK == HEADER_1 {
            debug_assert!(header.is_ascii());
            return Ok(Some(header as char));
        }
        let (payload, tails) = match () {
            () if header & HEADER_2_MASK == HEADER_2 => (header & !HEADER_2_MASK, 1),
            () if header & HEADER_3_MASK == HEADER_3 => (header & !HEADER_3_MASK, 2),
            () if header & HEADER_4_MASK == HEADER_4 => (header & !HEADER_4_MASK, 3),
            () => return Err(Error::InvalidHeader(header)),
        };
        let mut code = payload as u32;
        for _ in 0..tails {
            // input ending inside a character reports the bits gathered so far
            let Some(tail) = self.next_byte()? else {
                return Err(Error::InvalidCodePoint(code));
            };
            if tail & TAIL_MASK != TAIL {
                return Err(Error::InvalidTail(tail));
            }
            code <<= 6;
            code |= (tail & !TAIL_MASK) as u32;
        }
        match tails {
            2 if matches!(code, SURROGATE_FIRST..=SURROGATE_LAST) => {
                return Err(Error::InvalidCodePoint(code));
            }
            3 if code > LAST_4 => {
                return Err(Error::InvalidCodePoint(code));
            }
            _ => {}
        }
        let shorter = match tails {
            1 => LAST_1,
            2 => LAST_2,
            _ => LAST_3,
        };
        // encodable in fewer bytes
        if code <= shorter {
            return Err(Error::Overlong(code));
        }
        Ok(Some(code.try_into().ok().ok_or(Error::InvalidCodePoint(code))?))
    }
}

impl<I> Scanner<SourceFromBytes<I>>
where
    I: Iterator<Item = u8>,
{
    pub fn from_bytes(bytes: impl IntoIterator<IntoIter = I>) -> Self {
        Self::new(SourceFromBytes(bytes.into_iter()))
    }
}

impl<R> Scanner<SourceFromIo<io::Bytes<R>>>
where
    R: Read,
{
    pub fn from_reader(reader: R) -> Self {
        Self::new(SourceFromIo(reader.bytes()))
    }
}

pub fn scan_bytes(bytes: impl IntoIterator<Item = u8>) -> Result<Counts> {
    Scanner::from_bytes(bytes.into_iter()).scan()
}

pub fn scan_reader(reader: impl Read) -> Result<Counts> {
    Scanner::from_reader(reader).scan()
}
