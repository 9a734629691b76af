use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::{
    error::{Error, Result},
    TagType,
};

const CHUNK: usize = 64 * 1024;

/// Jumps `n` bytes forward in a seekable reader.
pub(crate) type SeekFn<R> = fn(&mut R, u64) -> io::Result<()>;

fn seek_forward<R: Seek>(reader: &mut R, n: u64) -> io::Result<()> {
    let n = i64::try_from(n)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "skip too large"))?;
    reader.seek(SeekFrom::Current(n))?;
    Ok(())
}

/// Bytes between the current position and the end of a seekable reader,
/// leaving the position where it was.
fn remaining_len<R: Seek>(reader: &mut R) -> io::Result<u64> {
    let start = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    if end != start {
        reader.seek(SeekFrom::Start(start))?;
    }
    Ok(end.saturating_sub(start))
}

fn try_size(size: i32, multiplier: u64) -> Result<u64> {
    let size: u64 = size
        .try_into()
        .map_err(|_| Error::negative_length("array", size))?;

    Ok(size * multiplier)
}

/// Byte source for the reader. Counts every byte consumed so tags can report
/// their offset whether or not the underlying reader can tell its position.
///
/// Reads loop until the requested number of bytes has arrived, so readers
/// that hand back a single byte per call work the same as any other.
pub(crate) struct Input<R> {
    reader: R,
    seek: Option<SeekFn<R>>,
    // Value of `position` at which a seekable reader runs out, if known.
    end: Option<u64>,
    position: u64,
    scratch: Vec<u8>,
}

impl<R: Read> Input<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            seek: None,
            end: None,
            position: 0,
            scratch: Vec::new(),
        }
    }

    /// Seekable input. The length of the reader is measured once here, so a
    /// seek that would land past the end fails like a short read does.
    pub fn new_seekable(mut reader: R) -> Self
    where
        R: Seek,
    {
        let end = match remaining_len(&mut reader) {
            Ok(len) => Some(len),
            Err(e) => {
                debug!("cannot measure seekable input, seeks are unchecked: {}", e);
                None
            }
        };
        Self {
            seek: Some(seek_forward::<R>),
            end,
            ..Self::new(reader)
        }
    }

    pub fn can_seek(&self) -> bool {
        self.seek.is_some()
    }

    /// Bytes consumed (read or skipped) since the input was handed over.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Fill as much of `buf` as the reader will give before it reports EOF.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }

    fn consume_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.fill(buf)? < buf.len() {
            return Err(Error::unexpected_eof());
        }
        Ok(())
    }

    fn consume_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0; N];
        self.consume_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read the tag type byte that starts a document. Running out of input
    /// before this byte is a clean EOF rather than a truncation.
    pub fn consume_first_tag(&mut self) -> Result<TagType> {
        let mut buf = [0; 1];
        if self.fill(&mut buf)? == 0 {
            return Err(Error::eof());
        }
        u8_to_tag(buf[0])
    }

    pub fn consume_tag(&mut self) -> Result<TagType> {
        let tag = self.consume_byte()?;
        u8_to_tag(tag)
    }

    pub fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.consume_array::<1>()?[0])
    }

    pub fn consume_i8(&mut self) -> Result<i8> {
        Ok(self.consume_byte()? as i8)
    }

    pub fn consume_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(&self.consume_array::<2>()?))
    }

    pub fn consume_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(&self.consume_array::<2>()?))
    }

    pub fn consume_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(&self.consume_array::<4>()?))
    }

    pub fn consume_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(&self.consume_array::<8>()?))
    }

    pub fn consume_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(&self.consume_array::<4>()?))
    }

    pub fn consume_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(&self.consume_array::<8>()?))
    }

    /// Read `len` bytes, growing the buffer as data arrives rather than
    /// trusting a length taken from the input up front.
    fn consume_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(CHUNK));
        while buf.len() < len {
            let start = buf.len();
            let end = start + (len - start).min(CHUNK);
            buf.resize(end, 0);
            self.consume_exact(&mut buf[start..end])?;
        }
        Ok(buf)
    }

    pub fn consume_str(&mut self) -> Result<String> {
        let len = self.consume_u16()? as usize;
        let buf = self.consume_vec(len)?;
        String::from_utf8(buf).map_err(|e| Error::nonunicode(e.as_bytes()))
    }

    pub fn consume_bytes(&mut self, len: usize) -> Result<Vec<i8>> {
        let buf = self.consume_vec(len)?;
        Ok(buf.into_iter().map(|b| b as i8).collect())
    }

    pub fn consume_ints(&mut self, len: usize) -> Result<Vec<i32>> {
        let size = len
            .checked_mul(std::mem::size_of::<i32>())
            .ok_or_else(|| Error::format("int array too large"))?;
        let buf = self.consume_vec(size)?;
        let mut ints = vec![0i32; len];
        BigEndian::read_i32_into(&buf, &mut ints);
        Ok(ints)
    }

    pub fn ignore_str(&mut self) -> Result<()> {
        let len = self.consume_u16()?;
        self.ignore_bytes(len as u64)
    }

    /// Skip over `size` bytes, seeking if the reader allows it and reading
    /// into a scratch buffer otherwise.
    pub fn ignore_bytes(&mut self, size: u64) -> Result<()> {
        if size == 0 {
            return Ok(());
        }

        if let Some(seek) = self.seek {
            let available = match self.end {
                Some(end) => size.min(end.saturating_sub(self.position)),
                None => size,
            };
            seek(&mut self.reader, available)?;
            self.position += available;
            if available < size {
                return Err(Error::unexpected_eof());
            }
            return Ok(());
        }

        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.resize(size.min(CHUNK as u64) as usize, 0);

        let mut remaining = size;
        let result = loop {
            if remaining == 0 {
                break Ok(());
            }
            let n = remaining.min(CHUNK as u64) as usize;
            match self.fill(&mut scratch[..n]) {
                Ok(got) if got == n => remaining -= n as u64,
                Ok(_) => break Err(Error::unexpected_eof()),
                Err(e) => break Err(e),
            }
        };

        self.scratch = scratch;
        result
    }

    /// Skip the payload of a value tag whose header (including any array
    /// length) has already been read.
    pub fn ignore_value(&mut self, tag: TagType, length: i32) -> Result<()> {
        match tag {
            TagType::Byte => self.ignore_bytes(1),
            TagType::Short => self.ignore_bytes(2),
            TagType::Int | TagType::Float => self.ignore_bytes(4),
            TagType::Long | TagType::Double => self.ignore_bytes(8),
            TagType::String => self.ignore_str(),
            TagType::ByteArray => self.ignore_bytes(try_size(length, 1)?),
            TagType::IntArray => {
                self.ignore_bytes(try_size(length, std::mem::size_of::<i32>() as u64)?)
            }
            TagType::List | TagType::Compound | TagType::End | TagType::Unknown => Err(
                Error::format(format!("{} does not have a value to skip", tag)),
            ),
        }
    }
}

pub(crate) fn u8_to_tag(tag: u8) -> Result<TagType> {
    TagType::try_from(tag).map_err(|_| Error::invalid_tag(tag))
}
