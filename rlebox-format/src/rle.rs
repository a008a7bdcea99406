//! Run-length encoding of fixed-width units.
//!
//! A payload is a sequence of runs. Each run is one count byte followed by one unit of
//! `unit_size` raw bytes, and stands for `count` consecutive repetitions of that unit.
//! The codec knows nothing about files or archives; it only moves bytes between a reader
//! and a writer.

use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::{Error, Field, Result, UnitSize};

/// The largest count a single run can carry.
pub const MAX_RUN: usize = u8::MAX as usize;

/// Encodes everything `reader` yields into runs written to `writer`, returning the number of
/// payload bytes written.
///
/// At most `MAX_RUN * unit_size` bytes of input are held in memory at any time. If the input
/// does not end on a unit boundary, the final unit is padded with zeroes; the caller is
/// expected to record the original length so the decoder can drop the padding.
pub fn encode<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    unit_size: UnitSize,
) -> Result<u64> {
    let unit = unit_size.bytes();
    let capacity = MAX_RUN * unit;
    let mut buf = Vec::with_capacity(capacity);
    let mut exhausted = false;
    let mut encoded_size = 0u64;
    let mut runs = 0u64;

    loop {
        if !exhausted && buf.len() < capacity {
            let wanted = (capacity - buf.len()) as u64;
            let read = reader.by_ref().take(wanted).read_to_end(&mut buf)? as u64;
            exhausted = read < wanted;
        }

        if buf.is_empty() {
            break;
        }

        let remainder = buf.len() % unit;
        if remainder != 0 {
            buf.resize(buf.len() + (unit - remainder), 0);
        }

        let count = run_length(&buf, unit);
        debug_assert!(count >= 1 && count <= MAX_RUN);

        writer.write_u8(count as u8)?;
        writer.write_all(&buf[..unit])?;
        encoded_size += 1 + unit as u64;
        runs += 1;

        buf.drain(..count * unit);
    }

    tracing::debug!(unit_size = unit, runs, bytes = encoded_size, "encoded payload");
    Ok(encoded_size)
}

/// Number of identical units at the front of `buf`. `buf` must hold at least one whole unit.
#[inline(always)]
fn run_length(buf: &[u8], unit: usize) -> usize {
    let first = &buf[..unit];
    buf.chunks_exact(unit).take_while(|u| *u == first).count()
}

/// Decodes `encoded_size` bytes of runs from `reader` into `writer`, producing at most
/// `original_size` bytes.
///
/// Pass [`std::io::sink()`] as the writer to check the structure of a payload without
/// keeping its contents.
///
/// Once fewer than `unit_size` original bytes remain, the next run is treated as the final,
/// padded unit: its true bytes are written and decoding stops, whether or not the encoded
/// size has been used up.
pub fn decode<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    unit_size: UnitSize,
    encoded_size: u64,
    original_size: u64,
) -> Result<()> {
    let unit = unit_size.bytes();
    let run_size = 1 + unit as u64;
    let mut budget = encoded_size;
    let mut remaining = original_size;
    let mut data = vec![0u8; unit];

    while budget > 0 {
        let count = reader
            .read_u8()
            .map_err(|e| Error::from_read(e, Field::RunCount))?;
        reader
            .read_exact(&mut data)
            .map_err(|e| Error::from_read(e, Field::RunUnit))?;

        if remaining < unit as u64 {
            writer.write_all(&data[..remaining as usize])?;
            if budget > run_size {
                tracing::trace!(
                    unused = budget - run_size,
                    "stopped at final unit before encoded size was used up"
                );
            }
            return Ok(());
        }

        let run = (count as u64 * unit as u64).min(remaining);
        write_repeated(writer, &data, run)?;

        budget = budget.saturating_sub(run_size);
        remaining = remaining.saturating_sub(count as u64 * unit as u64);
    }

    Ok(())
}

/// Writes `len` bytes made of `unit` repeated, cutting the last repetition short if needed.
fn write_repeated<W: Write>(writer: &mut W, unit: &[u8], len: u64) -> Result<()> {
    let whole = len / unit.len() as u64;
    let tail = (len % unit.len() as u64) as usize;

    for _ in 0..whole {
        writer.write_all(unit)?;
    }
    writer.write_all(&unit[..tail])?;
    Ok(())
}
