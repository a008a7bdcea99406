use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::{EntryHeader, Error, Result};

pub(crate) trait Serialize {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()>;
}

impl Serialize for str {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let len = u16::try_from(self.len()).map_err(|_| {
            Error::InvalidArgument(format!("name is too long: {} bytes", self.len()))
        })?;
        writer.write_u16::<BigEndian>(len)?;
        writer.write_all(self.as_bytes())?;
        Ok(())
    }
}

impl Serialize for EntryHeader {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.name.as_str().write(writer)?;
        writer.write_u64::<BigEndian>(self.original_size)?;
        writer.write_u8(self.unit_size.get())?;
        writer.write_u64::<BigEndian>(self.encoded_size)?;

        tracing::debug!(
            name = %self.name,
            bytes = self.serialized_len(),
            encoded_size = self.encoded_size,
            "serialized EntryHeader"
        );
        Ok(())
    }
}
