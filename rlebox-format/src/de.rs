use std::io::{Read, Seek};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{EntryHeader, Error, Field, Result, UnitSize};

pub(crate) trait DeserializeOwned {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R) -> Result<Self>
    where
        Self: Sized;
}

impl DeserializeOwned for String {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let len = reader
            .read_u16::<BigEndian>()
            .map_err(|e| Error::from_read(e, Field::NameLength))?;
        let mut buf = vec![0u8; len as usize];
        reader
            .read_exact(&mut buf)
            .map_err(|e| Error::from_read(e, Field::Name))?;
        String::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }
}

impl DeserializeOwned for UnitSize {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let value = reader
            .read_u8()
            .map_err(|e| Error::from_read(e, Field::UnitSize))?;
        UnitSize::new(value).map_err(|_| Error::Corrupted {
            field: Field::UnitSize,
        })
    }
}

impl DeserializeOwned for EntryHeader {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let start = reader.stream_position()?;
        let name = String::deserialize_owned(reader)?;
        let original_size = reader
            .read_u64::<BigEndian>()
            .map_err(|e| Error::from_read(e, Field::OriginalSize))?;
        let unit_size = UnitSize::deserialize_owned(reader)?;
        let encoded_size = reader
            .read_u64::<BigEndian>()
            .map_err(|e| Error::from_read(e, Field::EncodedSize))?;

        let end = reader.stream_position()?;
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", end),
            bytes = end - start,
            %name,
            original_size,
            encoded_size,
            "deserialized EntryHeader"
        );

        Ok(EntryHeader {
            name,
            original_size,
            unit_size,
            encoded_size,
        })
    }
}
