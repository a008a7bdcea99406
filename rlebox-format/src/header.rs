use std::io::{Read, Seek};

use crate::{de::DeserializeOwned, ser::Serialize, Error, Result, UnitSize};

/// Metadata stored immediately before every entry's payload.
///
/// Layout, all integers big-endian:
///
/// | field         | width            |
/// |---------------|------------------|
/// | name length   | 2                |
/// | name          | name length      |
/// | original size | 8                |
/// | unit size     | 1                |
/// | encoded size  | 8                |
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EntryHeader {
    /// Base name of the stored file, without any directory components.
    pub name: String,

    /// Length of the file before encoding. Payloads may carry up to `unit_size - 1`
    /// bytes of padding beyond this.
    pub original_size: u64,

    /// Width of the units this entry's runs are measured in.
    pub unit_size: UnitSize,

    /// Exact length of the payload that follows the header.
    pub encoded_size: u64,
}

impl EntryHeader {
    /// Bytes taken by everything except the name.
    pub const FIXED_LEN: u64 = 2 + 8 + 1 + 8;

    /// Creates a header whose `encoded_size` is the zero placeholder, to be backpatched
    /// once the payload has been written.
    pub fn new<S: Into<String>>(
        name: S,
        original_size: u64,
        unit_size: UnitSize,
    ) -> Result<EntryHeader> {
        let name = name.into();
        if name.len() > u16::MAX as usize {
            return Err(Error::InvalidArgument(format!(
                "name is {} bytes long, at most {} are allowed",
                name.len(),
                u16::MAX
            )));
        }

        Ok(EntryHeader {
            name,
            original_size,
            unit_size,
            encoded_size: 0,
        })
    }

    /// Total serialized length of this header.
    #[inline(always)]
    pub fn serialized_len(&self) -> u64 {
        Self::FIXED_LEN + self.name.len() as u64
    }

    /// Offset of the `encoded_size` field from the start of the header.
    #[inline(always)]
    pub fn size_field_offset(&self) -> u64 {
        self.serialized_len() - 8
    }

    /// `encoded_size / original_size`, or `None` for empty entries.
    pub fn ratio(&self) -> Option<f64> {
        match self.original_size {
            0 => None,
            original => Some(self.encoded_size as f64 / original as f64),
        }
    }

    /// Serializes the header, returning its bytes and the offset of the `encoded_size` field
    /// within them.
    pub fn serialize(&self) -> Result<(Vec<u8>, u64)> {
        let mut buf = Vec::with_capacity(self.serialized_len() as usize);
        self.write(&mut buf)?;
        Ok((buf, self.size_field_offset()))
    }

    /// Reads one header. A field cut short by the end of the stream is reported as
    /// [`Error::Corrupted`].
    pub fn deserialize<R: Read + Seek>(reader: &mut R) -> Result<EntryHeader> {
        EntryHeader::deserialize_owned(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use std::io::Cursor;

    fn header() -> EntryHeader {
        let mut header = EntryHeader::new("a.txt", 10, UnitSize::new(2).unwrap()).unwrap();
        header.encoded_size = 0x0102;
        header
    }

    #[test]
    fn layout() {
        let (bytes, offset) = EntryHeader::new("a.txt", 10, UnitSize::new(2).unwrap())
            .unwrap()
            .serialize()
            .unwrap();

        #[rustfmt::skip]
        let expected = [
            0x00, 0x05,
            b'a', b'.', b't', b'x', b't',
            0, 0, 0, 0, 0, 0, 0, 10,
            2,
            0, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert_eq!(bytes, expected);
        assert_eq!(offset, 16);
        assert_eq!(bytes.len() as u64, EntryHeader::FIXED_LEN + 5);
    }

    #[test]
    fn read_back() {
        let header = header();
        let (bytes, _) = header.serialize().unwrap();
        let mut cursor = Cursor::new(bytes);
        assert_eq!(EntryHeader::deserialize(&mut cursor).unwrap(), header);
        assert_eq!(cursor.position(), header.serialized_len());
    }

    #[test]
    fn truncated_fields_are_corrupted() {
        let (bytes, _) = header().serialize().unwrap();
        let cases = [
            (0, Field::NameLength),
            (1, Field::NameLength),
            (4, Field::Name),
            (7, Field::OriginalSize),
            (14, Field::OriginalSize),
            (15, Field::UnitSize),
            (16, Field::EncodedSize),
            (23, Field::EncodedSize),
        ];

        for (len, field) in cases {
            let err = EntryHeader::deserialize(&mut Cursor::new(&bytes[..len])).unwrap_err();
            match err {
                Error::Corrupted { field: f } => assert_eq!(f, field, "cut at {}", len),
                other => panic!("cut at {}: unexpected {:?}", len, other),
            }
        }
    }

    #[test]
    fn zero_unit_size_is_corrupted() {
        let (mut bytes, _) = header().serialize().unwrap();
        bytes[15] = 0;
        let err = EntryHeader::deserialize(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            Error::Corrupted {
                field: Field::UnitSize
            }
        ));
    }

    #[test]
    fn name_too_long() {
        let name = "x".repeat(u16::MAX as usize + 1);
        assert!(matches!(
            EntryHeader::new(name, 0, UnitSize::ONE),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn ratio() {
        let mut header = EntryHeader::new("empty", 0, UnitSize::ONE).unwrap();
        assert_eq!(header.ratio(), None);
        header.original_size = 8;
        header.encoded_size = 2;
        assert_eq!(header.ratio(), Some(0.25));
    }
}
