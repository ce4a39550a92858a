//! DER identifier and length octets

use aom_core::{AomError, AomResult, EncodingForm, Tag, TagClass};

/// DER identifier octet
///
/// A single octet made of three fields:
///
/// ```text
/// Bits: 8 7 6 5 4 3 2 1
///       C C F T T T T T
/// ```
///
/// - CC = class (00=Universal, 01=Application, 10=Context, 11=Private)
/// - F = Primitive (0) or Constructed (1)
/// - TTTTT = tag number (0-30); 11111 introduces a long-form tag number,
///   which is not supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    class: TagClass,
    form: EncodingForm,
    number: u8,
}

impl Identifier {
    /// Tag-number bits of the identifier octet
    pub const NUMBER_MASK: u8 = 0x1F;

    /// Tag-number field value announcing a long-form tag number
    pub const LONG_FORM: u8 = 0x1F;

    /// Create an identifier for a tag and encoding form
    pub fn new(tag: Tag, form: EncodingForm) -> Self {
        Self {
            class: tag.class(),
            form,
            number: tag.number(),
        }
    }

    pub fn class(&self) -> TagClass {
        self.class
    }

    pub fn form(&self) -> EncodingForm {
        self.form
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Resolve the identifier into a node tag
    pub fn tag(&self) -> AomResult<Tag> {
        Tag::new(self.class, self.number)
    }

    /// Encode identifier to its single octet
    pub fn encode(&self) -> u8 {
        self.class.value() | self.form.value() | (self.number & Self::NUMBER_MASK)
    }

    /// Decode an identifier octet found at `offset`
    ///
    /// # Error Handling
    /// Returns `UnsupportedAsn1Data` for a long-form tag number.
    pub fn decode(octet: u8, offset: usize) -> AomResult<Self> {
        let number = octet & Self::NUMBER_MASK;
        if number == Self::LONG_FORM {
            return Err(AomError::unsupported(
                offset,
                format!("long-form tag number in identifier octet {:#04x}", octet),
            ));
        }
        Ok(Self {
            class: TagClass::from_identifier(octet),
            form: EncodingForm::from_identifier(octet),
            number,
        })
    }
}

/// DER length field
///
/// - **Short form**: one octet, bit 8 clear, lengths 0-127
/// - **Long form**: `0x80 | k` followed by `k` big-endian length octets
///
/// Lengths needing more than [`DerLength::MAX_LENGTH_OCTETS`] octets are not
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerLength {
    /// Short form: length 0-127
    Short(u8),
    /// Long form: length > 127, encoded with length-of-length
    Long(u64),
}

impl DerLength {
    /// Bit 8 of the first length octet selects the long form
    pub const LONG_FLAG: u8 = 0x80;

    /// Most length octets accepted after the long-form count octet (48 bits)
    pub const MAX_LENGTH_OCTETS: usize = 6;

    /// Create a length, choosing the short form below 128
    pub fn new(length: usize) -> Self {
        if length < 128 {
            DerLength::Short(length as u8)
        } else {
            DerLength::Long(length as u64)
        }
    }

    /// Get the length value
    pub fn value(&self) -> u64 {
        match self {
            DerLength::Short(l) => *l as u64,
            DerLength::Long(l) => *l,
        }
    }

    /// Encode length to bytes, using the minimal number of long-form octets
    pub fn encode(&self) -> Vec<u8> {
        match self {
            DerLength::Short(length) => vec![*length],
            DerLength::Long(length) => {
                let mut num_bytes = 0;
                let mut temp = *length;
                while temp > 0 {
                    num_bytes += 1;
                    temp >>= 8;
                }
                if num_bytes == 0 {
                    num_bytes = 1;
                }

                let mut result = vec![Self::LONG_FLAG | (num_bytes as u8)];
                for i in (0..num_bytes).rev() {
                    result.push(((*length >> (i * 8)) & 0xFF) as u8);
                }
                result
            }
        }
    }

    /// Decode a length field
    ///
    /// `data` starts at the first length octet, which sits at absolute
    /// position `offset` in the input.
    ///
    /// # Returns
    /// Returns `Ok((DerLength, bytes_consumed))` if successful
    ///
    /// # Error Handling
    /// - `InvalidAsn1Data`: missing octets, or a long form announcing zero
    ///   length octets (the BER indefinite form)
    /// - `UnsupportedAsn1Data`: more than six length octets
    pub fn decode(data: &[u8], offset: usize) -> AomResult<(Self, usize)> {
        let Some(&first_byte) = data.first() else {
            return Err(AomError::invalid_data(offset, 0, "missing length octet"));
        };

        if first_byte & Self::LONG_FLAG == 0 {
            return Ok((DerLength::Short(first_byte), 1));
        }

        let num_bytes = (first_byte & !Self::LONG_FLAG) as usize;
        if num_bytes == 0 {
            return Err(AomError::invalid_data(
                offset,
                data.len(),
                "long-form length with zero length octets (indefinite length is not DER)",
            ));
        }
        if num_bytes > Self::MAX_LENGTH_OCTETS {
            return Err(AomError::unsupported(
                offset,
                format!(
                    "content length uses {} length octets, at most {} are supported",
                    num_bytes,
                    Self::MAX_LENGTH_OCTETS
                ),
            ));
        }
        if data.len() < 1 + num_bytes {
            return Err(AomError::invalid_data(
                offset,
                data.len(),
                format!(
                    "need {} length octets but only {} remain",
                    num_bytes,
                    data.len() - 1
                ),
            ));
        }

        let length = data[1..=num_bytes]
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);

        Ok((DerLength::Long(length), 1 + num_bytes))
    }
}
