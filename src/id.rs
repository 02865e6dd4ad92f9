use std::{cmp, fmt, hash, ops, str, time};

/// Represents a compact, time-ordered, practically-unique 128-bit sequential identifier.
///
/// An identifier is an immutable 16-byte value holding four big-endian 32-bit fields in
/// fixed order: `timestamp | machine | pid | random`. Two identifiers are equal iff all
/// four fields match; ordering by creation time is available through
/// [`timestamp_cmp`](SeqId::timestamp_cmp).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SeqId([u8; 16]);

impl SeqId {
    /// Empty identifier (00000000-0000-0000-0000-000000000000), distinct in practice from
    /// any identifier produced by the generation path.
    pub const EMPTY: Self = Self([0x00; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the 16-byte encoding: the four fields big-endian, in the order
    /// `timestamp(4) | machine(4) | pid(4) | random(4)`.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates an identifier from the four field values.
    pub const fn from_fields(timestamp: i32, machine: i32, pid: i32, random: i32) -> Self {
        let t = timestamp.to_be_bytes();
        let m = machine.to_be_bytes();
        let p = pid.to_be_bytes();
        let r = random.to_be_bytes();
        Self([
            t[0], t[1], t[2], t[3], m[0], m[1], m[2], m[3], p[0], p[1], p[2], p[3], r[0], r[1],
            r[2], r[3],
        ])
    }

    /// Decodes an identifier from an exact 16-byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidLength`] if the buffer is not exactly 16 bytes long;
    /// the input is never truncated or padded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        match <[u8; 16]>::try_from(bytes) {
            Ok(inner) => Ok(Self(inner)),
            Err(_) => Err(DecodeError::InvalidLength { len: bytes.len() }),
        }
    }

    const fn field(&self, offset: usize) -> i32 {
        i32::from_be_bytes([
            self.0[offset],
            self.0[offset + 1],
            self.0[offset + 2],
            self.0[offset + 3],
        ])
    }

    /// Whole seconds since the Unix epoch, truncated toward zero.
    pub const fn timestamp(&self) -> i32 {
        self.field(0)
    }

    /// Machine signature of the generating process.
    pub const fn machine(&self) -> i32 {
        self.field(4)
    }

    /// Operating-system process identifier of the generating process.
    pub const fn pid(&self) -> i32 {
        self.field(8)
    }

    /// Counter value drawn when the identifier was constructed.
    pub const fn random(&self) -> i32 {
        self.field(12)
    }

    /// Returns the point in time the identifier was created: the Unix epoch plus the
    /// `timestamp` field.
    pub fn to_timestamp(&self) -> time::SystemTime {
        let secs = self.timestamp() as i64;
        if secs >= 0 {
            time::UNIX_EPOCH + time::Duration::from_secs(secs as u64)
        } else {
            time::UNIX_EPOCH - time::Duration::from_secs(secs.unsigned_abs())
        }
    }

    /// Compares two identifiers by the `timestamp` field alone.
    ///
    /// This is sort-by-creation-second ordering, not a total order: identifiers created
    /// within the same second compare [`Equal`](cmp::Ordering::Equal) even when they differ
    /// under `==`. For that reason the type implements neither [`Ord`] nor [`PartialOrd`],
    /// whose contracts require consistency with equality.
    pub fn timestamp_cmp(&self, other: &Self) -> cmp::Ordering {
        self.timestamp().cmp(&other.timestamp())
    }

    /// Returns a stable hash over the `timestamp` and `random` fields.
    ///
    /// `machine` and `pid` are deliberately excluded: they are process-wide constants that
    /// contribute no distribution within a process, at the cost of cross-process bucket
    /// collisions between identifiers sharing a second and a counter value.
    pub const fn hash_code(&self) -> i32 {
        const SEED: i32 = 17;
        const MULTIPLIER: i32 = 37;

        let mut code = SEED;
        code = code.wrapping_mul(MULTIPLIER) ^ self.timestamp();
        code = code.wrapping_mul(MULTIPLIER) ^ self.random();
        code
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqid::SeqId;
    ///
    /// let x = "499602d2-6d79-686f-0000-30390000162e".parse::<SeqId>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "499602d2-6d79-686f-0000-30390000162e");
    /// # Ok::<(), seqid::ParseError>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        self.encode_inner(DIGITS_LOWER)
    }

    fn encode_inner(&self, digits: &[u8; 16]) -> EncodedStr<36> {
        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for i in 0..16 {
            let e = self.0[i] as usize;
            *buf_iter.next().unwrap() = digits[e >> 4];
            *buf_iter.next().unwrap() = digits[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        EncodedStr(buffer)
    }

    /// Returns the undashed 32-digit hexadecimal representation.
    pub fn encode_simple(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        let mut buffer = [0u8; 32];
        let mut buf_iter = buffer.iter_mut();
        for e in self.0 {
            *buf_iter.next().unwrap() = DIGITS_LOWER[e as usize >> 4];
            *buf_iter.next().unwrap() = DIGITS_LOWER[e as usize & 15];
        }
        EncodedStr(buffer)
    }

    /// Returns the 8-4-4-4-12 hexadecimal representation enclosed in braces.
    pub fn encode_braced(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        let mut buffer = [0u8; 38];
        buffer[0] = b'{';
        buffer[1..37].copy_from_slice(&self.encode_inner(DIGITS_LOWER).0);
        buffer[37] = b'}';
        EncodedStr(buffer)
    }
}

const DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

impl fmt::Display for SeqId {
    /// Returns the 8-4-4-4-12 canonical lowercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::LowerHex for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_inner(DIGITS_LOWER))
    }
}

impl fmt::UpperHex for SeqId {
    /// Returns the 8-4-4-4-12 uppercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_inner(DIGITS_UPPER))
    }
}

impl hash::Hash for SeqId {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl str::FromStr for SeqId {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation, its braced
    /// variant, or the undashed 32-digit form. Hex digits of either case are accepted.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let src = if src.len() == 38 {
            src.strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .ok_or(ERR)?
        } else {
            src
        };
        let hyphenated = match src.len() {
            36 => true,
            32 => false,
            _ => return Err(ERR),
        };

        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if hyphenated && (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-'
            {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<SeqId> for [u8; 16] {
    fn from(src: SeqId) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for SeqId {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for SeqId {
    type Error = DecodeError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(src)
    }
}

impl AsRef<[u8]> for SeqId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<SeqId> for u128 {
    fn from(src: SeqId) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for SeqId {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<SeqId> for String {
    fn from(src: SeqId) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for SeqId {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl PartialEq<[u8; 16]> for SeqId {
    fn eq(&self, other: &[u8; 16]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<SeqId> for [u8; 16] {
    fn eq(&self, other: &SeqId) -> bool {
        self == &other.0
    }
}

impl PartialEq<[u8]> for SeqId {
    /// Compares byte-for-byte; a buffer of any other length never matches.
    fn eq(&self, other: &[u8]) -> bool {
        self.0[..] == *other
    }
}

impl PartialEq<SeqId> for [u8] {
    fn eq(&self, other: &SeqId) -> bool {
        *self == other.0[..]
    }
}

/// Error decoding an identifier from a byte buffer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DecodeError {
    /// The buffer was not exactly 16 bytes long.
    InvalidLength {
        /// Length of the rejected buffer.
        len: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => {
                write!(f, "invalid buffer length: {} (expected 16)", len)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Error parsing an invalid string representation of a sequential identifier.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

impl std::error::Error for ParseError {}

/// Stack-allocated string representation returned by the `encode*` methods.
struct EncodedStr<const N: usize>([u8; N]);

impl<const N: usize> ops::Deref for EncodedStr<N> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl<const N: usize> fmt::Display for EncodedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::SeqId;

    /// Reinterprets the 16 raw bytes under the sequential-identifier field layout. This is
    /// not a translation of UUID version/variant semantics.
    impl From<uuid::Uuid> for SeqId {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }

    /// Reinterprets the 16 raw bytes as a UUID. The result carries no particular UUID
    /// version or variant bits.
    impl From<SeqId> for uuid::Uuid {
        fn from(src: SeqId) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, SeqId};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for SeqId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for SeqId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = SeqId;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a sequential identifier representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_bytes(value).map_err(de::Error::custom)
        }
    }

}
