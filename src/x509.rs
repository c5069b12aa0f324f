//! Types common to all things X.509.
//!
//! This module provides the building blocks the CRL decoder shares with
//! the rest of X.509: distinguished names, the two time flavors, generic
//! algorithm identifiers, and the owned raw-DER buffer that is wiped on
//! drop.

use std::{fmt, ops};
use bcder::decode;
use bcder::{Captured, Oid, Tag};
use bcder::decode::{ContentError, DecodeError, Primitive, Source};
use bytes::Bytes;
use chrono::{DateTime, Datelike, LocalResult, TimeZone, Timelike, Utc};
use zeroize::Zeroize;
use crate::oid;


//------------ Name ----------------------------------------------------------

/// An X.501 distinguished name.
///
/// A value of this type holds the raw encoding of an `RDNSequence` plus
/// the attribute type and value pairs found in it, in encoding order.
/// Attribute values are kept as raw content octets; they are not
/// interpreted beyond rendering.
#[derive(Clone, Debug)]
pub struct Name {
    /// The raw encoded name.
    raw: Captured,

    /// The attributes in encoding order.
    attrs: Vec<NameAttribute>,
}

impl Name {
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let mut attrs = Vec::new();
        let raw = cons.capture(|cons| {
            cons.take_sequence(|cons| { // RDNSequence
                let mut empty_sequence = true;
                while let Some(()) = cons.take_opt_set(|cons| {
                    empty_sequence = false;
                    let mut empty_set = true;
                    while let Some(()) = cons.take_opt_sequence(|cons| {
                        empty_set = false;
                        let attr_type = Oid::take_from(cons)?;
                        let value = cons.take_value(|_tag, content| {
                            content.as_primitive()?.take_all()
                        })?;
                        attrs.push(NameAttribute { attr_type, value });
                        Ok(())
                    })? { }
                    if empty_set {
                        return Err(cons.content_err(
                            "empty relative distinguished name"
                        ));
                    }
                    Ok(())
                })? { }
                if empty_sequence {
                    return Err(cons.content_err(
                        "empty distinguished name"
                    ))
                }
                Ok(())
            })
        })?;
        Ok(Name { raw, attrs })
    }

    /// Returns the attributes of the name in encoding order.
    pub fn attributes(&self) -> &[NameAttribute] {
        &self.attrs
    }

    /// Returns the raw encoded bytes of the name.
    pub fn as_slice(&self) -> &[u8] {
        self.raw.as_slice()
    }
}

//--- PartialEq and Eq

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.raw.as_slice() == other.raw.as_slice()
    }
}

impl Eq for Name {}

//--- Display

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, attr) in self.attrs.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            attr.fmt(f)?;
        }
        Ok(())
    }
}


//------------ NameAttribute -------------------------------------------------

/// A single attribute type and value pair of a name.
#[derive(Clone, Debug)]
pub struct NameAttribute {
    /// The attribute type.
    attr_type: Oid<Bytes>,

    /// The raw content octets of the attribute value.
    value: Bytes,
}

impl NameAttribute {
    /// Returns the object identifier of the attribute type.
    pub fn attr_type(&self) -> &Oid<Bytes> {
        &self.attr_type
    }

    /// Returns the raw content octets of the attribute value.
    pub fn value(&self) -> &[u8] {
        self.value.as_ref()
    }

    /// Returns the conventional short name of the attribute type.
    ///
    /// Returns `None` for types this crate doesn’t know about.
    pub fn short_name(&self) -> Option<&'static str> {
        if self.attr_type == oid::AT_COMMON_NAME {
            Some("CN")
        }
        else if self.attr_type == oid::AT_SERIAL_NUMBER {
            Some("serialNumber")
        }
        else if self.attr_type == oid::AT_COUNTRY {
            Some("C")
        }
        else if self.attr_type == oid::AT_LOCALITY {
            Some("L")
        }
        else if self.attr_type == oid::AT_STATE {
            Some("ST")
        }
        else if self.attr_type == oid::AT_ORGANIZATION {
            Some("O")
        }
        else if self.attr_type == oid::AT_ORG_UNIT {
            Some("OU")
        }
        else if self.attr_type == oid::AT_EMAIL_ADDRESS {
            Some("emailAddress")
        }
        else {
            None
        }
    }
}

impl fmt::Display for NameAttribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.short_name().unwrap_or("??"))?;
        f.write_str("=")?;
        for &ch in self.value.as_ref() {
            let ch = if (0x20..0x7f).contains(&ch) { ch as char }
                     else { '?' };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}


//------------ AlgorithmIdentifier -------------------------------------------

/// A generic X.509 `AlgorithmIdentifier`.
///
/// ```txt
/// AlgorithmIdentifier ::= SEQUENCE {
///      algorithm          OBJECT IDENTIFIER,
///      parameters         ANY DEFINED BY algorithm OPTIONAL }
/// ```
///
/// The parameters are captured without interpretation. Two identifiers
/// compare equal only if both the algorithm and the exact parameter
/// encoding agree, with "parameters absent" distinct from any present
/// encoding.
#[derive(Clone, Debug)]
pub struct AlgorithmIdentifier {
    /// The object identifier of the algorithm.
    algorithm: Oid<Bytes>,

    /// The raw parameters, if present.
    parameters: Option<Captured>,
}

impl AlgorithmIdentifier {
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let algorithm = Oid::take_from(cons)?;
            let parameters = cons.capture_all()?;
            let parameters = if parameters.as_slice().is_empty() {
                None
            }
            else {
                Some(parameters)
            };
            Ok(AlgorithmIdentifier { algorithm, parameters })
        })
    }

    /// Returns the object identifier of the algorithm.
    pub fn algorithm(&self) -> &Oid<Bytes> {
        &self.algorithm
    }

    /// Returns the raw encoding of the parameters, if present.
    pub fn parameters(&self) -> Option<&[u8]> {
        self.parameters.as_ref().map(|params| params.as_slice())
    }

    /// Returns whether the parameters are absent or an encoded NULL.
    ///
    /// This is the only parameter shape the algorithms of this crate
    /// allow.
    pub fn has_plain_parameters(&self) -> bool {
        match self.parameters() {
            None => true,
            Some(params) => params == [0x05, 0x00],
        }
    }
}

//--- PartialEq and Eq

impl PartialEq for AlgorithmIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm
        && self.parameters() == other.parameters()
    }
}

impl Eq for AlgorithmIdentifier {}


//------------ Time ----------------------------------------------------------

/// A calendar timestamp from a CRL.
///
/// Decodes from either of the two RFC 5280 time flavors, `UTCTime` with
/// its sliding two-digit year or `GeneralizedTime`, both required to be
/// in Zulu time down to the second.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time(DateTime<Utc>);

impl Time {
    pub fn new(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_primitive(|tag, prim| {
            if tag != Tag::UTC_TIME && tag != Tag::GENERALIZED_TIME {
                return Err(prim.content_err("malformed time value"))
            }
            Self::from_primitive(tag, prim)
        })
    }

    pub fn take_opt_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Option<Self>, DecodeError<S::Error>> {
        let res = cons.take_opt_primitive_if(Tag::UTC_TIME, |prim| {
            Self::from_primitive(Tag::UTC_TIME, prim)
        })?;
        if let Some(res) = res {
            return Ok(Some(res))
        }
        cons.take_opt_primitive_if(Tag::GENERALIZED_TIME, |prim| {
            Self::from_primitive(Tag::GENERALIZED_TIME, prim)
        })
    }

    /// Parses the content of either time flavor.
    fn from_primitive<S: decode::Source>(
        tag: Tag,
        prim: &mut Primitive<S>,
    ) -> Result<Self, DecodeError<S::Error>> {
        let year = if tag == Tag::UTC_TIME {
            // RFC 5280 requires the format YYMMDDHHMMSSZ.
            let year = read_decimal(prim, 2)? as i32;
            if year >= 50 { year + 1900 }
            else { year + 2000 }
        }
        else {
            // RFC 5280 requires the format YYYYMMDDHHMMSSZ.
            read_decimal(prim, 4)? as i32
        };
        let parts = (
            year,
            read_decimal(prim, 2)?,
            read_decimal(prim, 2)?,
            read_decimal(prim, 2)?,
            read_decimal(prim, 2)?,
            read_decimal(prim, 2)?,
        );
        if prim.take_u8()? != b'Z' {
            return Err(prim.content_err("malformed time value"))
        }
        Self::from_parts(parts).map_err(|err| prim.content_err(err))
    }

    fn from_parts(
        parts: (i32, u32, u32, u32, u32, u32)
    ) -> Result<Self, ContentError> {
        match Utc.with_ymd_and_hms(
            parts.0, parts.1, parts.2, parts.3, parts.4, parts.5
        ) {
            LocalResult::Single(dt) => Ok(Time(dt)),
            _ => Err(ContentError::from_static("malformed time value"))
        }
    }
}

//--- Deref and AsRef

impl ops::Deref for Time {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

//--- From

impl From<DateTime<Utc>> for Time {
    fn from(time: DateTime<Utc>) -> Self {
        Time(time)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(time: Time) -> Self {
        time.0
    }
}

//--- Display

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.0.year(), self.0.month(), self.0.day(),
            self.0.hour(), self.0.minute(), self.0.second()
        )
    }
}


/// Reads a fixed number of ASCII decimal digits.
fn read_decimal<S: decode::Source>(
    prim: &mut Primitive<S>,
    digits: usize,
) -> Result<u32, DecodeError<S::Error>> {
    let mut res = 0;
    for _ in 0..digits {
        let ch = prim.take_u8()?;
        if !ch.is_ascii_digit() {
            return Err(prim.content_err("malformed time value"))
        }
        res = res * 10 + u32::from(ch - b'0');
    }
    Ok(res)
}


//------------ RawDer --------------------------------------------------------

/// An owned copy of a DER-encoded structure.
///
/// The copy is independent of the buffer it was decoded from and is
/// zeroized before its storage is released.
#[derive(Clone)]
pub struct RawDer(Vec<u8>);

impl RawDer {
    pub(crate) fn copy_from(data: &[u8]) -> Self {
        RawDer(data.to_vec())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for RawDer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for RawDer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RawDer({} bytes)", self.0.len())
    }
}

impl Drop for RawDer {
    fn drop(&mut self) {
        self.0.zeroize()
    }
}


//============ Tests =========================================================
