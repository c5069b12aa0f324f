//! X.509 certificate revocation lists.
//!
//! This module implements decoding of certificate revocation lists from
//! their DER encoding as defined in [RFC 5280], with or without the
//! customary textual envelope around it.
//!
//! A single binary record decodes into a [`Crl`]. Since a file may carry
//! any number of enveloped records back to back, decoding accumulates
//! records into a [`CrlChain`] which keeps them in input order.
//!
//! Extensions, both at CRL level and per revoked certificate, are only
//! validated structurally and kept as opaque byte spans; their content is
//! not interpreted. Signature verification is likewise out of scope: the
//! decoder retains the exact signed span, the resolved algorithm, and the
//! signature bits for a verifier to use.
//!
//! [RFC 5280]: https://tools.ietf.org/html/rfc5280

use std::{fmt, slice};
use bcder::{BitString, Captured, Mode, Tag};
use bcder::decode::Source;
use bytes::Bytes;
use log::{debug, warn};
use crate::crypto::SignatureAlgorithm;
use crate::error::{Error, ErrorKind};
use crate::pem;
use crate::x509::{AlgorithmIdentifier, Name, RawDer, Time};


//------------ Crl -----------------------------------------------------------

/// A decoded certificate revocation list.
///
/// A value of this type is the result of decoding one `CertificateList`
/// structure. It keeps an owned copy of the exact input bytes it was
/// decoded from, independent of the caller's buffer; that copy is wiped
/// when the value is dropped.
#[derive(Clone, Debug)]
pub struct Crl {
    /// The owned copy of the encoded record.
    raw: RawDer,

    /// The bytes of the `tbsCertList` covered by the signature.
    tbs: Captured,

    /// The CRL version: 1 or 2.
    ///
    /// The wire encodes this as 0 or 1 with 0 the default; we store the
    /// human version number.
    version: u8,

    /// The resolved signature algorithm.
    signature_algorithm: SignatureAlgorithm,

    /// The name of the issuer.
    issuer: Name,

    /// The time this revision of the list was created.
    this_update: Time,

    /// The time the next revision is expected, if announced.
    next_update: Option<Time>,

    /// The revoked certificates in encoding order.
    entries: Vec<CrlEntry>,

    /// The raw content of the `crlExtensions`, if present.
    ///
    /// Only version 2 records may carry this.
    crl_extensions: Option<Captured>,

    /// The signature bits.
    signature: Bytes,
}

impl Crl {
    /// Decodes one binary CRL record.
    ///
    /// The buffer must hold exactly one DER-encoded `CertificateList`;
    /// trailing data of any kind is refused.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        let raw = RawDer::copy_from(data);

        // CertificateList ::= SEQUENCE {
        //     tbsCertList          TBSCertList,
        //     signatureAlgorithm   AlgorithmIdentifier,
        //     signatureValue       BIT STRING }
        //
        // The sequence must span the input exactly.
        let record = Mode::Der.decode(
            Bytes::copy_from_slice(data),
            |cons| cons.capture_one()
        ).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;
        if record.as_slice().len() != data.len() {
            return Err(Error::with_cause(
                ErrorKind::InvalidFormat, "trailing data after CRL record"
            ))
        }
        let mut outer = record.decode(|cons| {
            cons.take_sequence(|cons| cons.capture_all())
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        let tbs = outer.decode_partial(|cons| {
            cons.capture_one()
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        // TBSCertList ::= SEQUENCE { ... }
        let mut body = tbs.clone().decode(|cons| {
            cons.take_sequence(|cons| cons.capture_all())
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        // version    Version OPTIONAL  -- if present, MUST be v2
        //
        // The field defaults to v1 when absent. Stored is the human
        // version number, i.e., the wire value plus one.
        let version = body.decode_partial(|cons| {
            cons.take_opt_primitive_if(Tag::INTEGER, |prim| prim.take_u8())
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidVersion, err)
        })?;
        let version = match version {
            None | Some(0) => 1,
            Some(1) => 2,
            Some(_) => return Err(Error::new(ErrorKind::UnknownVersion)),
        };

        // signature  AlgorithmIdentifier
        let inner_algorithm = body.decode_partial(|cons| {
            AlgorithmIdentifier::take_from(cons)
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;
        let signature_algorithm =
            match SignatureAlgorithm::from_identifier(inner_algorithm) {
                Some(algorithm) => algorithm,
                None => return Err(Error::new(ErrorKind::UnknownSigAlg)),
            };

        // issuer     Name
        let issuer = body.decode_partial(|cons| {
            Name::take_from(cons)
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        // thisUpdate Time
        // nextUpdate Time OPTIONAL
        let this_update = body.decode_partial(|cons| {
            Time::take_from(cons)
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;
        let next_update = body.decode_partial(|cons| {
            Time::take_opt_from(cons)
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        // revokedCertificates  SEQUENCE OF SEQUENCE { ... } OPTIONAL
        let entries = Self::take_entries(&mut body, version)?;

        // crlExtensions  [0] EXPLICIT Extensions OPTIONAL
        //                    -- if present, MUST be v2
        let crl_extensions = if version == 2 {
            Self::take_crl_extensions(&mut body)?
        }
        else {
            None
        };

        if !body.as_slice().is_empty() {
            return Err(Error::with_cause(
                ErrorKind::InvalidFormat, "trailing data in tbsCertList"
            ))
        }

        // The outer algorithm identifier must repeat the one inside the
        // signed region byte for byte, parameters included.
        let outer_algorithm = outer.decode_partial(|cons| {
            AlgorithmIdentifier::take_from(cons)
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;
        if *signature_algorithm.identifier() != outer_algorithm {
            return Err(Error::new(ErrorKind::SigMismatch))
        }

        // signatureValue  BIT STRING
        let signature = outer.decode_partial(|cons| {
            BitString::take_from(cons)
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;
        if signature.unused() != 0 {
            return Err(Error::with_cause(
                ErrorKind::InvalidFormat,
                "signature bit string has unused bits"
            ))
        }

        if !outer.as_slice().is_empty() {
            return Err(Error::with_cause(
                ErrorKind::InvalidFormat, "trailing data after signature"
            ))
        }

        Ok(Crl {
            raw,
            tbs,
            version,
            signature_algorithm,
            issuer,
            this_update,
            next_update,
            entries,
            crl_extensions,
            signature: signature.octet_bytes(),
        })
    }

    /// Takes the revoked certificates list off the front of `body`.
    ///
    /// An absent list means no revoked certificates, not an error.
    fn take_entries(
        body: &mut Captured,
        version: u8,
    ) -> Result<Vec<CrlEntry>, Error> {
        let outer = body.decode_partial(|cons| {
            cons.take_opt_sequence(|cons| cons.capture_all())
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;
        let mut rest = match outer {
            Some(rest) => rest,
            None => return Ok(Vec::new()),
        };
        let mut entries = Vec::new();
        while !rest.as_slice().is_empty() {
            entries.push(CrlEntry::take_next(&mut rest, version)?);
        }
        Ok(entries)
    }

    /// Takes the CRL extensions off the front of `body`.
    ///
    /// The extensions live in an explicitly tagged envelope whose absence
    /// is fine. The content is validated to be a well-formed sequence of
    /// extension sequences and captured without interpretation.
    fn take_crl_extensions(
        body: &mut Captured
    ) -> Result<Option<Captured>, Error> {
        body.decode_partial(|cons| {
            cons.take_opt_constructed_if(Tag::CTX_0, |cons| {
                cons.take_sequence(|cons| {
                    cons.capture(|cons| {
                        while let Some(()) = cons.take_opt_sequence(|cons| {
                            cons.skip_all()
                        })? { }
                        Ok(())
                    })
                })
            })
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidExtensions, err)
        })
    }

    /// Returns the version of the CRL, either 1 or 2.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the signature algorithm of the CRL.
    pub fn signature_algorithm(&self) -> &SignatureAlgorithm {
        &self.signature_algorithm
    }

    /// Returns the name of the issuer.
    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    /// Returns the time this revision of the list was created.
    pub fn this_update(&self) -> Time {
        self.this_update
    }

    /// Returns the time the next revision is expected, if announced.
    pub fn next_update(&self) -> Option<Time> {
        self.next_update
    }

    /// Returns the revoked certificates in encoding order.
    pub fn entries(&self) -> &[CrlEntry] {
        &self.entries
    }

    /// Returns the raw content of the CRL extensions, if present.
    pub fn crl_extensions(&self) -> Option<&[u8]> {
        self.crl_extensions.as_ref().map(|ext| ext.as_slice())
    }

    /// Returns the exact bytes the signature was calculated over.
    pub fn tbs_bytes(&self) -> &[u8] {
        self.tbs.as_slice()
    }

    /// Returns the signature bits.
    pub fn signature(&self) -> &[u8] {
        self.signature.as_ref()
    }

    /// Returns the owned copy of the encoded record.
    pub fn raw(&self) -> &[u8] {
        self.raw.as_slice()
    }

    /// Returns whether a certificate serial number is on this list.
    ///
    /// The serial is given as the content octets of its INTEGER
    /// encoding, the same form [`CrlEntry::serial`] returns.
    pub fn is_revoked(&self, serial: &[u8]) -> bool {
        self.entries.iter().any(|entry| entry.serial() == serial)
    }

    /// Writes a human readable summary into a byte buffer.
    ///
    /// Every line is started with `prefix`. If at any point the summary
    /// would no longer fit the remaining space, the call fails with a
    /// [`BufferTooSmall`][ErrorKind::BufferTooSmall] error and writing
    /// stops. On success, returns the number of bytes written.
    pub fn info(&self, buf: &mut [u8], prefix: &str) -> Result<usize, Error> {
        let mut target = BoundedWriter::new(buf);
        self.write_info(&mut target, prefix).map_err(|_| {
            Error::new(ErrorKind::BufferTooSmall)
        })?;
        Ok(target.written())
    }

    /// Writes the summary to a formatting target.
    fn write_info<W: fmt::Write>(
        &self,
        target: &mut W,
        prefix: &str,
    ) -> fmt::Result {
        write!(target, "{}CRL version   : {}", prefix, self.version)?;
        write!(target, "\n{}issuer name   : {}", prefix, self.issuer)?;
        write!(target, "\n{}this update   : {}", prefix, self.this_update)?;
        write!(target, "\n{}next update   : ", prefix)?;
        match self.next_update {
            Some(time) => write!(target, "{}", time)?,
            None => target.write_str("0000-00-00 00:00:00")?,
        }
        write!(target, "\n{}Revoked certificates:", prefix)?;
        for entry in &self.entries {
            write!(target, "\n{}serial number: ", prefix)?;
            write_serial(target, entry.serial())?;
            write!(
                target, " revocation date: {}", entry.revocation_date
            )?;
        }
        write!(
            target, "\n{}signed using  : {}\n",
            prefix, self.signature_algorithm
        )
    }
}

//--- Display

impl fmt::Display for Crl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_info(f, "")
    }
}


//------------ CrlEntry ------------------------------------------------------

/// A single revoked certificate of a CRL.
#[derive(Clone, Debug)]
pub struct CrlEntry {
    /// The serial number of the revoked certificate.
    ///
    /// These are the content octets of the INTEGER.
    serial: Bytes,

    /// The time of revocation.
    revocation_date: Time,

    /// The raw content of the entry extensions, if present.
    extensions: Option<Captured>,
}

impl CrlEntry {
    /// Takes the next entry off the front of the entry list bytes.
    fn take_next(rest: &mut Captured, version: u8) -> Result<Self, Error> {
        let mut entry = rest.decode_partial(|cons| {
            cons.take_sequence(|cons| cons.capture_all())
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        // The serial is kept as the raw content octets, without the
        // sign treatment a proper INTEGER would get. Real lists carry
        // serials with the top bit set.
        let serial = entry.decode_partial(|cons| {
            cons.take_primitive_if(Tag::INTEGER, |prim| prim.take_all())
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        let revocation_date = entry.decode_partial(|cons| {
            Time::take_from(cons)
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidFormat, err)
        })?;

        // crlEntryExtensions  Extensions OPTIONAL
        //                         -- if present, MUST be v2
        //
        // Some encoders attach entry extensions to version 1 records
        // anyway. We accept those for compatibility.
        let extensions = if entry.as_slice().is_empty() {
            None
        }
        else {
            Self::take_extensions(&mut entry)?
        };
        if !entry.as_slice().is_empty() {
            return Err(Error::with_cause(
                ErrorKind::InvalidFormat, "trailing data in CRL entry"
            ))
        }
        if version == 1 && extensions.is_some() {
            warn!(
                "version 1 CRL carries entry extensions, accepting anyway"
            );
        }

        Ok(CrlEntry { serial, revocation_date, extensions })
    }

    /// Takes the entry extensions off the front of the entry bytes.
    ///
    /// Same validation as at CRL level but without the explicit tag. A
    /// value of some other type in this position is tolerated as "no
    /// extensions".
    fn take_extensions(
        entry: &mut Captured
    ) -> Result<Option<Captured>, Error> {
        entry.decode_partial(|cons| {
            cons.take_opt_sequence(|cons| {
                cons.capture(|cons| {
                    while let Some(()) = cons.take_opt_sequence(|cons| {
                        cons.skip_all()
                    })? { }
                    Ok(())
                })
            })
        }).map_err(|err| {
            Error::with_cause(ErrorKind::InvalidExtensions, err)
        })
    }

    /// Returns the serial number of the revoked certificate.
    pub fn serial(&self) -> &[u8] {
        self.serial.as_ref()
    }

    /// Returns the time of revocation.
    pub fn revocation_date(&self) -> Time {
        self.revocation_date
    }

    /// Returns the raw content of the entry extensions, if present.
    pub fn extensions(&self) -> Option<&[u8]> {
        self.extensions.as_ref().map(|ext| ext.as_slice())
    }
}


//------------ CrlChain ------------------------------------------------------

/// The revocation lists decoded from one or more inputs.
///
/// A chain starts out empty and grows by parsing buffers into it. Each
/// parse appends the records it finds in input order. When a parse fails
/// midway, the records appended before the failure stay in the chain;
/// callers that received an error must not rely on the chain being
/// complete for revocation decisions.
#[derive(Clone, Debug, Default)]
pub struct CrlChain {
    /// The records in the order they were decoded.
    records: Vec<Crl>,
}

impl CrlChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        CrlChain { records: Vec::new() }
    }

    /// Decodes a buffer into a fresh chain.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        let mut chain = Self::new();
        chain.parse(data)?;
        Ok(chain)
    }

    /// Parses a buffer and appends all records found to the chain.
    ///
    /// The buffer either holds a concatenation of textually enveloped
    /// records or exactly one raw binary record. Envelopes are only
    /// looked for in NUL terminated input; in that case records are
    /// unwrapped and decoded one by one until only the terminator is
    /// left. Anything that fails to unwrap on the first attempt is
    /// treated as a single binary record instead.
    pub fn parse(&mut self, data: &[u8]) -> Result<(), Error> {
        if data.last() == Some(&0) {
            let mut rest = data;
            let mut unwrapped = false;
            while rest.len() > 1 {
                match pem::read_block(
                    rest, pem::CRL_BEGIN_MARKER, pem::CRL_END_MARKER
                ) {
                    Ok(Some(block)) => {
                        debug!(
                            "unwrapped CRL envelope, {} bytes of DER",
                            block.der.len()
                        );
                        self.parse_der(&block.der)?;
                        rest = &rest[block.consumed..];
                        unwrapped = true;
                    }
                    Ok(None) => {
                        if unwrapped {
                            return Err(Error::with_cause(
                                ErrorKind::InvalidFormat,
                                "trailing data after final envelope"
                            ))
                        }
                        break
                    }
                    Err(err) => {
                        if unwrapped {
                            return Err(err)
                        }
                        break
                    }
                }
            }
            if unwrapped {
                return Ok(())
            }
        }
        self.parse_der(data)
    }

    /// Decodes one binary record and appends it to the chain.
    pub fn parse_der(&mut self, data: &[u8]) -> Result<(), Error> {
        let crl = Crl::decode(data)?;
        debug!(
            "decoded CRL: issuer '{}', {} revoked certificates",
            crl.issuer(), crl.entries().len()
        );
        self.records.push(crl);
        Ok(())
    }

    /// Returns the records of the chain in decoding order.
    pub fn records(&self) -> &[Crl] {
        &self.records
    }

    /// Returns an iterator over the records of the chain.
    pub fn iter(&self) -> slice::Iter<'_, Crl> {
        self.records.iter()
    }

    /// Returns the number of records in the chain.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a CrlChain {
    type Item = &'a Crl;
    type IntoIter = slice::Iter<'a, Crl>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}


//------------ BoundedWriter -------------------------------------------------

/// A formatting target writing into a fixed size byte buffer.
struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BoundedWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        BoundedWriter { buf, pos: 0 }
    }

    fn written(&self) -> usize {
        self.pos
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = match self.pos.checked_add(s.len()) {
            Some(end) if end <= self.buf.len() => end,
            _ => return Err(fmt::Error),
        };
        self.buf[self.pos..end].copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}


/// Writes a serial number as colon separated hex octets.
///
/// Long serials are cut off after 32 octets.
fn write_serial<W: fmt::Write>(
    target: &mut W,
    serial: &[u8],
) -> fmt::Result {
    for (idx, octet) in serial.iter().enumerate() {
        if idx >= 32 {
            return target.write_str("....")
        }
        if idx > 0 {
            target.write_str(":")?;
        }
        write!(target, "{:02X}", octet)?;
    }
    Ok(())
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use super::*;

    //--- DER construction helpers. Lengths are always computed.

    fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
        let mut res = vec![tag];
        let len = content.len();
        if len < 0x80 {
            res.push(len as u8);
        }
        else if len < 0x100 {
            res.push(0x81);
            res.push(len as u8);
        }
        else {
            res.push(0x82);
            res.push((len >> 8) as u8);
            res.push(len as u8);
        }
        res.extend_from_slice(content);
        res
    }

    fn der_seq(content: &[u8]) -> Vec<u8> {
        tlv(0x30, content)
    }

    const OID_SHA256_RSA: &[u8] =
        b"\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x01\x0b";
    const OID_SHA384_RSA: &[u8] =
        b"\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x01\x0c";
    const NULL_PARAMS: &[u8] = b"\x05\x00";

    fn algorithm(oid: &[u8], params: &[u8]) -> Vec<u8> {
        let mut content = oid.to_vec();
        content.extend_from_slice(params);
        der_seq(&content)
    }

    fn issuer_name() -> Vec<u8> {
        // CN=Test CA
        let mut attr = b"\x06\x03\x55\x04\x03".to_vec();
        attr.extend_from_slice(&tlv(0x13, b"Test CA"));
        der_seq(&tlv(0x31, &der_seq(&attr)))
    }

    fn utc_time(s: &str) -> Vec<u8> {
        tlv(0x17, s.as_bytes())
    }

    fn entry(serial: &[u8], extensions: Option<&[u8]>) -> Vec<u8> {
        let mut content = tlv(0x02, serial);
        content.extend_from_slice(&utc_time("230301121500Z"));
        if let Some(ext) = extensions {
            content.extend_from_slice(ext);
        }
        der_seq(&content)
    }

    fn entry_extensions() -> Vec<u8> {
        // A single reasonCode extension, content uninterpreted.
        let mut ext = b"\x06\x03\x55\x1d\x15".to_vec();
        ext.extend_from_slice(b"\x04\x03\x0a\x01\x01");
        der_seq(&der_seq(&ext))
    }

    fn crl_extensions() -> Vec<u8> {
        // A single crlNumber extension inside the explicit tag.
        let mut ext = b"\x06\x03\x55\x1d\x14".to_vec();
        ext.extend_from_slice(b"\x04\x03\x02\x01\x05");
        tlv(0xa0, &der_seq(&der_seq(&ext)))
    }

    struct TestCrl {
        version: Option<u8>,
        next_update: bool,
        entries: Vec<Vec<u8>>,
        crl_ext: Option<Vec<u8>>,
        inner_alg: Vec<u8>,
        outer_alg: Vec<u8>,
    }

    impl Default for TestCrl {
        fn default() -> Self {
            TestCrl {
                version: Some(1),
                next_update: true,
                entries: Vec::new(),
                crl_ext: None,
                inner_alg: algorithm(OID_SHA256_RSA, NULL_PARAMS),
                outer_alg: algorithm(OID_SHA256_RSA, NULL_PARAMS),
            }
        }
    }

    impl TestCrl {
        fn build(&self) -> Vec<u8> {
            let mut tbs = Vec::new();
            if let Some(version) = self.version {
                tbs.extend_from_slice(&tlv(0x02, &[version]));
            }
            tbs.extend_from_slice(&self.inner_alg);
            tbs.extend_from_slice(&issuer_name());
            tbs.extend_from_slice(&utc_time("230101000000Z"));
            if self.next_update {
                tbs.extend_from_slice(&utc_time("230601000000Z"));
            }
            if !self.entries.is_empty() {
                tbs.extend_from_slice(&der_seq(&self.entries.concat()));
            }
            if let Some(ref ext) = self.crl_ext {
                tbs.extend_from_slice(ext);
            }
            let mut outer = der_seq(&tbs);
            outer.extend_from_slice(&self.outer_alg);
            outer.extend_from_slice(&tlv(
                0x03, b"\x00\xde\xad\xbe\xef"
            ));
            der_seq(&outer)
        }
    }

    fn wrap_pem(der: &[u8]) -> String {
        format!(
            "{}\n{}\n{}\n",
            pem::CRL_BEGIN_MARKER, STANDARD.encode(der),
            pem::CRL_END_MARKER
        )
    }

    //--- Single record decoding.

    #[test]
    fn version_defaults_to_v1() {
        let data = TestCrl {
            version: None, .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert_eq!(crl.version(), 1);
        assert!(crl.entries().is_empty());
        assert!(crl.crl_extensions().is_none());
    }

    #[test]
    fn explicit_versions() {
        let data = TestCrl {
            version: Some(0), .. Default::default()
        }.build();
        assert_eq!(Crl::decode(&data).unwrap().version(), 1);
        let data = TestCrl::default().build();
        assert_eq!(Crl::decode(&data).unwrap().version(), 2);
    }

    #[test]
    fn unknown_version() {
        let data = TestCrl {
            version: Some(2), .. Default::default()
        }.build();
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::UnknownVersion
        );
    }

    #[test]
    fn malformed_version_field() {
        // An INTEGER with empty content where the version would sit.
        let mut tbs = tlv(0x02, b"");
        tbs.extend_from_slice(&algorithm(OID_SHA256_RSA, NULL_PARAMS));
        tbs.extend_from_slice(&issuer_name());
        tbs.extend_from_slice(&utc_time("230101000000Z"));
        let mut outer = der_seq(&tbs);
        outer.extend_from_slice(&algorithm(OID_SHA256_RSA, NULL_PARAMS));
        outer.extend_from_slice(&tlv(0x03, b"\x00\xde\xad\xbe\xef"));
        let data = der_seq(&outer);
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::InvalidVersion
        );
    }

    #[test]
    fn decoded_fields() {
        let data = TestCrl {
            entries: vec![entry(b"\xab", None)],
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert_eq!(crl.issuer().to_string(), "CN=Test CA");
        assert_eq!(crl.this_update().to_string(), "2023-01-01 00:00:00");
        assert_eq!(
            crl.next_update().unwrap().to_string(), "2023-06-01 00:00:00"
        );
        assert_eq!(
            crl.signature_algorithm().to_string(), "RSA with SHA-256"
        );
        assert_eq!(crl.signature(), b"\xde\xad\xbe\xef");
        assert_eq!(crl.raw(), data.as_slice());
        assert!(data.windows(crl.tbs_bytes().len()).any(|window| {
            window == crl.tbs_bytes()
        }));
    }

    #[test]
    fn entry_lists_of_various_sizes() {
        for n in [0u8, 1, 5].iter().copied() {
            let entries: Vec<_> = (1..=n).map(|serial| {
                entry(&[serial], None)
            }).collect();
            let data = TestCrl {
                entries, .. Default::default()
            }.build();
            let crl = Crl::decode(&data).unwrap();
            assert_eq!(crl.entries().len(), usize::from(n));
            for (idx, entry) in crl.entries().iter().enumerate() {
                assert_eq!(entry.serial(), &[idx as u8 + 1]);
                assert_eq!(
                    entry.revocation_date().to_string(),
                    "2023-03-01 12:15:00"
                );
            }
        }
    }

    #[test]
    fn serial_content_is_kept_verbatim() {
        // Top bit set and zero padded serials pass through unchanged.
        let data = TestCrl {
            entries: vec![
                entry(b"\xab", None), entry(b"\x00\xab", None)
            ],
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert_eq!(crl.entries()[0].serial(), b"\xab");
        assert_eq!(crl.entries()[1].serial(), b"\x00\xab");
    }

    #[test]
    fn is_revoked() {
        let data = TestCrl {
            entries: vec![entry(b"\x12", None), entry(b"\x47", None)],
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert!(crl.is_revoked(b"\x47"));
        assert!(!crl.is_revoked(b"\x48"));
    }

    #[test]
    fn next_update_is_optional() {
        let data = TestCrl {
            next_update: false, .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert!(crl.next_update().is_none());
    }

    #[test]
    fn truncated_record() {
        let data = TestCrl::default().build();
        assert_eq!(
            Crl::decode(&data[..data.len() - 1]).unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
    }

    #[test]
    fn trailing_data_after_record() {
        let mut data = TestCrl::default().build();
        data.push(0);
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
    }

    #[test]
    fn unknown_signature_algorithm() {
        let data = TestCrl {
            inner_alg: algorithm(b"\x06\x03\x2a\x03\x04", b""),
            outer_alg: algorithm(b"\x06\x03\x2a\x03\x04", b""),
            .. Default::default()
        }.build();
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::UnknownSigAlg
        );
    }

    #[test]
    fn algorithm_parameter_mismatch() {
        // Inner NULL parameters, outer absent.
        let data = TestCrl {
            outer_alg: algorithm(OID_SHA256_RSA, b""),
            .. Default::default()
        }.build();
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::SigMismatch
        );
    }

    #[test]
    fn algorithm_oid_mismatch() {
        let data = TestCrl {
            outer_alg: algorithm(OID_SHA384_RSA, NULL_PARAMS),
            .. Default::default()
        }.build();
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::SigMismatch
        );
    }

    //--- Extensions.

    #[test]
    fn crl_extensions_on_v2() {
        let data = TestCrl {
            crl_ext: Some(crl_extensions()),
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        let ext = crl.crl_extensions().unwrap();
        // The captured span is the content of the Extensions sequence.
        let mut expected = b"\x06\x03\x55\x1d\x14".to_vec();
        expected.extend_from_slice(b"\x04\x03\x02\x01\x05");
        assert_eq!(ext, der_seq(&expected).as_slice());
    }

    #[test]
    fn crl_extensions_on_v1_are_refused() {
        let data = TestCrl {
            version: None,
            crl_ext: Some(crl_extensions()),
            .. Default::default()
        }.build();
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
    }

    #[test]
    fn broken_crl_extensions() {
        // Not a sequence of sequences inside the envelope.
        let data = TestCrl {
            crl_ext: Some(tlv(0xa0, &der_seq(b"\x02\x01\x01"))),
            .. Default::default()
        }.build();
        assert_eq!(
            Crl::decode(&data).unwrap_err().kind(),
            ErrorKind::InvalidExtensions
        );
    }

    #[test]
    fn entry_extensions_on_v2() {
        let data = TestCrl {
            entries: vec![entry(b"\x01", Some(&entry_extensions()))],
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert!(crl.entries()[0].extensions().is_some());
    }

    #[test]
    fn entry_extensions_on_v1_are_tolerated() {
        let data = TestCrl {
            version: None,
            entries: vec![entry(b"\x01", Some(&entry_extensions()))],
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert_eq!(crl.version(), 1);
        assert!(crl.entries()[0].extensions().is_some());
    }

    //--- Chains and envelopes.

    #[test]
    fn chain_from_wrapped_records() {
        let first = TestCrl {
            entries: vec![entry(b"\x01", None)],
            .. Default::default()
        }.build();
        let second = TestCrl {
            entries: vec![entry(b"\x02", None), entry(b"\x03", None)],
            .. Default::default()
        }.build();
        let mut text = wrap_pem(&first).into_bytes();
        text.extend_from_slice(wrap_pem(&second).as_bytes());
        text.push(0);

        let chain = CrlChain::decode(&text).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.records()[0].entries().len(), 1);
        assert_eq!(chain.records()[1].entries().len(), 2);
    }

    #[test]
    fn broken_second_record_keeps_first() {
        let first = TestCrl::default().build();
        let mut second = TestCrl::default().build();
        let len = second.len();
        second.truncate(len - 1);
        let mut text = wrap_pem(&first).into_bytes();
        text.extend_from_slice(wrap_pem(&second).as_bytes());
        text.push(0);

        let mut chain = CrlChain::new();
        let err = chain.parse(&text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn garbage_after_final_envelope() {
        let mut text = wrap_pem(
            &TestCrl::default().build()
        ).into_bytes();
        text.extend_from_slice(b"garbage\x00");

        let mut chain = CrlChain::new();
        let err = chain.parse(&text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn raw_binary_record_without_terminator() {
        let data = TestCrl::default().build();
        let chain = CrlChain::decode(&data).unwrap();
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn parse_der_appends() {
        let data = TestCrl::default().build();
        let mut chain = CrlChain::new();
        chain.parse_der(&data).unwrap();
        chain.parse_der(&data).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.iter().count(), 2);
    }

    //--- Rendering.

    #[test]
    fn info_layout() {
        let data = TestCrl {
            entries: vec![entry(b"\xab", None)],
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert_eq!(
            crl.to_string(),
            "CRL version   : 2\n\
             issuer name   : CN=Test CA\n\
             this update   : 2023-01-01 00:00:00\n\
             next update   : 2023-06-01 00:00:00\n\
             Revoked certificates:\n\
             serial number: AB revocation date: 2023-03-01 12:15:00\n\
             signed using  : RSA with SHA-256\n"
        );
    }

    #[test]
    fn info_without_next_update() {
        let data = TestCrl {
            next_update: false, .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        assert!(
            crl.to_string().contains(
                "next update   : 0000-00-00 00:00:00"
            )
        );
    }

    #[test]
    fn info_respects_buffer_capacity() {
        let data = TestCrl::default().build();
        let crl = Crl::decode(&data).unwrap();

        let err = crl.info(&mut [], "  ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BufferTooSmall);

        let mut big = vec![0u8; 4096];
        let len = crl.info(&mut big, "  ").unwrap();
        let expected = big[..len].to_vec();

        let mut exact = vec![0u8; len];
        assert_eq!(crl.info(&mut exact, "  ").unwrap(), len);
        assert_eq!(exact, expected);

        let mut short = vec![0u8; len - 1];
        let err = crl.info(&mut short, "  ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BufferTooSmall);
    }

    #[test]
    fn long_serials_are_cut_off() {
        let serial = [0x5au8; 40];
        let data = TestCrl {
            entries: vec![entry(&serial, None)],
            .. Default::default()
        }.build();
        let crl = Crl::decode(&data).unwrap();
        let info = crl.to_string();
        assert!(info.contains("5A:5A"));
        assert!(info.contains("...."));
    }
}
