//! The object identifiers used in this crate.
//!
//! This module collects all the object identifiers used at various places
//! in this crate in one central place. They are public so you can refer to
//! them should that ever become necessary.

use bcder::{ConstOid, Oid};


//------------ Signature algorithms ------------------------------------------

/// [RFC 3279](https://tools.ietf.org/html/rfc3279) `md5WithRSAEncryption`
pub const MD5_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 4]);

/// [RFC 3279](https://tools.ietf.org/html/rfc3279) `sha1WithRSAEncryption`
pub const SHA1_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 5]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `sha224WithRSAEncryption`
pub const SHA224_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 14]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `sha256WithRSAEncryption`
pub const SHA256_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 11]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `sha384WithRSAEncryption`
pub const SHA384_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 12]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `sha512WithRSAEncryption`
pub const SHA512_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 13]);

/// [RFC 3279](https://tools.ietf.org/html/rfc3279) `ecdsa-with-SHA1`
pub const ECDSA_WITH_SHA1: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 1]);

/// [RFC 5758](https://tools.ietf.org/html/rfc5758) `ecdsa-with-SHA224`
pub const ECDSA_WITH_SHA224: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 3, 1]);

/// [RFC 5758](https://tools.ietf.org/html/rfc5758) `ecdsa-with-SHA256`
pub const ECDSA_WITH_SHA256: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 3, 2]);

/// [RFC 5758](https://tools.ietf.org/html/rfc5758) `ecdsa-with-SHA384`
pub const ECDSA_WITH_SHA384: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 3, 3]);

/// [RFC 5758](https://tools.ietf.org/html/rfc5758) `ecdsa-with-SHA512`
pub const ECDSA_WITH_SHA512: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 3, 4]);


//------------ Name attribute types ------------------------------------------

pub const AT_COMMON_NAME: Oid<&[u8]> = Oid(&[85, 4, 3]); // 2 5 4 3
pub const AT_SERIAL_NUMBER: Oid<&[u8]> = Oid(&[85, 4, 5]); // 2 5 4 5
pub const AT_COUNTRY: Oid<&[u8]> = Oid(&[85, 4, 6]); // 2 5 4 6
pub const AT_LOCALITY: Oid<&[u8]> = Oid(&[85, 4, 7]); // 2 5 4 7
pub const AT_STATE: Oid<&[u8]> = Oid(&[85, 4, 8]); // 2 5 4 8
pub const AT_ORGANIZATION: Oid<&[u8]> = Oid(&[85, 4, 10]); // 2 5 4 10
pub const AT_ORG_UNIT: Oid<&[u8]> = Oid(&[85, 4, 11]); // 2 5 4 11

/// PKCS #9 `emailAddress`
pub const AT_EMAIL_ADDRESS: Oid<&[u8]>
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 1]);
