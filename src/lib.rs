//! Decoding of X.509 certificate revocation lists.
//!
//! A _certificate revocation list_ (CRL) is a signed statement by a
//! certificate authority listing the certificates it has withdrawn before
//! their scheduled expiry. This crate decodes such lists from their DER
//! encoding as defined in [RFC 5280], whether handed over raw or wrapped
//! in the customary Base64 text envelope, and gives structured access to
//! their content: issuer, update times, the revoked serial numbers, and
//! the signature material needed by an external verifier.
//!
//! Decoding a single binary record produces a [`Crl`][crl::Crl]; parsing
//! a buffer that may hold several enveloped records in a row accumulates
//! them into a [`CrlChain`][crl::CrlChain]. Signature verification and
//! interpretation of extension content are out of scope.
//!
//! [RFC 5280]: https://tools.ietf.org/html/rfc5280

pub use self::crl::{Crl, CrlChain, CrlEntry};
pub use self::error::{Error, ErrorKind};

pub mod crl;
pub mod crypto;
pub mod error;
pub mod oid;
pub mod pem;
pub mod x509;
