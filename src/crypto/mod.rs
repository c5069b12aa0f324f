//! Algorithms appearing in CRL signatures.
//!

pub use self::digest::DigestAlgorithm;
pub use self::signature::{PublicKeyAlgorithm, SignatureAlgorithm};

pub mod digest;
pub mod signature;
