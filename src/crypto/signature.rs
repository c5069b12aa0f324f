//! Signature algorithms.
//!
//! A CRL names its signature algorithm twice, once inside the signed
//! region and once outside, as a generic X.509 `AlgorithmIdentifier`.
//! This module resolves such an identifier into the concrete digest and
//! public key algorithm pair a verifier needs. Resolution is the registry
//! of this crate: an identifier that doesn’t resolve makes the whole
//! record undecodable.

use std::fmt;
use crate::oid;
use crate::x509::AlgorithmIdentifier;
use super::digest::DigestAlgorithm;


//------------ PublicKeyAlgorithm --------------------------------------------

/// The public key half of a signature algorithm.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PublicKeyAlgorithm {
    Rsa,
    Ecdsa,
}

impl PublicKeyAlgorithm {
    /// Returns the conventional name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            PublicKeyAlgorithm::Rsa => "RSA",
            PublicKeyAlgorithm::Ecdsa => "ECDSA",
        }
    }
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


//------------ SignatureAlgorithm --------------------------------------------

/// A resolved CRL signature algorithm.
///
/// Pairs the digest and public key algorithms with the exact identifier
/// they were resolved from, so the identifier can later be compared
/// byte-for-byte against its second occurrence in the record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureAlgorithm {
    /// The identifier the algorithm was resolved from.
    identifier: AlgorithmIdentifier,

    /// The digest algorithm.
    digest: DigestAlgorithm,

    /// The public key algorithm.
    public_key: PublicKeyAlgorithm,
}

impl SignatureAlgorithm {
    /// Resolves an algorithm identifier.
    ///
    /// Returns `None` if the object identifier is not in the registry or
    /// if the parameters are neither absent nor NULL. RSASSA-PSS with its
    /// structured parameters is not currently supported.
    pub fn from_identifier(
        identifier: AlgorithmIdentifier
    ) -> Option<Self> {
        use self::DigestAlgorithm::*;
        use self::PublicKeyAlgorithm::*;

        let alg = identifier.algorithm();
        let (digest, public_key) =
            if *alg == oid::MD5_WITH_RSA_ENCRYPTION {
                (Md5, Rsa)
            }
            else if *alg == oid::SHA1_WITH_RSA_ENCRYPTION {
                (Sha1, Rsa)
            }
            else if *alg == oid::SHA224_WITH_RSA_ENCRYPTION {
                (Sha224, Rsa)
            }
            else if *alg == oid::SHA256_WITH_RSA_ENCRYPTION {
                (Sha256, Rsa)
            }
            else if *alg == oid::SHA384_WITH_RSA_ENCRYPTION {
                (Sha384, Rsa)
            }
            else if *alg == oid::SHA512_WITH_RSA_ENCRYPTION {
                (Sha512, Rsa)
            }
            else if *alg == oid::ECDSA_WITH_SHA1 {
                (Sha1, Ecdsa)
            }
            else if *alg == oid::ECDSA_WITH_SHA224 {
                (Sha224, Ecdsa)
            }
            else if *alg == oid::ECDSA_WITH_SHA256 {
                (Sha256, Ecdsa)
            }
            else if *alg == oid::ECDSA_WITH_SHA384 {
                (Sha384, Ecdsa)
            }
            else if *alg == oid::ECDSA_WITH_SHA512 {
                (Sha512, Ecdsa)
            }
            else {
                return None
            };
        if !identifier.has_plain_parameters() {
            return None
        }
        Some(SignatureAlgorithm { identifier, digest, public_key })
    }

    /// Returns the identifier the algorithm was resolved from.
    pub fn identifier(&self) -> &AlgorithmIdentifier {
        &self.identifier
    }

    /// Returns the digest algorithm.
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Returns the public key algorithm.
    pub fn public_key(&self) -> PublicKeyAlgorithm {
        self.public_key
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} with {}", self.public_key, self.digest)
    }
}


//============ Tests =========================================================
