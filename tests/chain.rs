//! Parsing complete CRL files through the public API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use x509_crl::{Crl, CrlChain, ErrorKind};

//--- A small DER builder so the vectors stay readable.

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

fn rsa_sha256() -> Vec<u8> {
    der_seq(b"\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x01\x0b\x05\x00")
}

fn issuer(cn: &[u8]) -> Vec<u8> {
    let mut attr = b"\x06\x03\x55\x04\x03".to_vec();
    attr.extend_from_slice(&tlv(0x13, cn));
    der_seq(&tlv(0x31, &der_seq(&attr)))
}

fn build_crl(cn: &[u8], serials: &[u8]) -> Vec<u8> {
    let mut tbs = tlv(0x02, b"\x01");
    tbs.extend_from_slice(&rsa_sha256());
    tbs.extend_from_slice(&issuer(cn));
    tbs.extend_from_slice(&tlv(0x17, b"230101000000Z"));
    tbs.extend_from_slice(&tlv(0x17, b"230601000000Z"));
    if !serials.is_empty() {
        let mut entries = Vec::new();
        for &serial in serials {
            let mut entry = tlv(0x02, &[serial]);
            entry.extend_from_slice(&tlv(0x17, b"230301121500Z"));
            entries.extend_from_slice(&der_seq(&entry));
        }
        tbs.extend_from_slice(&der_seq(&entries));
    }
    let mut outer = der_seq(&tbs);
    outer.extend_from_slice(&rsa_sha256());
    outer.extend_from_slice(&tlv(0x03, b"\x00\xde\xad\xbe\xef"));
    der_seq(&outer)
}

fn wrap(der: &[u8]) -> String {
    format!(
        "-----BEGIN X509 CRL-----\n{}\n-----END X509 CRL-----\n",
        STANDARD.encode(der)
    )
}

#[test]
fn single_binary_record() {
    let data = build_crl(b"Root CA", &[0x11, 0x22]);
    let crl = Crl::decode(&data).unwrap();
    assert_eq!(crl.version(), 2);
    assert_eq!(crl.issuer().to_string(), "CN=Root CA");
    assert_eq!(crl.entries().len(), 2);
    assert!(crl.is_revoked(b"\x22"));
    assert!(!crl.is_revoked(b"\x33"));
}

#[test]
fn chain_of_enveloped_records() {
    let mut text = wrap(&build_crl(b"Root CA", &[0x01])).into_bytes();
    text.extend_from_slice(
        wrap(&build_crl(b"Sub CA", &[0x02, 0x03])).as_bytes()
    );
    text.push(0);

    let chain = CrlChain::decode(&text).unwrap();
    assert_eq!(chain.len(), 2);

    let issuers: Vec<_> = chain.iter().map(|crl| {
        crl.issuer().to_string()
    }).collect();
    assert_eq!(issuers, ["CN=Root CA", "CN=Sub CA"]);
    assert_eq!(chain.records()[1].entries().len(), 2);
}

#[test]
fn unterminated_text_is_taken_as_binary() {
    // Without the trailing NUL the envelope is never looked for.
    let text = wrap(&build_crl(b"Root CA", &[]));
    let err = CrlChain::decode(text.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn rendering_with_prefix() {
    let data = build_crl(b"Root CA", &[0xab]);
    let crl = Crl::decode(&data).unwrap();

    let mut buf = vec![0u8; 1024];
    let len = crl.info(&mut buf, "> ").unwrap();
    let info = std::str::from_utf8(&buf[..len]).unwrap();
    assert!(info.starts_with("> CRL version   : 2\n"));
    assert!(info.contains("> serial number: AB revocation date: "));
    assert!(info.ends_with("> signed using  : RSA with SHA-256\n"));

    let err = crl.info(&mut buf[..len - 1], "> ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BufferTooSmall);
}
