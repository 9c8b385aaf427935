//! Object identifiers used by PKCS#12 and the structures it embeds.

use hako_asn1::ObjectIdentifier;

// RFC 5652 content types
pub const ID_DATA: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 1]);
pub const ID_SIGNED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 2]);
pub const ID_ENVELOPED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 3]);
pub const ID_ENCRYPTED_DATA: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 7, 6]);

// RFC 7292 bag types, pkcs-12 10.1.x
pub const KEY_BAG: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 10, 1, 1]);
pub const PKCS8_SHROUDED_KEY_BAG: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 10, 1, 2]);
pub const CERT_BAG: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 10, 1, 3]);
pub const CRL_BAG: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 10, 1, 4]);
pub const SECRET_BAG: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 10, 1, 5]);
pub const SAFE_CONTENTS_BAG: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 10, 1, 6]);

// PKCS#9 certTypes and crlTypes
pub const X509_CERTIFICATE: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 22, 1]);
pub const SDSI_CERTIFICATE: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 22, 2]);
pub const X509_CRL: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 23, 1]);

// PKCS#9 attributes
pub const CONTENT_TYPE: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 3]);
pub const MESSAGE_DIGEST: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 4]);
pub const SIGNING_TIME: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 5]);
pub const FRIENDLY_NAME: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 20]);
pub const LOCAL_KEY_ID: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 9, 21]);

// RFC 7292 Appendix C password-based encryption
pub const PBE_WITH_SHA_AND_128BIT_RC4: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 1, 1]);
pub const PBE_WITH_SHA_AND_40BIT_RC4: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 1, 2]);
pub const PBE_WITH_SHA_AND_3KEY_TRIPLE_DES_CBC: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 1, 3]);
pub const PBE_WITH_SHA_AND_2KEY_TRIPLE_DES_CBC: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 1, 4]);
pub const PBE_WITH_SHA_AND_128BIT_RC2_CBC: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 1, 5]);
pub const PBE_WITH_SHA_AND_40BIT_RC2_CBC: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 12, 1, 6]);

// RFC 8018
pub const PBKDF2: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 5, 12]);
pub const PBES2: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 5, 13]);
pub const HMAC_WITH_SHA1: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 2, 7]);
pub const HMAC_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 2, 9]);
pub const HMAC_WITH_SHA384: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 2, 10]);
pub const HMAC_WITH_SHA512: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 2, 11]);
pub const DES_EDE3_CBC: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 2, 840, 113549, 3, 7]);
pub const AES128_CBC: ObjectIdentifier =
    ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 1, 2]);
pub const AES192_CBC: ObjectIdentifier =
    ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 1, 22]);
pub const AES256_CBC: ObjectIdentifier =
    ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 1, 42]);

// Digests and keys
pub const SHA1: ObjectIdentifier = ObjectIdentifier::from_static(&[1, 3, 14, 3, 2, 26]);
pub const SHA256: ObjectIdentifier = ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 2, 1]);
pub const SHA384: ObjectIdentifier = ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 2, 2]);
pub const SHA512: ObjectIdentifier = ObjectIdentifier::from_static(&[2, 16, 840, 1, 101, 3, 4, 2, 3]);
pub const RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::from_static(&[1, 2, 840, 113549, 1, 1, 1]);

const NAMES: &[(ObjectIdentifier, &str)] = &[
    (ID_DATA, "data"),
    (ID_SIGNED_DATA, "signedData"),
    (ID_ENVELOPED_DATA, "envelopedData"),
    (ID_ENCRYPTED_DATA, "encryptedData"),
    (KEY_BAG, "keyBag"),
    (PKCS8_SHROUDED_KEY_BAG, "pkcs8ShroudedKeyBag"),
    (CERT_BAG, "certBag"),
    (CRL_BAG, "crlBag"),
    (SECRET_BAG, "secretBag"),
    (SAFE_CONTENTS_BAG, "safeContentsBag"),
    (X509_CERTIFICATE, "x509Certificate"),
    (SDSI_CERTIFICATE, "sdsiCertificate"),
    (X509_CRL, "x509CRL"),
    (CONTENT_TYPE, "contentType"),
    (MESSAGE_DIGEST, "messageDigest"),
    (SIGNING_TIME, "signingTime"),
    (FRIENDLY_NAME, "friendlyName"),
    (LOCAL_KEY_ID, "localKeyId"),
    (PBE_WITH_SHA_AND_128BIT_RC4, "pbeWithSHAAnd128BitRC4"),
    (PBE_WITH_SHA_AND_40BIT_RC4, "pbeWithSHAAnd40BitRC4"),
    (PBE_WITH_SHA_AND_3KEY_TRIPLE_DES_CBC, "pbeWithSHAAnd3-KeyTripleDES-CBC"),
    (PBE_WITH_SHA_AND_2KEY_TRIPLE_DES_CBC, "pbeWithSHAAnd2-KeyTripleDES-CBC"),
    (PBE_WITH_SHA_AND_128BIT_RC2_CBC, "pbeWithSHAAnd128BitRC2-CBC"),
    (PBE_WITH_SHA_AND_40BIT_RC2_CBC, "pbewithSHAAnd40BitRC2-CBC"),
    (PBKDF2, "PBKDF2"),
    (PBES2, "PBES2"),
    (HMAC_WITH_SHA1, "hmacWithSHA1"),
    (HMAC_WITH_SHA256, "hmacWithSHA256"),
    (HMAC_WITH_SHA384, "hmacWithSHA384"),
    (HMAC_WITH_SHA512, "hmacWithSHA512"),
    (DES_EDE3_CBC, "des-ede3-cbc"),
    (AES128_CBC, "aes128-CBC"),
    (AES192_CBC, "aes192-CBC"),
    (AES256_CBC, "aes256-CBC"),
    (SHA1, "sha1"),
    (SHA256, "sha256"),
    (SHA384, "sha384"),
    (SHA512, "sha512"),
    (RSA_ENCRYPTION, "rsaEncryption"),
];

/// Short name of a well-known identifier.
pub fn name(oid: &ObjectIdentifier) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use hako_asn1::ObjectIdentifier;
    use rstest::rstest;

    use super::*;

    #[rstest(oid, expected,
        case(ID_DATA, "1.2.840.113549.1.7.1"),
        case(PKCS8_SHROUDED_KEY_BAG, "1.2.840.113549.1.12.10.1.2"),
        case(PBE_WITH_SHA_AND_3KEY_TRIPLE_DES_CBC, "1.2.840.113549.1.12.1.3"),
        case(SHA1, "1.3.14.3.2.26"),
    )]
    fn test_oid_constants(oid: ObjectIdentifier, expected: &str) {
        assert_eq!(oid, expected);
    }

    #[rstest(oid, expected,
        case(CERT_BAG, Some("certBag")),
        case(FRIENDLY_NAME, Some("friendlyName")),
        case(ObjectIdentifier::from_static(&[1, 3, 6, 1, 4, 1, 311, 17, 1]), None),
    )]
    fn test_name(oid: ObjectIdentifier, expected: Option<&str>) {
        assert_eq!(expected, name(&oid));
    }
}
