//! Descriptors for PKCS#12 and the structures it carries.
//!
//! Every open field names the registry table its type comes from, see
//! [`crate::registry`].

use hako_asn1::schema::{Alternative, Descriptor, Field, OpenType, Primitive};

/// Registry table names.
pub mod table {
    pub const CONTENT_TYPES: &str = "contentTypes";
    pub const BAG_TYPES: &str = "bagTypes";
    pub const ATTRIBUTES: &str = "attributes";
    pub const ALGORITHMS: &str = "algorithms";
    pub const CERT_TYPES: &str = "certTypes";
    pub const CRL_TYPES: &str = "crlTypes";
    pub const SECRET_TYPES: &str = "secretTypes";
}

pub const INTEGER: Descriptor = Descriptor::Primitive(Primitive::Integer);
pub const OCTET_STRING: Descriptor = Descriptor::Primitive(Primitive::OctetString);
pub const NULL: Descriptor = Descriptor::Primitive(Primitive::Null);
pub const OBJECT_IDENTIFIER: Descriptor = Descriptor::Primitive(Primitive::ObjectIdentifier);
pub const BIT_STRING: Descriptor = Descriptor::Primitive(Primitive::BitString);
pub const BMP_STRING: Descriptor = Descriptor::Primitive(Primitive::BmpString);
pub const IA5_STRING: Descriptor = Descriptor::Primitive(Primitive::Ia5String);

/// ```asn1
/// AlgorithmIdentifier ::= SEQUENCE {
///     algorithm   OBJECT IDENTIFIER,
///     parameters  ANY DEFINED BY algorithm OPTIONAL
/// }
/// ```
pub const ALGORITHM_IDENTIFIER: Descriptor = Descriptor::Sequence(&[
    Field::required("algorithm", &OBJECT_IDENTIFIER),
    Field::optional(
        "parameters",
        &Descriptor::Open(OpenType::new("algorithm", table::ALGORITHMS)),
    ),
]);

/// ```asn1
/// Attribute ::= SEQUENCE {
///     attrType    OBJECT IDENTIFIER,
///     attrValues  SET OF ANY DEFINED BY attrType
/// }
/// ```
///
/// Shared by PKCS#12 bag attributes, PKCS#8 key attributes and CMS
/// unprotected attributes.
pub const ATTRIBUTE: Descriptor = Descriptor::Sequence(&[
    Field::required("attrId", &OBJECT_IDENTIFIER),
    Field::required(
        "attrValues",
        &Descriptor::SetOf(&Descriptor::Open(OpenType::new("attrId", table::ATTRIBUTES))),
    ),
]);

pub const ATTRIBUTES: Descriptor = Descriptor::SetOf(&ATTRIBUTE);

// RFC 5652

/// ```asn1
/// ContentInfo ::= SEQUENCE {
///     contentType  ContentType,
///     content      [0] EXPLICIT ANY DEFINED BY contentType OPTIONAL
/// }
/// ```
pub const CONTENT_INFO: Descriptor = Descriptor::Sequence(&[
    Field::required("contentType", &OBJECT_IDENTIFIER),
    Field::optional(
        "content",
        &Descriptor::Open(OpenType::new("contentType", table::CONTENT_TYPES)),
    )
    .explicit(0),
]);

pub const ENCRYPTED_CONTENT_INFO: Descriptor = Descriptor::Sequence(&[
    Field::required("contentType", &OBJECT_IDENTIFIER),
    Field::required("contentEncryptionAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::optional("encryptedContent", &OCTET_STRING).implicit(0),
]);

/// ```asn1
/// EncryptedData ::= SEQUENCE {
///     version               CMSVersion,
///     encryptedContentInfo  EncryptedContentInfo,
///     unprotectedAttrs      [1] IMPLICIT UnprotectedAttributes OPTIONAL
/// }
/// ```
pub const ENCRYPTED_DATA: Descriptor = Descriptor::Sequence(&[
    Field::required("version", &INTEGER),
    Field::required("encryptedContentInfo", &ENCRYPTED_CONTENT_INFO),
    Field::optional("unprotectedAttrs", &ATTRIBUTES).implicit(1),
]);

pub const TIME: Descriptor = Descriptor::Choice(&[
    Alternative::new("utcTime", &Descriptor::Primitive(Primitive::UtcTime)),
    Alternative::new(
        "generalTime",
        &Descriptor::Primitive(Primitive::GeneralizedTime),
    ),
]);

// RFC 7292

/// ```asn1
/// PFX ::= SEQUENCE {
///     version   INTEGER {v3(3)}(v3,...),
///     authSafe  ContentInfo,
///     macData   MacData OPTIONAL
/// }
/// ```
pub const PFX: Descriptor = Descriptor::Sequence(&[
    Field::required("version", &INTEGER),
    Field::required("authSafe", &CONTENT_INFO),
    Field::optional("macData", &MAC_DATA),
]);

pub const DIGEST_INFO: Descriptor = Descriptor::Sequence(&[
    Field::required("digestAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::required("digest", &OCTET_STRING),
]);

/// ```asn1
/// MacData ::= SEQUENCE {
///     mac         DigestInfo,
///     macSalt     OCTET STRING,
///     iterations  INTEGER DEFAULT 1
/// }
/// ```
pub const MAC_DATA: Descriptor = Descriptor::Sequence(&[
    Field::required("mac", &DIGEST_INFO),
    Field::required("macSalt", &OCTET_STRING),
    Field::with_default("iterations", &INTEGER, &[0x02, 0x01, 0x01]),
]);

pub const AUTHENTICATED_SAFE: Descriptor = Descriptor::SequenceOf(&CONTENT_INFO);

pub const SAFE_CONTENTS: Descriptor = Descriptor::SequenceOf(&SAFE_BAG);

/// ```asn1
/// SafeBag ::= SEQUENCE {
///     bagId          BAG-TYPE.&id ({PKCS12BagSet}),
///     bagValue       [0] EXPLICIT BAG-TYPE.&Type({PKCS12BagSet}{@bagId}),
///     bagAttributes  SET OF PKCS12Attribute OPTIONAL
/// }
/// ```
pub const SAFE_BAG: Descriptor = Descriptor::Sequence(&[
    Field::required("bagId", &OBJECT_IDENTIFIER),
    Field::required(
        "bagValue",
        &Descriptor::Open(OpenType::new("bagId", table::BAG_TYPES)),
    )
    .explicit(0),
    Field::optional("bagAttributes", &ATTRIBUTES),
]);

pub const CERT_BAG: Descriptor = Descriptor::Sequence(&[
    Field::required("certId", &OBJECT_IDENTIFIER),
    Field::required(
        "certValue",
        &Descriptor::Open(OpenType::new("certId", table::CERT_TYPES)),
    )
    .explicit(0),
]);

pub const CRL_BAG: Descriptor = Descriptor::Sequence(&[
    Field::required("crlId", &OBJECT_IDENTIFIER),
    Field::required(
        "crlValue",
        &Descriptor::Open(OpenType::new("crlId", table::CRL_TYPES)),
    )
    .explicit(0),
]);

pub const SECRET_BAG: Descriptor = Descriptor::Sequence(&[
    Field::required("secretTypeId", &OBJECT_IDENTIFIER),
    Field::required(
        "secretValue",
        &Descriptor::Open(OpenType::new("secretTypeId", table::SECRET_TYPES)),
    )
    .explicit(0),
]);

/// ```asn1
/// pkcs-12PbeParams ::= SEQUENCE {
///     salt        OCTET STRING,
///     iterations  INTEGER
/// }
/// ```
pub const PKCS12_PBE_PARAMS: Descriptor = Descriptor::Sequence(&[
    Field::required("salt", &OCTET_STRING),
    Field::required("iterations", &INTEGER),
]);

// RFC 5208 / RFC 5958

/// PrivateKeyInfo, read as its RFC 5958 successor OneAsymmetricKey so
/// that v2 keys with a public key also bind.
pub const PRIVATE_KEY_INFO: Descriptor = Descriptor::Sequence(&[
    Field::required("version", &INTEGER),
    Field::required("privateKeyAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::required("privateKey", &OCTET_STRING),
    Field::optional("attributes", &ATTRIBUTES).implicit(0),
    Field::optional("publicKey", &BIT_STRING).implicit(1),
]);

pub const ENCRYPTED_PRIVATE_KEY_INFO: Descriptor = Descriptor::Sequence(&[
    Field::required("encryptionAlgorithm", &ALGORITHM_IDENTIFIER),
    Field::required("encryptedData", &OCTET_STRING),
]);

// RFC 8018

/// DER of `AlgorithmIdentifier { hmacWithSHA1, NULL }`, the PBKDF2 prf
/// default.
pub const HMAC_WITH_SHA1_DER: &[u8] = &[
    0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x07, 0x05, 0x00,
];

/// ```asn1
/// PBKDF2-params ::= SEQUENCE {
///     salt CHOICE {
///         specified   OCTET STRING,
///         otherSource AlgorithmIdentifier {{PBKDF2-SaltSources}}
///     },
///     iterationCount  INTEGER (1..MAX),
///     keyLength       INTEGER (1..MAX) OPTIONAL,
///     prf             AlgorithmIdentifier {{PBKDF2-PRFs}} DEFAULT algid-hmacWithSHA1
/// }
/// ```
pub const PBKDF2_PARAMS: Descriptor = Descriptor::Sequence(&[
    Field::required(
        "salt",
        &Descriptor::Choice(&[
            Alternative::new("specified", &OCTET_STRING),
            Alternative::new("otherSource", &ALGORITHM_IDENTIFIER),
        ]),
    ),
    Field::required("iterationCount", &INTEGER),
    Field::optional("keyLength", &INTEGER),
    Field::with_default("prf", &ALGORITHM_IDENTIFIER, HMAC_WITH_SHA1_DER),
]);

pub const PBES2_PARAMS: Descriptor = Descriptor::Sequence(&[
    Field::required("keyDerivationFunc", &ALGORITHM_IDENTIFIER),
    Field::required("encryptionScheme", &ALGORITHM_IDENTIFIER),
]);
