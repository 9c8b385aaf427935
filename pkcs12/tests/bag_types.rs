//! A PFX holding an id-encryptedData safe (PBES2 / PBKDF2 / AES-256-CBC)
//! and an id-data safe with a safeContentsBag wrapping a secretBag, then a
//! keyBag and a crlBag. The MacData uses SHA-256 and leaves iterations at
//! the default.

use hako_asn1::{Mode, Registry, Value};
use hako_pkcs12::registry::standard_registry;
use hako_pkcs12::{BagType, Safe, WalkOptions, Walker, oid, walk};
use rstest::{fixture, rstest};

const BAGS_BASE64: &str = include_str!("../../testdata/bags.b64");

#[fixture]
fn bags_der() -> Vec<u8> {
    hako_pem::read_base64_text(BAGS_BASE64).unwrap()
}

fn integer(value: &Value, name: &str) -> Option<u64> {
    value
        .get(name)
        .and_then(Value::as_integer)
        .and_then(|i| i.to_u64())
}

fn algorithm(value: &Value) -> &hako_asn1::ObjectIdentifier {
    value.get("algorithm").and_then(Value::as_oid).unwrap()
}

#[rstest]
fn test_walk_mac_data_defaults(bags_der: Vec<u8>) {
    assert_eq!(472, bags_der.len());
    let pkcs12 = walk(&bags_der).unwrap();
    let mac = pkcs12.mac_data.unwrap();
    assert_eq!(oid::SHA256, mac.digest_algorithm);
    assert!(mac.digest_parameters.unwrap().typed().unwrap().is_null());
    assert_eq!(&[0x42; 32][..], mac.digest.as_bytes());
    assert_eq!(&[0x24; 8][..], mac.salt.as_bytes());
    assert_eq!(1, mac.iterations);
}

#[rstest]
fn test_walk_encrypted_safe(bags_der: Vec<u8>) {
    let pkcs12 = walk(&bags_der).unwrap();
    assert_eq!(2, pkcs12.safes.len());

    let Safe::Encrypted {
        content_type,
        content,
    } = &pkcs12.safes[0]
    else {
        panic!("unexpected safe {:?}", pkcs12.safes[0]);
    };
    assert_eq!(&oid::ID_ENCRYPTED_DATA, content_type);
    assert_eq!(Some(0), integer(content, "version"));

    let info = content.get("encryptedContentInfo").unwrap();
    assert_eq!(
        &oid::ID_DATA,
        info.get("contentType").and_then(Value::as_oid).unwrap()
    );
    assert_eq!(
        &[0x5a; 32][..],
        info.get("encryptedContent")
            .and_then(Value::as_octet_string)
            .unwrap()
            .as_bytes()
    );

    let scheme = info.get("contentEncryptionAlgorithm").unwrap();
    assert_eq!(&oid::PBES2, algorithm(scheme));
    let pbes2 = scheme.get("parameters").and_then(Value::typed).unwrap();

    let kdf = pbes2.get("keyDerivationFunc").unwrap();
    assert_eq!(&oid::PBKDF2, algorithm(kdf));
    let pbkdf2 = kdf.get("parameters").and_then(Value::typed).unwrap();
    assert_eq!(Some(2048), integer(pbkdf2, "iterationCount"));
    assert!(pbkdf2.get("keyLength").is_none());
    // prf is absent in the input and takes its default
    assert_eq!(&oid::HMAC_WITH_SHA1, algorithm(pbkdf2.get("prf").unwrap()));

    let cipher = pbes2.get("encryptionScheme").unwrap();
    assert_eq!(&oid::AES256_CBC, algorithm(cipher));
    let iv = cipher
        .get("parameters")
        .and_then(Value::typed)
        .and_then(Value::as_octet_string)
        .unwrap();
    assert_eq!(&[0x11; 16][..], iv.as_bytes());
}

#[rstest]
fn test_walk_nested_safe_contents(bags_der: Vec<u8>) {
    let pkcs12 = walk(&bags_der).unwrap();
    let order: Vec<BagType> = pkcs12
        .bags()
        .into_iter()
        .map(|bag| bag.bag_type.clone())
        .collect();
    assert_eq!(
        vec![
            BagType::SafeContents,
            BagType::Secret,
            BagType::Key,
            BagType::Crl
        ],
        order
    );

    let Safe::Data { bags } = &pkcs12.safes[1] else {
        panic!("unexpected safe {:?}", pkcs12.safes[1]);
    };
    assert_eq!(3, bags.len());
    let nested = &bags[0];
    assert_eq!(1, nested.children.len());
    assert!(nested.attributes.is_empty());

    let secret = &nested.children[0];
    assert_eq!(BagType::Secret, secret.bag_type);
    // non-BMP character, carried as a surrogate pair
    assert_eq!(Some("key \u{1f60e}"), secret.friendly_name());
    let secret_bag = secret.value.typed().unwrap();
    assert_eq!(
        secret_bag.get("secretTypeId").and_then(Value::as_oid).unwrap(),
        &"1.3.6.1.4.1.99999.1"
    );
    // no secret types are registered
    let secret_value = secret_bag.get("secretValue").and_then(Value::as_open).unwrap();
    assert!(!secret_value.is_resolved());
    assert_eq!(b"\x04\x0atop secret", secret_value.raw());
}

#[rstest]
fn test_walk_key_and_crl_bags(bags_der: Vec<u8>) {
    let pkcs12 = walk(&bags_der).unwrap();
    let bags = pkcs12.bags();

    let key = bags[2];
    assert_eq!(BagType::Key, key.bag_type);
    assert_eq!(Some(&[0x01][..]), key.local_key_id());
    assert_eq!(None, key.friendly_name());
    let private_key_info = key.value.typed().unwrap();
    assert_eq!(Some(0), integer(private_key_info, "version"));
    let key_algorithm = private_key_info.get("privateKeyAlgorithm").unwrap();
    assert_eq!(&oid::RSA_ENCRYPTION, algorithm(key_algorithm));
    assert!(
        key_algorithm
            .get("parameters")
            .and_then(Value::typed)
            .unwrap()
            .is_null()
    );
    assert_eq!(
        (0..16).collect::<Vec<u8>>(),
        private_key_info
            .get("privateKey")
            .and_then(Value::as_octet_string)
            .unwrap()
            .as_bytes()
    );

    let crl = bags[3];
    assert_eq!(BagType::Crl, crl.bag_type);
    let crl_bag = crl.value.typed().unwrap();
    assert_eq!(
        &oid::X509_CRL,
        crl_bag.get("crlId").and_then(Value::as_oid).unwrap()
    );
    let crl_value = crl_bag
        .get("crlValue")
        .and_then(Value::typed)
        .and_then(Value::as_octet_string)
        .unwrap();
    assert_eq!(&[0x30, 0x03, 0x02, 0x01, 0x01][..], crl_value.as_bytes());
}

#[rstest]
fn test_walk_display_non_bmp_friendly_name(bags_der: Vec<u8>) {
    let text = walk(&bags_der).unwrap().to_string();
    assert!(text.contains("Safe 0: encryptedData"));
    assert!(text.contains("friendlyName: BMPString \"key \u{1f60e}\""));
    assert!(text.contains("Algorithm: sha256 (2.16.840.1.101.3.4.2.1)"));
    assert!(text.contains("Iterations: 1\n"));
}

#[rstest(options,
    case(WalkOptions::default().with_mode(Mode::Ber)),
    case(WalkOptions::default().with_round_trip(false)),
)]
fn test_walk_options_agree(bags_der: Vec<u8>, options: WalkOptions) {
    let walked = Walker::new(standard_registry())
        .options(options)
        .walk(&bags_der)
        .unwrap();
    assert_eq!(walk(&bags_der).unwrap(), walked);
}

#[rstest]
fn test_walk_with_empty_registry(bags_der: Vec<u8>) {
    let registry = Registry::default();
    let pkcs12 = Walker::new(&registry).walk(&bags_der).unwrap();

    // id-data layers are still unwrapped, everything else stays raw
    assert!(matches!(
        &pkcs12.safes[0],
        Safe::Opaque { content: Some(_), .. }
    ));
    let bags = pkcs12.bags();
    assert_eq!(3, bags.len());
    assert!(bags.iter().all(|bag| bag.value.typed().is_none()));
    assert!(bags[0].children.is_empty());
    assert_eq!(None, bags[0].friendly_name());
}
