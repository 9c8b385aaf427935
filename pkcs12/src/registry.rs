//! Population of the open-type registry for PKCS#12.
//!
//! [`standard_registry`] knows every content type, bag type, attribute and
//! algorithm parameter type this crate has a descriptor for. Applications
//! that need more start from [`standard_builder`] and register on top of
//! it through [`Pkcs12Registry`].

use std::sync::LazyLock;

use hako_asn1::schema::{Descriptor, Primitive};
use hako_asn1::{ObjectIdentifier, Registry, RegistryBuilder};

use crate::oid;
use crate::schema::{self, table};

/// Table-specific registration on top of [`RegistryBuilder::register`].
pub trait Pkcs12Registry {
    fn register_content_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self;

    fn register_bag_type(&mut self, oid: ObjectIdentifier, descriptor: &'static Descriptor)
    -> &mut Self;

    fn register_attribute_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self;

    /// Registers the parameters type of an algorithm.
    fn register_algorithm(&mut self, oid: ObjectIdentifier, parameters: &'static Descriptor)
    -> &mut Self;

    fn register_cert_type(&mut self, oid: ObjectIdentifier, descriptor: &'static Descriptor)
    -> &mut Self;

    fn register_crl_type(&mut self, oid: ObjectIdentifier, descriptor: &'static Descriptor)
    -> &mut Self;

    fn register_secret_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self;
}

impl Pkcs12Registry for RegistryBuilder {
    fn register_content_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self {
        self.register(table::CONTENT_TYPES, oid, descriptor)
    }

    fn register_bag_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self {
        self.register(table::BAG_TYPES, oid, descriptor)
    }

    fn register_attribute_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self {
        self.register(table::ATTRIBUTES, oid, descriptor)
    }

    fn register_algorithm(
        &mut self,
        oid: ObjectIdentifier,
        parameters: &'static Descriptor,
    ) -> &mut Self {
        self.register(table::ALGORITHMS, oid, parameters)
    }

    fn register_cert_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self {
        self.register(table::CERT_TYPES, oid, descriptor)
    }

    fn register_crl_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self {
        self.register(table::CRL_TYPES, oid, descriptor)
    }

    fn register_secret_type(
        &mut self,
        oid: ObjectIdentifier,
        descriptor: &'static Descriptor,
    ) -> &mut Self {
        self.register(table::SECRET_TYPES, oid, descriptor)
    }
}

const OCTET_STRING: Descriptor = Descriptor::Primitive(Primitive::OctetString);

/// A builder holding every standard registration.
pub fn standard_builder() -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();

    // id-data carries its payload as an OCTET STRING whose contents are the
    // next layer; the walker decodes that layer itself.
    builder
        .register_content_type(oid::ID_DATA, &OCTET_STRING)
        .register_content_type(oid::ID_ENCRYPTED_DATA, &schema::ENCRYPTED_DATA);

    builder
        .register_bag_type(oid::KEY_BAG, &schema::PRIVATE_KEY_INFO)
        .register_bag_type(oid::PKCS8_SHROUDED_KEY_BAG, &schema::ENCRYPTED_PRIVATE_KEY_INFO)
        .register_bag_type(oid::CERT_BAG, &schema::CERT_BAG)
        .register_bag_type(oid::CRL_BAG, &schema::CRL_BAG)
        .register_bag_type(oid::SECRET_BAG, &schema::SECRET_BAG)
        .register_bag_type(oid::SAFE_CONTENTS_BAG, &schema::SAFE_CONTENTS);

    builder
        .register_cert_type(oid::X509_CERTIFICATE, &OCTET_STRING)
        .register_cert_type(oid::SDSI_CERTIFICATE, &schema::IA5_STRING)
        .register_crl_type(oid::X509_CRL, &OCTET_STRING);

    builder
        .register_attribute_type(oid::FRIENDLY_NAME, &schema::BMP_STRING)
        .register_attribute_type(oid::LOCAL_KEY_ID, &OCTET_STRING)
        .register_attribute_type(oid::CONTENT_TYPE, &schema::OBJECT_IDENTIFIER)
        .register_attribute_type(oid::MESSAGE_DIGEST, &OCTET_STRING)
        .register_attribute_type(oid::SIGNING_TIME, &schema::TIME);

    for pbe in [
        oid::PBE_WITH_SHA_AND_128BIT_RC4,
        oid::PBE_WITH_SHA_AND_40BIT_RC4,
        oid::PBE_WITH_SHA_AND_3KEY_TRIPLE_DES_CBC,
        oid::PBE_WITH_SHA_AND_2KEY_TRIPLE_DES_CBC,
        oid::PBE_WITH_SHA_AND_128BIT_RC2_CBC,
        oid::PBE_WITH_SHA_AND_40BIT_RC2_CBC,
    ] {
        builder.register_algorithm(pbe, &schema::PKCS12_PBE_PARAMS);
    }
    builder
        .register_algorithm(oid::PBES2, &schema::PBES2_PARAMS)
        .register_algorithm(oid::PBKDF2, &schema::PBKDF2_PARAMS);
    // IVs
    for cipher in [
        oid::DES_EDE3_CBC,
        oid::AES128_CBC,
        oid::AES192_CBC,
        oid::AES256_CBC,
    ] {
        builder.register_algorithm(cipher, &OCTET_STRING);
    }
    for null_parameters in [
        oid::HMAC_WITH_SHA1,
        oid::HMAC_WITH_SHA256,
        oid::HMAC_WITH_SHA384,
        oid::HMAC_WITH_SHA512,
        oid::SHA1,
        oid::SHA256,
        oid::SHA384,
        oid::SHA512,
        oid::RSA_ENCRYPTION,
    ] {
        builder.register_algorithm(null_parameters, &schema::NULL);
    }

    builder
}

static STANDARD_REGISTRY: LazyLock<Registry> = LazyLock::new(|| standard_builder().build());

/// The shared registry built from [`standard_builder`].
pub fn standard_registry() -> &'static Registry {
    &STANDARD_REGISTRY
}
