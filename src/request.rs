use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bon::Builder;

use crate::error::OpensslError;

/// Subject fields for a certificate signing request or a self-signed
/// certificate.
///
/// # Fields
/// * `common_name` - The common name (CN).
/// * `country` - The country (C).
/// * `state` - The state or province (ST).
/// * `locality` - The locality or city (localityName).
/// * `organization` - The organization (O).
/// * `organizational_unit` - The organizational unit (OU).
/// * `email` - The contact address (emailAddress).
#[derive(Clone, Debug, Builder, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: String,
    pub country: String,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub email: Option<String>,
}

impl DistinguishedName {
    /// Renders the `-subj` argument, e.g. `/CN=example.com/C=US/O=Example`.
    ///
    /// Fields are emitted in the order CN, C, ST, localityName, O, OU,
    /// emailAddress. Optional fields that are absent or empty are skipped.
    pub fn to_subject(&self) -> String {
        let fields = [
            ("CN", Some(&self.common_name)),
            ("C", Some(&self.country)),
            ("ST", self.state.as_ref()),
            ("localityName", self.locality.as_ref()),
            ("O", self.organization.as_ref()),
            ("OU", self.organizational_unit.as_ref()),
            ("emailAddress", self.email.as_ref()),
        ];

        let mut subject = String::new();
        for (index, (tag, value)) in fields.into_iter().enumerate() {
            let value = match value {
                Some(v) => v,
                None => continue,
            };
            // CN and C are always written, even when blank.
            if index >= 2 && value.is_empty() {
                continue;
            }
            subject.push('/');
            subject.push_str(tag);
            subject.push('=');
            push_escaped(&mut subject, value);
        }
        subject
    }
}

// openssl splits -subj on unescaped '/' and joins multi-valued RDNs on '+'.
fn push_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        if matches!(ch, '/' | '\\' | '+') {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// Private key algorithms the tool can generate on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    Dsa,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => f.write_str("RSA"),
            KeyAlgorithm::Dsa => f.write_str("DSA"),
        }
    }
}

impl FromStr for KeyAlgorithm {
    type Err = OpensslError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rsa" => Ok(KeyAlgorithm::Rsa),
            "dsa" => Ok(KeyAlgorithm::Dsa),
            other => Err(OpensslError::InvalidInput(format!(
                "unsupported key algorithm: {other}"
            ))),
        }
    }
}

/// A standalone private key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyGenRequest {
    pub bits: u32,
    pub algorithm: KeyAlgorithm,
}

impl KeyGenRequest {
    pub fn new(bits: u32, algorithm: KeyAlgorithm) -> Self {
        Self { bits, algorithm }
    }

    /// The choices offered to users picking a key size.
    pub fn presets() -> Vec<KeyGenRequest> {
        [KeyAlgorithm::Rsa, KeyAlgorithm::Dsa]
            .into_iter()
            .flat_map(|algorithm| {
                [1024, 2048, 4096]
                    .into_iter()
                    .map(move |bits| KeyGenRequest { bits, algorithm })
            })
            .collect()
    }

    /// Short label such as `RSA 2048 bits`.
    pub fn label(&self) -> String {
        format!("{} {} bits", self.algorithm, self.bits)
    }
}

/// Digest used to sign a self-signed certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// The command-line flag, e.g. `-sha256`.
    pub fn flag(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "-sha1",
            HashAlgorithm::Sha224 => "-sha224",
            HashAlgorithm::Sha256 => "-sha256",
            HashAlgorithm::Sha384 => "-sha384",
            HashAlgorithm::Sha512 => "-sha512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = OpensslError;

    /// Accepts both `sha256` and the flag spelling `-sha256`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('-').to_ascii_lowercase();
        match name.as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha224" => Ok(HashAlgorithm::Sha224),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(OpensslError::InvalidInput(format!(
                "unsupported hash algorithm: {s}"
            ))),
        }
    }
}

/// A new RSA key plus a certificate signing request for it.
#[derive(Clone, Debug, Builder, PartialEq, Eq)]
pub struct CsrRequest {
    pub subject: DistinguishedName,
    #[builder(default = 2048)]
    pub key_bits: u32,
}

/// A new RSA key plus a self-signed certificate for it.
#[derive(Clone, Debug, Builder, PartialEq, Eq)]
pub struct CertRequest {
    pub subject: DistinguishedName,
    #[builder(default = 2048)]
    pub key_bits: u32,
    #[builder(default = 365)]
    pub days: u32,
    #[builder(default)]
    pub hash: HashAlgorithm,
}

/// Bundle a key and certificate (and optionally a CA chain) into a PKCS#12
/// file.
#[derive(Clone, Builder)]
pub struct P12Request {
    pub key: PathBuf,
    pub cert: PathBuf,
    pub bundle: Option<PathBuf>,
    /// Friendly name stored with the certificate.
    pub alias: Option<String>,
    pub password: String,
    pub output: PathBuf,
}

impl fmt::Debug for P12Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("P12Request")
            .field("key", &self.key)
            .field("cert", &self.cert)
            .field("bundle", &self.bundle)
            .field("alias", &self.alias)
            .field("password", &"<redacted>")
            .field("output", &self.output)
            .finish()
    }
}
