use std::fmt;
use std::path::{Path, PathBuf};

/// Certificate encodings the tool converts between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CertFormat {
    /// Base64 text with `-----BEGIN CERTIFICATE-----` armour.
    Pem,
    /// Raw ASN.1 DER bytes.
    Der,
}

impl CertFormat {
    /// Extension given to converted files, with its leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            CertFormat::Pem => ".pem",
            CertFormat::Der => ".der",
        }
    }

    /// Extensions that are replaced (rather than appended to) when
    /// converting into this format.
    pub fn source_extensions(&self) -> &'static [&'static str] {
        match self {
            CertFormat::Pem => &[".cer", ".der", ".crt"],
            CertFormat::Der => &[".pem", ".cer", ".crt"],
        }
    }
}

impl fmt::Display for CertFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertFormat::Pem => f.write_str("PEM"),
            CertFormat::Der => f.write_str("DER"),
        }
    }
}

/// Convert the certificate at `source` into `target`, next to the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub target: CertFormat,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, target: CertFormat) -> Self {
        Self {
            source: source.into(),
            target,
        }
    }

    /// Where the converted file is written.
    ///
    /// `cert.crt` becomes `cert.pem`; `notes.log` becomes `notes.log.der`.
    pub fn destination(&self) -> PathBuf {
        let dir = self.source.parent().unwrap_or_else(|| Path::new(""));
        let file_name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let stem = match self.source.extension() {
            Some(ext) => {
                let dotted = format!(".{}", ext.to_string_lossy());
                if self.target.source_extensions().iter().any(|e| *e == dotted) {
                    self.source
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default()
                } else {
                    file_name
                }
            }
            None => file_name,
        };

        dir.join(format!("{}{}", stem, self.target.extension()))
    }
}

/// Confirmation that a conversion wrote its destination file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Converted {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Converted {
    /// Notification text for the user.
    pub fn message(&self) -> String {
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("The file {name} has been successfully converted.")
    }
}
