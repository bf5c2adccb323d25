//! Caller-facing operations.
//!
//! Each operation builds its argument vector (allocating temporary outputs
//! first when the tool generates text), runs the tool once, and either
//! returns the whole result or an error. Nothing is retried.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::command::CommandBuilder;
use crate::config::OpensslConfig;
use crate::convert::{ConversionRequest, Converted};
use crate::error::{OpensslError, Result};
use crate::path::PathAdapter;
use crate::pem_utils::{expect_pem, is_private_key_label};
use crate::preview::{DocumentKind, NOT_AVAILABLE};
use crate::process::{ProcessRunner, ToolRunner};
use crate::request::{CertRequest, CsrRequest, KeyGenRequest, P12Request};
use crate::temp::TempOutputs;

/// A private key and the certificate signing request made from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyAndCsr {
    pub key: String,
    pub csr: String,
}

/// A private key and the self-signed certificate made from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyAndCert {
    pub key: String,
    pub cert: String,
}

/// Confirmation that a PKCS#12 bundle was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exported {
    pub destination: PathBuf,
}

impl Exported {
    /// Notification text for the user.
    pub fn message(&self) -> String {
        let name = self
            .destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("The p12 {name} has been exported successfully")
    }
}

/// Entry point for every operation, generic over how the tool is run.
#[derive(Debug, Clone)]
pub struct OpenSsl<R = ProcessRunner> {
    builder: CommandBuilder,
    runner: R,
    temp_dir: PathBuf,
}

impl OpenSsl<ProcessRunner> {
    /// Runs the executable named by `config.tool_path`.
    pub fn new(config: &OpensslConfig) -> Self {
        Self::with_runner(config, ProcessRunner::from_config(config))
    }
}

impl<R: ToolRunner> OpenSsl<R> {
    pub fn with_runner(config: &OpensslConfig, runner: R) -> Self {
        Self {
            builder: CommandBuilder::new(PathAdapter::from_config(config)),
            runner,
            temp_dir: config.temp_dir(),
        }
    }

    /// Replaces the path adapter chosen from the configuration.
    pub fn with_path_adapter(mut self, adapter: PathAdapter) -> Self {
        self.builder = CommandBuilder::new(adapter);
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Converts a certificate between DER and PEM, writing the result next
    /// to the source (see [`ConversionRequest::destination`]).
    #[instrument(skip(self), fields(source = %request.source.display(), target = %request.target))]
    pub async fn convert(&self, request: &ConversionRequest) -> Result<Converted> {
        let cmd = self.builder.convert(request)?;
        self.runner.run(&cmd).await?.into_success()?;

        let converted = Converted {
            source: request.source.clone(),
            destination: request.destination(),
        };
        info!(destination = %converted.destination.display(), "certificate converted");
        Ok(converted)
    }

    /// Generates a standalone private key and returns it as PEM text.
    #[instrument(skip(self), fields(algorithm = %request.algorithm, bits = request.bits))]
    pub async fn generate_key(&self, request: &KeyGenRequest) -> Result<String> {
        let cmd = self.builder.generate_key(request)?;
        let output = self.runner.run(&cmd).await?.into_success()?;
        let key = expect_pem(output.stdout, "private key", is_private_key_label)?;
        info!("private key generated");
        Ok(key)
    }

    /// Generates an RSA key and a certificate signing request for it.
    #[instrument(skip_all, fields(subject = %request.subject.to_subject(), bits = request.key_bits))]
    pub async fn generate_csr(&self, request: &CsrRequest) -> Result<KeyAndCsr> {
        let outputs = TempOutputs::allocate(&self.temp_dir, &["key", "csr"]).await?;
        let (key_path, csr_path) = (&outputs.paths()[0], &outputs.paths()[1]);
        let cmd = self.builder.generate_csr(request, key_path, csr_path)?;

        self.runner.run(&cmd).await?.into_success()?;

        let (key, csr) = read_pair(outputs).await?;
        let key = expect_pem(key, "private key", is_private_key_label)?;
        let csr = expect_pem(csr, "certificate request", |l| l.ends_with("CERTIFICATE REQUEST"))?;
        info!("key and certificate request generated");
        Ok(KeyAndCsr { key, csr })
    }

    /// Generates an RSA key and a self-signed certificate for it.
    #[instrument(
        skip_all,
        fields(subject = %request.subject.to_subject(), bits = request.key_bits, days = request.days)
    )]
    pub async fn generate_self_signed_cert(&self, request: &CertRequest) -> Result<KeyAndCert> {
        let outputs = TempOutputs::allocate(&self.temp_dir, &["key", "pem"]).await?;
        let (key_path, cert_path) = (&outputs.paths()[0], &outputs.paths()[1]);
        let cmd = self.builder.generate_cert(request, key_path, cert_path)?;

        self.runner.run(&cmd).await?.into_success()?;

        let (key, cert) = read_pair(outputs).await?;
        let key = expect_pem(key, "private key", is_private_key_label)?;
        let cert = expect_pem(cert, "certificate", |l| l == "CERTIFICATE")?;
        info!("key and self-signed certificate generated");
        Ok(KeyAndCert { key, cert })
    }

    /// Writes a PKCS#12 bundle to `request.output`.
    #[instrument(skip_all, fields(output = %request.output.display()))]
    pub async fn export_pkcs12(&self, request: &P12Request) -> Result<Exported> {
        let cmd = self.builder.export_pkcs12(request)?;
        self.runner.run(&cmd).await?.into_success()?;

        let exported = Exported {
            destination: request.output.clone(),
        };
        info!("pkcs12 bundle exported");
        Ok(exported)
    }

    /// Renders `text` as a human-readable description.
    ///
    /// Never fails: unrecognized text yields [`NOT_AVAILABLE`] and a tool
    /// failure is described in the returned text. Blocks until the tool
    /// exits.
    pub fn render_preview(&self, text: &str) -> String {
        let text = text.trim();
        let Some(kind) = DocumentKind::detect(text) else {
            debug!("no previewable PEM header");
            return NOT_AVAILABLE.to_string();
        };

        let cmd = self.builder.preview(kind, text);
        match self
            .runner
            .run_blocking(&cmd)
            .and_then(|output| output.into_success())
        {
            Ok(output) => output.stdout,
            Err(e) => {
                warn!(?kind, error = %e, "preview failed");
                format!("Preview failed: {e}")
            }
        }
    }
}

async fn read_pair(outputs: TempOutputs) -> Result<(String, String)> {
    let mut contents = outputs.read_all().await?.into_iter();
    match (contents.next(), contents.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(OpensslError::ExecutionFailed(
            "expected two generated files".to_string(),
        )),
    }
}
