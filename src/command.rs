use std::fmt;
use std::path::Path;

use crate::convert::{CertFormat, ConversionRequest};
use crate::error::{OpensslError, Result};
use crate::path::PathAdapter;
use crate::preview::DocumentKind;
use crate::request::{CertRequest, CsrRequest, KeyAlgorithm, KeyGenRequest, P12Request};

/// Environment variable carrying the PKCS#12 export password to the child.
pub const P12_PASSWORD_ENV: &str = "OPENSSLUTILS_P12_PASS";

/// One invocation of the tool: its arguments, optional standard input and
/// extra environment. The arguments are passed as a vector, never through a
/// shell.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ToolCommand {
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub envs: Vec<(String, String)>,
}

impl ToolCommand {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// The sub-command, e.g. `req` or `x509`.
    pub fn verb(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// The value following `flag`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }
}

// Environment values are secrets; only their names are printed.
impl fmt::Debug for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_names: Vec<&str> = self.envs.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("ToolCommand")
            .field("args", &self.args)
            .field("stdin", &self.stdin.as_ref().map(|s| s.len()))
            .field("envs", &env_names)
            .finish()
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

/// Builds argument vectors for each request kind.
///
/// Every filesystem argument passes through the [`PathAdapter`]; every
/// textual field becomes its own argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandBuilder {
    adapter: PathAdapter,
}

impl CommandBuilder {
    pub fn new(adapter: PathAdapter) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &PathAdapter {
        &self.adapter
    }

    /// `x509 -in <src> -inform der -out <dst>` for PEM output,
    /// `x509 -in <src> -outform der -out <dst>` for DER output.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ToolCommand> {
        let source = self.path(&request.source)?;
        let destination = self.path(&request.destination())?;

        let mut cmd = ToolCommand::new(["x509", "-in"]);
        cmd.arg(source);
        match request.target {
            CertFormat::Pem => cmd.arg("-inform").arg("der"),
            CertFormat::Der => cmd.arg("-outform").arg("der"),
        };
        cmd.arg("-out").arg(destination);
        Ok(cmd)
    }

    /// Key material is written to standard output.
    pub fn generate_key(&self, request: &KeyGenRequest) -> Result<ToolCommand> {
        check_bits(request.bits)?;
        let mut cmd = match request.algorithm {
            KeyAlgorithm::Rsa => ToolCommand::new(["genrsa"]),
            KeyAlgorithm::Dsa => ToolCommand::new(["dsaparam", "-noout", "-genkey"]),
        };
        cmd.arg(request.bits.to_string());
        Ok(cmd)
    }

    pub fn generate_csr(
        &self,
        request: &CsrRequest,
        key_out: &Path,
        csr_out: &Path,
    ) -> Result<ToolCommand> {
        check_bits(request.key_bits)?;
        let subject = request.subject.to_subject();
        check_text("subject", &subject)?;

        let mut cmd = ToolCommand::new(["req", "-new", "-newkey"]);
        cmd.arg(format!("rsa:{}", request.key_bits))
            .arg("-nodes")
            .arg("-keyout")
            .arg(self.path(key_out)?)
            .arg("-out")
            .arg(self.path(csr_out)?)
            .arg("-subj")
            .arg(subject);
        Ok(cmd)
    }

    pub fn generate_cert(
        &self,
        request: &CertRequest,
        key_out: &Path,
        cert_out: &Path,
    ) -> Result<ToolCommand> {
        check_bits(request.key_bits)?;
        if request.days == 0 {
            return Err(OpensslError::InvalidInput(
                "validity must be at least one day".to_string(),
            ));
        }
        let subject = request.subject.to_subject();
        check_text("subject", &subject)?;

        let mut cmd = ToolCommand::new(["req", "-x509"]);
        cmd.arg(request.hash.flag())
            .arg("-days")
            .arg(request.days.to_string())
            .arg("-newkey")
            .arg(format!("rsa:{}", request.key_bits))
            .arg("-nodes")
            .arg("-keyout")
            .arg(self.path(key_out)?)
            .arg("-out")
            .arg(self.path(cert_out)?)
            .arg("-subj")
            .arg(subject);
        Ok(cmd)
    }

    /// The password travels in the child's environment, not on its
    /// command line.
    pub fn export_pkcs12(&self, request: &P12Request) -> Result<ToolCommand> {
        check_text("password", &request.password)?;

        let mut cmd = ToolCommand::new(["pkcs12", "-export", "-out"]);
        cmd.arg(self.path(&request.output)?)
            .arg("-inkey")
            .arg(self.path(&request.key)?)
            .arg("-in")
            .arg(self.path(&request.cert)?)
            .arg("-passout")
            .arg(format!("env:{P12_PASSWORD_ENV}"));

        if let Some(bundle) = request
            .bundle
            .as_deref()
            .filter(|b| !b.as_os_str().is_empty())
        {
            cmd.arg("-certfile").arg(self.path(bundle)?);
        }
        if let Some(alias) = request.alias.as_deref().filter(|a| !a.is_empty()) {
            check_text("alias", alias)?;
            cmd.arg("-name").arg(alias);
        }

        cmd.envs
            .push((P12_PASSWORD_ENV.to_string(), request.password.clone()));
        Ok(cmd)
    }

    /// Text rendering of `text`, which is fed on standard input.
    pub fn preview(&self, kind: DocumentKind, text: &str) -> ToolCommand {
        let args: &[&str] = match kind {
            DocumentKind::Certificate => &["x509", "-noout", "-text"],
            DocumentKind::CertificateRequest => &["req", "-noout", "-text"],
            DocumentKind::PrivateKey => &["pkey", "-noout", "-text"],
            DocumentKind::PublicKey => &["pkey", "-pubin", "-noout", "-text"],
        };
        let mut cmd = ToolCommand::new(args.iter().copied());
        cmd.stdin = Some(text.to_string());
        cmd
    }

    fn path(&self, path: &Path) -> Result<String> {
        let adapted = self.adapter.adapt(path)?;
        check_text("path", &adapted)?;
        Ok(adapted)
    }
}

fn check_bits(bits: u32) -> Result<()> {
    if bits == 0 {
        return Err(OpensslError::InvalidInput(
            "key length must be positive".to_string(),
        ));
    }
    Ok(())
}

// A NUL byte cannot be carried in an argument or environment value.
fn check_text(field: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(OpensslError::InvalidInput(format!(
            "{field} contains a NUL byte"
        )));
    }
    Ok(())
}
