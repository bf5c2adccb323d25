//! # opensslutils - Drive the openssl command-line tool from Rust
//!
//! opensslutils is a thin integration layer between an interactive host (an
//! editor, a desktop app, a CLI) and the `openssl` executable. All
//! cryptographic work happens in the external tool; this crate builds its
//! argument vectors from typed requests, runs it as a child process, manages
//! the temporary files it writes, and turns the outcome into a typed result
//! or an error with a message fit for the user.
//!
//! ## Operations
//!
//! - **Convert**: DER to PEM and PEM to DER, written next to the source file
//! - **Private keys**: RSA or DSA of a chosen size, returned as PEM text
//! - **Certificate signing requests**: a new RSA key plus a CSR
//! - **Self-signed certificates**: a new RSA key plus a certificate
//! - **PKCS#12 export**: key, certificate and optional chain in one bundle
//! - **Preview**: `openssl ... -text` rendering of certificates, requests
//!   and keys
//!
//! ## Quick Start
//!
//! ### Generating a Self-Signed Certificate
//!
//! ```rust,no_run
//! use opensslutils::{
//!     config::OpensslConfig,
//!     openssl::OpenSsl,
//!     request::{CertRequest, DistinguishedName, HashAlgorithm},
//! };
//!
//! # async fn run() -> Result<(), opensslutils::error::OpensslError> {
//! let openssl = OpenSsl::new(&OpensslConfig::load()?);
//!
//! let subject = DistinguishedName::builder()
//!     .common_name("example.com".to_string())
//!     .country("US".to_string())
//!     .organization("Example Corp".to_string())
//!     .build();
//!
//! let request = CertRequest::builder()
//!     .subject(subject)
//!     .key_bits(2048)
//!     .days(365)
//!     .hash(HashAlgorithm::Sha256)
//!     .build();
//!
//! let generated = openssl.generate_self_signed_cert(&request).await?;
//! println!("{}\n{}", generated.key, generated.cert);
//! # Ok(())
//! # }
//! ```
//!
//! ### Converting a Certificate
//!
//! ```rust,no_run
//! use opensslutils::{config::OpensslConfig, convert::{CertFormat, ConversionRequest}, openssl::OpenSsl};
//!
//! # async fn run() -> Result<(), opensslutils::error::OpensslError> {
//! let openssl = OpenSsl::new(&OpensslConfig::default());
//! let converted = openssl
//!     .convert(&ConversionRequest::new("/data/cert.crt", CertFormat::Pem))
//!     .await?;
//! assert_eq!(converted.destination, std::path::Path::new("/data/cert.pem"));
//! println!("{}", converted.message());
//! # Ok(())
//! # }
//! ```
//!
//! ### Previewing PEM Text
//!
//! ```rust,no_run
//! use opensslutils::{config::OpensslConfig, openssl::OpenSsl, preview::NOT_AVAILABLE};
//!
//! let openssl = OpenSsl::new(&OpensslConfig::default());
//! assert_eq!(openssl.render_preview("just some notes"), NOT_AVAILABLE);
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`error::OpensslError`]:
//!
//! ```rust
//! use opensslutils::{error::OpensslError, path::{PathAdapter, PathMode}};
//!
//! let adapter = PathAdapter::new(PathMode::Wsl);
//! match adapter.adapt(std::path::Path::new("/no/drive/letter")) {
//!     Ok(path) => println!("adapted: {}", path),
//!     Err(OpensslError::InvalidPath(msg)) => println!("rejected: {}", msg),
//!     Err(e) => println!("other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`openssl`]: The caller-facing operations
//! - [`request`]: Typed requests and subject string assembly
//! - [`convert`]: Conversion formats and destination naming
//! - [`command`]: Argument vectors for each operation
//! - [`process`]: Running the tool, asynchronously or blocking
//! - [`temp`]: Temporary output files with guaranteed cleanup
//! - [`path`]: Path spelling for the tool, including WSL drive mounts
//! - [`preview`]: PEM header detection for previews
//! - [`config`]: Settings from defaults, YAML and the environment
//! - [`error`]: Error types

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod openssl;
pub mod path;
pub mod pem_utils;
pub mod preview;
pub mod process;
pub mod request;
pub mod temp;
