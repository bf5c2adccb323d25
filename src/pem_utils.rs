use crate::error::{OpensslError, Result};

/// Label of the first PEM block in `text`, e.g. `CERTIFICATE`.
pub fn pem_label(text: &str) -> Option<String> {
    pem::parse(text).ok().map(|p| p.tag().to_string())
}

/// Private keys come out as `PRIVATE KEY`, `RSA PRIVATE KEY` or
/// `DSA PRIVATE KEY` depending on the tool version.
pub fn is_private_key_label(label: &str) -> bool {
    label.ends_with("PRIVATE KEY")
}

/// Ensure generated `text` starts with a PEM block whose label satisfies
/// `accept`. `what` names the artifact in the error.
pub fn expect_pem(text: String, what: &str, accept: impl Fn(&str) -> bool) -> Result<String> {
    match pem_label(&text) {
        Some(label) if accept(&label) => Ok(text),
        Some(label) => Err(OpensslError::ExecutionFailed(format!(
            "expected a {what}, got a PEM block labelled {label}"
        ))),
        None => Err(OpensslError::ExecutionFailed(format!(
            "no PEM-encoded {what} was produced"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CERT: &str = "-----BEGIN CERTIFICATE-----\nAAEC\n-----END CERTIFICATE-----\n";

    #[test]
    fn reads_first_label() {
        assert_eq!(pem_label(CERT).as_deref(), Some("CERTIFICATE"));
        assert_eq!(pem_label("not pem"), None);
    }

    #[test]
    fn accepts_matching_label() {
        let text = expect_pem(CERT.to_string(), "certificate", |l| l == "CERTIFICATE").unwrap();
        assert_eq!(text, CERT);
    }

    #[test]
    fn rejects_other_labels_and_empty_output() {
        let err = expect_pem(CERT.to_string(), "private key", is_private_key_label).unwrap_err();
        assert!(err.to_string().contains("labelled CERTIFICATE"));

        let err = expect_pem(String::new(), "private key", is_private_key_label).unwrap_err();
        assert!(matches!(err, OpensslError::ExecutionFailed(_)));
    }

    #[test]
    fn private_key_labels() {
        assert!(is_private_key_label("PRIVATE KEY"));
        assert!(is_private_key_label("RSA PRIVATE KEY"));
        assert!(is_private_key_label("DSA PRIVATE KEY"));
        assert!(!is_private_key_label("PUBLIC KEY"));
    }
}
