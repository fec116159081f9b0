//! TLS connector selection for the probe.
//!
//! [`TlsMode::Insecure`] installs [`AcceptAnyServerCert`], which skips
//! certificate chain and hostname checks. It exists for the local
//! development server and its self-signed certificate and must never be
//! pointed at a real deployment. Handshake signatures are still verified
//! so the peer has to own the key of the certificate it presents.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use tokio_tungstenite::Connector;

use crate::config::TlsMode;
use crate::error::ProbeError;

/// Certificate verifier that trusts every server certificate.
#[derive(Debug)]
pub struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl AcceptAnyServerCert {
    /// Creates a verifier that checks handshake signatures with `provider`.
    #[must_use]
    pub const fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Installs the `ring` provider as the process default.
///
/// tokio-tungstenite builds its own rustls config for verified
/// connections and needs a default provider to do so.
pub fn ensure_crypto_provider() {
    // Err means a provider is already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Builds a client config that skips certificate verification.
///
/// # Errors
///
/// Returns [`ProbeError::Tls`] if the provider supports no safe protocol
/// version.
pub fn insecure_client_config() -> Result<ClientConfig, ProbeError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert::new(provider)))
        .with_no_client_auth();
    Ok(config)
}

/// Returns the connector to hand to tokio-tungstenite for `mode`.
///
/// `None` lets tokio-tungstenite verify against the webpki roots. The
/// connector is ignored for `ws://` URLs.
///
/// # Errors
///
/// Propagates [`insecure_client_config`] failures.
pub fn connector_for(mode: TlsMode) -> Result<Option<Connector>, ProbeError> {
    ensure_crypto_provider();
    match mode {
        TlsMode::Verify => Ok(None),
        TlsMode::Insecure => {
            tracing::warn!("TLS certificate verification is disabled (testing only)");
            Ok(Some(Connector::Rustls(Arc::new(insecure_client_config()?))))
        }
    }
}
