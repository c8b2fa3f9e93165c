use {
    std::{fs::File, io::BufReader, path::Path},
    rustls::{Certificate, PrivateKey, ServerConfig},
    rustls_pemfile::{read_all, Item},
    crate::{cert::CertificatePair, error::TlsError},
};

#[inline]
fn open(path: &Path) -> Result::<BufReader::<File>, TlsError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TlsError::Read { path: path.to_owned(), source })
}

fn read_items(path: &Path) -> Result::<Vec::<Item>, TlsError> {
    read_all(&mut open(path)?).map_err(|source| TlsError::Read { path: path.to_owned(), source })
}

/// Builds the server side of the handshake from the PEM pair.
///
/// The first PKCS#8, RSA, or SEC1 key in the key file wins.
pub fn load_server_config(pair: &CertificatePair) -> Result::<ServerConfig, TlsError> {
    let cert_chain = read_items(&pair.cert)?
        .into_iter()
        .filter_map(|item| match item {
            Item::X509Certificate(der) => Some(Certificate(der)),
            _ => None,
        })
        .collect::<Vec::<_>>();

    if cert_chain.is_empty() {
        return Err(TlsError::NoCertificates(pair.cert.clone()))
    }

    let key = read_items(&pair.key)?
        .into_iter()
        .find_map(|item| match item {
            Item::PKCS8Key(der) | Item::RSAKey(der) | Item::ECKey(der) => Some(PrivateKey(der)),
            _ => None,
        })
        .ok_or_else(|| TlsError::NoPrivateKey(pair.key.clone()))?;

    let cfg = ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth()
        .with_single_cert(cert_chain, key)?;

    Ok(cfg)
}
