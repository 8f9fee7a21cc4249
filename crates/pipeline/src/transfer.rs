//! Delivery of staged artifacts to the transfer destination.

use std::fs::File;
use std::path::Path;

use suppaftp::native_tls::TlsConnector;
use suppaftp::{NativeTlsConnector, NativeTlsFtpStream};

use crate::error::{PipelineError, SourceError};

/// Endpoint and credentials for the transfer destination.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl TransferConfig {
    /// Read `FTPHOST`, `FTPPORT`, `FTPUSER` and `FTPPASS` from the
    /// environment. All four are required; a missing one is fatal at
    /// startup.
    pub fn from_env() -> Result<Self, PipelineError> {
        let port_raw = require("FTPPORT")?;
        let port = port_raw.parse::<u16>().map_err(|_| {
            PipelineError::TransferConfig(format!("FTPPORT is not a port number: {port_raw}"))
        })?;

        Ok(Self {
            host: require("FTPHOST")?,
            port,
            user: require("FTPUSER")?,
            password: require("FTPPASS")?,
        })
    }
}

fn require(key: &str) -> Result<String, PipelineError> {
    std::env::var(key).map_err(|_| {
        PipelineError::TransferConfig(format!("missing required environment variable {key}"))
    })
}

/// Uploads one staged artifact.
pub trait TransferClient {
    fn upload(&mut self, remote_name: &str, local: &Path) -> Result<(), SourceError>;
}

/// FTPS transfer: explicit TLS upgrade, then authenticated session.
/// One session serves the whole run.
pub struct FtpsTransfer {
    stream: NativeTlsFtpStream,
}

impl FtpsTransfer {
    pub fn connect(config: &TransferConfig) -> Result<Self, PipelineError> {
        let stream = NativeTlsFtpStream::connect((config.host.as_str(), config.port))
            .map_err(|e| PipelineError::Connect(e.to_string()))?;
        let connector = TlsConnector::new().map_err(|e| PipelineError::Connect(e.to_string()))?;
        let mut stream = stream
            .into_secure(NativeTlsConnector::from(connector), &config.host)
            .map_err(|e| PipelineError::Connect(e.to_string()))?;
        stream
            .login(&config.user, &config.password)
            .map_err(|e| PipelineError::Connect(e.to_string()))?;
        Ok(Self { stream })
    }
}

impl TransferClient for FtpsTransfer {
    fn upload(&mut self, remote_name: &str, local: &Path) -> Result<(), SourceError> {
        let mut file = File::open(local).map_err(|e| SourceError::Deliver(e.to_string()))?;
        self.stream
            .put_file(remote_name, &mut file)
            .map_err(|e| SourceError::Deliver(e.to_string()))?;
        Ok(())
    }
}
