//! VPN status source.
//!
//! Looks up the public address of this host twice, once directly and once
//! through the configured proxy. Different addresses mean traffic through the
//! proxy leaves via a tunnel. This is a heuristic: an address change between
//! the two requests also reads as active.

use crate::config::HttpConfig;
use crate::{CustomDataSource, Result, SensorError};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, error};

const ACTIVE: &str = ":)";
const INACTIVE: &str = ":(";

/// Looks up the public address seen by a remote endpoint.
pub trait OriginLookup: Send {
    /// Address seen for a direct request.
    fn direct(&self) -> Result<String>;

    /// Address seen for a request through the proxy.
    fn proxied(&self) -> Result<String>;
}

#[derive(Deserialize)]
struct OriginBody {
    origin: String,
}

/// Origin lookup against an httpbin-style `/ip` endpoint.
pub struct HttpOriginLookup {
    url: String,
    direct: Client,
    proxied: Option<Client>,
}

impl HttpOriginLookup {
    /// Builds the direct and proxied clients. Fails on an invalid proxy URL.
    pub fn new(http: &HttpConfig, proxy: Option<&str>) -> Result<Self> {
        let direct = Client::builder()
            .timeout(http.timeout())
            .no_proxy()
            .build()?;
        let proxied = proxy
            .map(|url| {
                Client::builder()
                    .timeout(http.timeout())
                    .proxy(reqwest::Proxy::all(url)?)
                    .build()
            })
            .transpose()?;

        Ok(Self {
            url: http.lookup_url.clone(),
            direct,
            proxied,
        })
    }

    fn fetch(&self, client: &Client) -> Result<String> {
        let body = client.get(&self.url).send()?.error_for_status()?.text()?;
        let body: OriginBody = serde_json::from_str(&body)?;
        Ok(body.origin)
    }
}

impl OriginLookup for HttpOriginLookup {
    fn direct(&self) -> Result<String> {
        self.fetch(&self.direct)
    }

    fn proxied(&self) -> Result<String> {
        let client = self.proxied.as_ref().ok_or(SensorError::MissingProxy)?;
        self.fetch(client)
    }
}

/// Shows whether traffic through the proxy goes out a different address.
pub struct VpnStatus {
    lookup: Box<dyn OriginLookup>,
    active: bool,
}

impl VpnStatus {
    pub fn new(lookup: Box<dyn OriginLookup>) -> Self {
        Self {
            lookup,
            active: false,
        }
    }

    /// Returns the last computed status.
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn check(&self) -> Result<bool> {
        let direct = self.lookup.direct()?;
        debug!("IP: {}", direct);
        let proxied = self.lookup.proxied()?;
        debug!("IP through proxy: {}", proxied);

        Ok(!direct.is_empty() && !proxied.is_empty() && direct != proxied)
    }
}

impl CustomDataSource for VpnStatus {
    fn name(&self) -> &str {
        "vpn_status"
    }

    fn as_numeric(&mut self) -> Result<Option<f64>> {
        self.active = self.check().unwrap_or_else(|e| {
            error!("VPN status check failed: {}", e);
            false
        });
        Ok(Some(if self.active { 1.0 } else { 0.0 }))
    }

    fn as_string(&self) -> String {
        let glyph = if self.active { ACTIVE } else { INACTIVE };
        glyph.to_string()
    }

    fn last_values(&self) -> Option<&[f64]> {
        None
    }
}
