use std::{fmt::Debug, sync::OnceLock};

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::{BoxedError, Error, ParseError},
    http::{HeaderFields, RequestHeader, ResponseHeader},
};

/// Lowest TLS protocol version a transfer may negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TlsVersion {
    Tls10,
    Tls11,
    #[default]
    Tls12,
    Tls13,
}

#[derive(Debug, Clone)]
pub struct Config {
    http_user_agent: String,
    http_headers: HeaderFields,
    http_compression: bool,
    tls_min_version: TlsVersion,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            http_user_agent: default_user_agent().to_string(),
            http_headers: Self::make_default_http_headers(),
            http_compression: false,
            tls_min_version: TlsVersion::default(),
        }
    }

    fn make_default_http_headers() -> HeaderFields {
        let mut fields = HeaderFields::new();

        for (name, value) in default_http_headers() {
            fields.append(*name, *value);
        }

        fields
    }

    pub fn http_user_agent(&self) -> &str {
        self.http_user_agent.as_ref()
    }

    /// An empty string disables the `User-Agent` header.
    pub fn set_http_user_agent<S: Into<String>>(&mut self, user_agent: S) -> &mut Self {
        self.http_user_agent = user_agent.into();
        self
    }

    pub fn http_headers(&self) -> &HeaderFields {
        &self.http_headers
    }

    pub fn http_compression(&self) -> bool {
        self.http_compression
    }

    pub fn set_http_compression(&mut self, enabled: bool) -> &mut Self {
        self.http_compression = enabled;
        self
    }

    pub fn tls_min_version(&self) -> TlsVersion {
        self.tls_min_version
    }

    pub fn set_tls_min_version(&mut self, version: TlsVersion) -> &mut Self {
        self.tls_min_version = version;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    sensitive: bool,
}

impl Request {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            sensitive: false,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether the URL carries a secret and must be kept out of logs.
    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    pub fn set_sensitive(&mut self, sensitive: bool) -> &mut Self {
        self.sensitive = sensitive;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    header: ResponseHeader,
    body: Vec<u8>,
}

impl Response {
    pub fn new(header: ResponseHeader, body: Vec<u8>) -> Self {
        Self { header, body }
    }

    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    pub fn status_code(&self) -> u16 {
        self.header.status_code
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|error| {
            ParseError::new("response body is not valid JSON")
                .with_source(Box::new(error))
                .into()
        })
    }
}

pub trait SessionControl: Debug {
    fn abort(&mut self);
}

pub trait SessionHandler {
    fn event(
        &mut self,
        control: &mut dyn SessionControl,
        event: SessionEvent,
    ) -> Result<(), BoxedError> {
        let _ = control;
        let _ = event;
        Ok(())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum SessionEvent<'a> {
    HeaderSent(&'a [u8]),
    HeaderReceived(&'a [u8]),
    HttpRequest(RequestHeader),
    HttpResponse(ResponseHeader),
    ContentReceived(&'a [u8]),
}

pub fn default_user_agent() -> &'static str {
    static DEFAULT_USER_AGENT: OnceLock<String> = OnceLock::new();

    DEFAULT_USER_AGENT.get_or_init(|| {
        let crate_version = crate::version::get_crate_version_mmp();
        let curl_version = curl::Version::get();

        format!(
            "breachcheck/{}.{} curl/{}.{}",
            crate_version.0,
            crate_version.1,
            (curl_version.version_num() >> 16) as u8,
            (curl_version.version_num() >> 8) as u8
        )
    })
}

pub fn default_http_headers() -> &'static [(&'static str, &'static str)] {
    &[("Accept", "application/json")]
}
