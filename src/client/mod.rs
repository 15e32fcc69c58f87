//! Blocking HTTP client built on libcurl.
//!
//! A [`Client`] runs one transfer per [`Request`]. Transfers report
//! progress to a [`SessionHandler`] as [`SessionEvent`]s; [`Client::fetch`]
//! uses a handler that collects the final response header and body.

mod common;
mod curl;

use std::{cell::RefCell, rc::Rc};

use crate::{
    error::{BoxedError, Error, ProtocolError},
    http::ResponseHeader,
    string::REDACTED,
};

use self::curl::CurlSession;

pub use common::*;

#[derive(Debug, Clone)]
pub struct Client {
    config: Rc<RefCell<Config>>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self {
            config: Rc::new(RefCell::new(config)),
        }
    }

    pub fn submit<H: SessionHandler>(&self, request: Request, handler: H) -> (H, Result<(), Error>) {
        let url = if request.is_sensitive() {
            REDACTED
        } else {
            request.url().as_str()
        };
        let span = tracing::info_span!("client session", url);
        let _guard = span.enter();

        let scheme = request.url().scheme();

        if scheme != "http" && scheme != "https" {
            return (
                handler,
                Err(Error::UnsupportedFeature {
                    feature: scheme.to_string(),
                }),
            );
        }

        tracing::debug!(scheme, "init session");

        CurlSession::new(self.config.clone(), request).run(handler)
    }

    /// Performs the request and returns the final response.
    pub fn fetch(&self, request: Request) -> Result<Response, Error> {
        let (collector, result) = self.submit(request, ResponseCollector::default());
        result?;
        collector.into_response()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[derive(Debug, Default)]
struct ResponseCollector {
    header: Option<ResponseHeader>,
    body: Vec<u8>,
}

impl ResponseCollector {
    fn into_response(self) -> Result<Response, Error> {
        match self.header {
            Some(header) => Ok(Response::new(header, self.body)),
            None => Err(ProtocolError::InvalidResponse("no HTTP response header received".into()).into()),
        }
    }
}

impl SessionHandler for ResponseCollector {
    fn event(
        &mut self,
        _control: &mut dyn SessionControl,
        event: SessionEvent,
    ) -> Result<(), BoxedError> {
        match event {
            SessionEvent::HttpResponse(header) => {
                // Proxy CONNECT responses come first; only the last one counts.
                self.header = Some(header);
                self.body.clear();
            }
            SessionEvent::ContentReceived(data) => self.body.extend_from_slice(data),
            _ => {}
        }

        Ok(())
    }
}
