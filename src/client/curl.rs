use std::{cell::RefCell, fmt::Debug, rc::Rc};

use curl::easy::{Easy, HttpVersion, InfoType, List, SslVersion, Transfer};

use crate::{
    error::{BoxedError, Error, OtherError},
    http::{RequestHeader, ResponseHeader},
    string::REDACTED,
};

use super::{Config, Request, SessionControl, SessionEvent, SessionHandler, TlsVersion};

impl From<TlsVersion> for SslVersion {
    fn from(value: TlsVersion) -> Self {
        match value {
            TlsVersion::Tls10 => SslVersion::Tlsv10,
            TlsVersion::Tls11 => SslVersion::Tlsv11,
            TlsVersion::Tls12 => SslVersion::Tlsv12,
            TlsVersion::Tls13 => SslVersion::Tlsv13,
        }
    }
}

pub struct CurlSession {
    config: Rc<RefCell<Config>>,
    request: Request,
    curl_handle: Easy,
}

impl CurlSession {
    pub fn new(config: Rc<RefCell<Config>>, request: Request) -> Self {
        Self {
            config,
            request,
            curl_handle: Easy::new(),
        }
    }

    pub fn run<H: SessionHandler>(mut self, handler: H) -> (H, Result<(), Error>) {
        if let Err(error) = self.set_up() {
            return (handler, Err(error));
        }

        self.perform_with_callbacks(handler)
    }

    fn set_up(&mut self) -> Result<(), Error> {
        let config = self.config.borrow();
        let curl_handle = &mut self.curl_handle;

        curl_handle.verbose(true)?;
        curl_handle.url(self.request.url().as_str())?;
        curl_handle.get(true)?;
        curl_handle.follow_location(false)?;
        curl_handle.http_version(HttpVersion::V11)?;
        curl_handle.ssl_verify_host(true)?;
        curl_handle.ssl_verify_peer(true)?;
        curl_handle.ssl_min_max_version(config.tls_min_version().into(), SslVersion::Default)?;

        if !config.http_user_agent().is_empty() {
            curl_handle.useragent(config.http_user_agent())?;
        }

        if config.http_compression() {
            curl_handle.accept_encoding("")?;
        }

        let mut header_list = List::new();

        for (name, value) in config.http_headers() {
            header_list.append(&format!("{}: {}", name, value))?;
        }

        curl_handle.http_headers(header_list)?;

        Ok(())
    }

    fn perform_with_callbacks<H: SessionHandler>(&mut self, mut handler: H) -> (H, Result<(), Error>) {
        let secret = if self.request.is_sensitive() {
            Some(self.request.url().path().to_string())
        } else {
            None
        };
        let callback_handler = CallbackHandler::new(&mut handler, secret);
        let callback_handler = Rc::new(RefCell::new(callback_handler));

        let result = {
            let mut curl_session = self.curl_handle.transfer();

            Self::set_up_callbacks(&mut curl_session, callback_handler.clone())
                .and_then(|_| curl_session.perform().map_err(Error::from))
        };

        let error = callback_handler.borrow_mut().error.take();
        drop(callback_handler);

        // A handler error aborts the transfer, so it takes precedence over
        // the write error libcurl reports for the abort.
        let result = match error {
            Some(error) => Err(Error::Other(OtherError::Custom(error))),
            None => result,
        };

        (handler, result)
    }

    fn set_up_callbacks<'a, 'h: 'a, C: SessionHandler + 'a>(
        curl_session: &mut Transfer<'_, 'a>,
        callback_handler: Rc<RefCell<CallbackHandler<'h, C>>>,
    ) -> Result<(), Error> {
        let debug_handler = callback_handler.clone();
        curl_session.debug_function(move |info_type, data| {
            debug_handler.borrow_mut().debug_function(info_type, data)
        })?;

        let header_handler = callback_handler.clone();
        curl_session.header_function(move |data| header_handler.borrow_mut().header_function(data))?;

        curl_session.write_function(move |data| callback_handler.borrow_mut().write_function(data))?;

        Ok(())
    }
}

impl Debug for CurlSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurlSession").field("...", &"...").finish()
    }
}

#[derive(Debug)]
pub struct CurlSessionControl {
    aborted: bool,
}

impl CurlSessionControl {
    fn new() -> Self {
        Self { aborted: false }
    }
}

impl SessionControl for CurlSessionControl {
    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallbackState {
    HttpRequest,
    HttpResponse,
    Content,
}

struct CallbackHandler<'h, H: SessionHandler> {
    handler: &'h mut H,
    control: CurlSessionControl,
    state: CallbackState,
    error: Option<BoxedError>,
    secret: Option<String>,
    receive_buf: Vec<u8>,
    send_buf: Vec<u8>,
}

impl<'h, H: SessionHandler> CallbackHandler<'h, H> {
    /// `secret` is masked out of everything logged.
    fn new(handler: &'h mut H, secret: Option<String>) -> Self {
        Self {
            handler,
            control: CurlSessionControl::new(),
            state: CallbackState::HttpRequest,
            error: None,
            secret,
            receive_buf: Vec::new(),
            send_buf: Vec::new(),
        }
    }

    fn record_error(&mut self, result: Result<(), BoxedError>) {
        if let Err(error) = result {
            self.error = Some(error);
            self.control.abort();
        }
    }

    fn debug_function(&mut self, info_type: InfoType, data: &[u8]) {
        if self.secret.is_some() {
            tracing::trace!(?info_type, len = data.len(), "debug");
        } else {
            tracing::trace!(?info_type, data = ?crate::string::preview_bytes(data, 100), "debug");
        }

        match info_type {
            InfoType::Text => {
                let mut text = String::from_utf8_lossy(data).trim_end().to_string();

                if let Some(secret) = &self.secret {
                    text = text.replace(secret.as_str(), REDACTED);
                }

                tracing::debug!(text = text.as_str(), "curl");
            }
            InfoType::HeaderOut => {
                let result = self.handle_send_header(data);
                self.record_error(result);
            }
            _ => {}
        }
    }

    fn header_function(&mut self, data: &[u8]) -> bool {
        tracing::trace!(data = ?String::from_utf8_lossy(data), "header");

        let result = self.handle_receive_header(data);
        self.record_error(result);

        !self.control.aborted
    }

    fn write_function(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        tracing::trace!(len = data.len(), "write");

        self.state = CallbackState::Content;

        let event = SessionEvent::ContentReceived(data);
        let result = self.handler.event(&mut self.control, event);
        self.record_error(result);

        if self.control.aborted {
            Ok(0)
        } else {
            Ok(data.len())
        }
    }

    fn handle_send_header(&mut self, data: &[u8]) -> Result<(), BoxedError> {
        let event = SessionEvent::HeaderSent(data);
        self.handler.event(&mut self.control, event)?;

        if self.state == CallbackState::HttpRequest {
            self.send_buf.extend_from_slice(data);

            if let Some(_index) = crate::http::scan_header_boundary(&self.send_buf) {
                let header = RequestHeader::parse(&self.send_buf)?;
                let uri = if self.secret.is_some() {
                    REDACTED
                } else {
                    header.uri.as_str()
                };
                tracing::info!(method = &header.method, uri, "http request");

                let event = SessionEvent::HttpRequest(header);
                self.handler.event(&mut self.control, event)?;

                self.send_buf.clear();
                self.state = CallbackState::HttpResponse;
            }
        }

        Ok(())
    }

    fn handle_receive_header(&mut self, data: &[u8]) -> Result<(), BoxedError> {
        // Trailers arrive after the content and are not interpreted.
        if self.state == CallbackState::Content {
            return Ok(());
        }

        let event = SessionEvent::HeaderReceived(data);
        self.handler.event(&mut self.control, event)?;

        self.receive_buf.extend_from_slice(data);

        if let Some(_index) = crate::http::scan_header_boundary(&self.receive_buf) {
            let header = ResponseHeader::parse(&self.receive_buf)?;
            self.receive_buf.clear();

            if header.is_informational() {
                tracing::debug!(status_code = header.status_code, "interim http response");
                return Ok(());
            }

            tracing::info!(
                status_code = header.status_code,
                reason_phrase = &header.reason_phrase,
                "http response"
            );

            let event = SessionEvent::HttpResponse(header);
            self.handler.event(&mut self.control, event)?;
        }

        Ok(())
    }
}
