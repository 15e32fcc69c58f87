use crate::{
    client::{Client, Request, Response},
    error::Error,
};

use super::{ApiBase, Lookup, Outcome, PasswordStatus, Query};

/// Performs a single GET on behalf of the dispatcher.
pub trait Transport {
    fn get(&self, request: Request) -> Result<Response, Error>;
}

impl Transport for Client {
    fn get(&self, request: Request) -> Result<Response, Error> {
        self.fetch(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: Request) -> Result<Response, Error> {
        (**self).get(request)
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher<T: Transport> {
    transport: T,
    base: ApiBase,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, base: ApiBase) -> Self {
        Self { transport, base }
    }

    /// Runs `query` with exactly one request. Failures are folded into the
    /// returned [`Outcome`]; nothing is retried.
    pub fn execute(&self, query: &Query) -> Outcome {
        let mode = query.mode();
        let span = tracing::info_span!("dispatch", %mode);
        let _guard = span.enter();

        let mut request = Request::new(query.resolve_endpoint(&self.base));
        request.set_sensitive(query.is_sensitive());

        let result = self.transport.get(request);

        match query {
            Query::PwnedPasswords { .. } => Outcome::Password(interpret_password(result)),
            _ => Outcome::Data(interpret_data(result)),
        }
    }
}

fn interpret_data(result: Result<Response, Error>) -> Lookup {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(?error, "request failed");
            return Lookup::TransportError(error.to_string());
        }
    };

    let header = response.header();

    if header.status_code == 404 {
        Lookup::NotFound(header.status_line())
    } else if !header.is_success() {
        Lookup::TransportError(header.status_line())
    } else {
        match response.json() {
            Ok(value) => Lookup::Found(value),
            Err(error) => {
                tracing::debug!(?error, "response body rejected");
                Lookup::TransportError(error.to_string())
            }
        }
    }
}

fn interpret_password(result: Result<Response, Error>) -> PasswordStatus {
    match result {
        Ok(response) => PasswordStatus::from_status_code(response.status_code()),
        Err(error) => {
            tracing::debug!(?error, "request failed");
            PasswordStatus::Failed(error.to_string())
        }
    }
}
