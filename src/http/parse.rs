use crate::error::{Error, ParseError};

use super::{RequestHeader, ResponseHeader};

const MAX_HEADER_FIELDS: usize = 128;

pub fn scan_header_boundary(data: &[u8]) -> Option<usize> {
    let mut index = 0;

    for line in data.split_inclusive(|&v| v == b'\n') {
        index += line.len();

        if line.iter().all(|v| v.is_ascii_whitespace()) && line.ends_with(&[b'\n']) {
            return Some(index);
        }
    }

    None
}

pub(super) fn parse_request_header(data: &[u8]) -> Result<RequestHeader, Error> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_FIELDS];
    let mut request = httparse::Request::new(&mut headers);

    match request.parse(data) {
        Ok(httparse::Status::Complete(_)) => {
            let mut header = RequestHeader::new();
            header.method = request.method.unwrap_or_default().to_string();
            header.uri = request.path.unwrap_or_default().to_string();
            header.version = format!("HTTP/1.{}", request.version.unwrap_or(1));

            for field in request.headers.iter() {
                header
                    .fields
                    .append(field.name, String::from_utf8_lossy(field.value));
            }

            Ok(header)
        }
        Ok(httparse::Status::Partial) => {
            Err(ParseError::new("HTTP request header incomplete").into())
        }
        Err(error) => Err(ParseError::new("HTTP request header parse error")
            .with_source(Box::new(error))
            .into()),
    }
}

pub(super) fn parse_response_header(data: &[u8]) -> Result<ResponseHeader, Error> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_FIELDS];
    let mut response = httparse::Response::new(&mut headers);

    match response.parse(data) {
        Ok(httparse::Status::Complete(_)) => {
            let mut header = ResponseHeader::new();
            header.version = format!("HTTP/1.{}", response.version.unwrap_or(1));
            header.status_code = response.code.unwrap_or_default();
            header.reason_phrase = response.reason.unwrap_or_default().to_string();

            for field in response.headers.iter() {
                header
                    .fields
                    .append(field.name, String::from_utf8_lossy(field.value));
            }

            Ok(header)
        }
        Ok(httparse::Status::Partial) => {
            Err(ParseError::new("HTTP response header incomplete").into())
        }
        Err(error) => Err(ParseError::new("HTTP response header parse error")
            .with_source(Box::new(error))
            .into()),
    }
}
