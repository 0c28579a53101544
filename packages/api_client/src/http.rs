//! Requests and responses as plain data.
//!
//! `BiliApiClient` builds an [`HttpRequest`] for every call and hands it to a
//! [`BiliHttpClient`](crate::api::BiliHttpClient) which performs the round
//! trip and returns an [`HttpResponse`]. Keeping the request as data lets the
//! executor stay independent of reqwest and lets tests inspect exactly what
//! would have gone on the wire.

use std::fmt::{Debug, Formatter};

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    Multipart(FilePart),
}

#[derive(Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

impl Debug for FilePart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FilePart {{ field: {}, file_name: {}, data: <{} bytes> }}",
            self.field,
            self.file_name,
            self.data.len()
        )
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: &str) -> Self {
        HttpRequest {
            method,
            url: url.to_string(),
            query: Vec::new(),
            body: match method {
                HttpMethod::Get => RequestBody::Empty,
                HttpMethod::Post => RequestBody::Form(Vec::new()),
            },
        }
    }

    /// Builds a request whose parameters are placed by method: query string
    /// for GET, form body for POST.
    pub fn with_params<P: Serialize + ?Sized>(method: HttpMethod, url: &str, params: &P) -> Result<Self, serde_json::Error> {
        let mut request = HttpRequest::new(method, url);
        for (name, value) in to_pairs(params)? {
            request.add_param(name, value);
        }
        Ok(request)
    }

    /// Appends `params` to the query string whatever the method, for
    /// endpoints that take some fields in the URL of a POST.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, serde_json::Error> {
        self.query.extend(to_pairs(params)?);
        Ok(self)
    }

    /// Appends a parameter where this request carries its parameters.
    /// Multipart bodies keep their only field, so extra parameters go to the
    /// query string.
    pub fn add_param<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let pair = (name.into(), value.into());
        match &mut self.body {
            RequestBody::Form(form) => form.push(pair),
            RequestBody::Empty | RequestBody::Multipart(_) => self.query.push(pair),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        let body = match &self.body {
            RequestBody::Form(form) => form.as_slice(),
            _ => &[],
        };

        self.query
            .iter()
            .chain(body.iter())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Flattens a parameter struct into wire pairs.
///
/// Field names and omission come from the struct's serde attributes; unset
/// `Option`s marked `skip_serializing_if` never reach this point and `null`
/// values are dropped. Strings are sent verbatim, numbers and booleans as
/// text, nested arrays and objects as compact JSON.
pub fn to_pairs<P: Serialize + ?Sized>(params: &P) -> Result<Vec<(String, String)>, serde_json::Error> {
    let fields = match serde_json::to_value(params)? {
        Value::Null => return Ok(Vec::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "request parameters must be a struct or map, got {}",
                other
            )));
        }
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let value = match value {
            Value::Null => continue,
            Value::String(text) => text,
            Value::Bool(flag) => flag.to_string(),
            Value::Number(num) => num.to_string(),
            nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
        };
        pairs.push((name, value));
    }

    Ok(pairs)
}
