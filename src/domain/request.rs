//! Descriptions of HTTP calls against the analysis backend.
//!
//! A [`RequestDescriptor`] is an immutable value built fresh for every
//! submission. It can only be created through [`RequestDescriptor::get`] and
//! [`RequestDescriptor::post`], which keeps the body present exactly when the
//! method is `POST`.

use std::fmt;

/// HTTP method used by a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP call to make: method, absolute URL and optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    url: String,
    body: Option<String>,
}

impl RequestDescriptor {
    /// Builds a body-less `GET` descriptor.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    /// Builds a `POST` descriptor carrying a JSON body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body.into()),
        }
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON body, present iff the method is `POST`.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
