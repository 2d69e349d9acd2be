//! HTTP method types.

use std::str::FromStr;

use derive_more::Display;

/// HTTP request method accepted by the B2BRouter API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Returns `true` if parameters travel in the query string for this method.
    ///
    /// GET and DELETE never send a body; every other method sends its
    /// parameters as a JSON body.
    #[must_use]
    pub const fn uses_query_params(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl FromStr for Method {
    type Err = crate::Error;

    /// Parses a verb case-insensitively (`"get"`, `"Get"` and `"GET"` are equal).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(crate::Error::validation(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}
