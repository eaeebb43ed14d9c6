//! Netscape cookie files (the `cookies.txt` format browser extensions export).

use reqwest::cookie::Jar;
use std::path::Path;
use url::Url;

use crate::error::{Error, Result};

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// One cookie line from a Netscape cookie file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetscapeCookie {
    pub domain: String,
    pub include_subdomains: bool,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub name: String,
    pub value: String,
    origin: Url,
}

impl NetscapeCookie {
    /// `Set-Cookie` header value for this cookie. Expiry is ignored, the
    /// same way exported sessions are normally replayed.
    pub fn set_cookie(&self) -> String {
        let mut header = format!("{}={}; Path={}", self.name, self.value, self.path);
        if self.include_subdomains {
            header.push_str(&format!("; Domain={}", self.domain.trim_start_matches('.')));
        }
        if self.secure {
            header.push_str("; Secure");
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        header
    }

    /// URL the cookie is registered against.
    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

fn parse_flag(field: &str) -> Option<bool> {
    match field.trim() {
        f if f.eq_ignore_ascii_case("TRUE") => Some(true),
        f if f.eq_ignore_ascii_case("FALSE") => Some(false),
        _ => None,
    }
}

fn parse_line(line: &str) -> Option<NetscapeCookie> {
    let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
        Some(rest) => (rest, true),
        None => (line, false),
    };

    let fields: Vec<&str> = line.splitn(7, '\t').collect();
    let [domain, subdomains, path, secure, _expires, name, value] = fields.as_slice() else {
        return None;
    };
    if domain.is_empty() || name.is_empty() {
        return None;
    }

    let host = domain.trim_start_matches('.');
    let path = if path.is_empty() { "/" } else { *path };
    let origin = Url::parse(&format!("https://{host}{path}")).ok()?;

    Some(NetscapeCookie {
        domain: domain.to_string(),
        include_subdomains: parse_flag(subdomains)?,
        path: path.to_string(),
        secure: parse_flag(secure)?,
        http_only,
        name: name.to_string(),
        value: value.to_string(),
        origin,
    })
}

/// Parse cookie file text; comments and blank lines are skipped.
pub fn parse_cookie_file(text: &str, path: &Path) -> Result<Vec<NetscapeCookie>> {
    let mut cookies = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || (line.starts_with('#') && !line.starts_with(HTTP_ONLY_PREFIX))
        {
            continue;
        }
        let cookie = parse_line(line).ok_or_else(|| Error::Cookies {
            path: path.to_path_buf(),
            line: idx + 1,
        })?;
        cookies.push(cookie);
    }
    Ok(cookies)
}

/// Load a cookie jar from a Netscape cookie file.
pub fn load_cookies(path: &Path) -> Result<Jar> {
    let text = std::fs::read_to_string(path)?;
    let cookies = parse_cookie_file(&text, path)?;
    let jar = Jar::default();
    for cookie in &cookies {
        jar.add_cookie_str(&cookie.set_cookie(), cookie.origin());
    }
    tracing::debug!(path = %path.display(), count = cookies.len(), "loaded cookies");
    Ok(jar)
}
