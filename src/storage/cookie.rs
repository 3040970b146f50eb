//! Cookie assignment and lookup helpers

use std::fmt;

/// `SameSite` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// A `document.cookie` assignment
///
/// Renders as `name=value; Max-Age=N; Path=/; SameSite=Lax`. The value is
/// percent-encoded so it reads back unchanged through [`read_cookie`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub max_age_secs: u64,
    pub path: String,
    pub same_site: SameSite,
}

impl SetCookie {
    /// Root-path, `SameSite=Lax` cookie
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V, max_age_secs: u64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age_secs,
            path: "/".to_string(),
            same_site: SameSite::Lax,
        }
    }

    /// Assignment that deletes the cookie
    pub fn expire<N: Into<String>>(name: N) -> Self {
        Self::new(name, "", 0)
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Max-Age={}; Path={}; SameSite={}",
            self.name,
            urlencoding::encode(&self.value),
            self.max_age_secs,
            self.path,
            self.same_site
        )
    }
}

/// Find `name` in a `document.cookie` header and percent-decode its value
///
/// Matches only at the start of the header or after `"; "`. A value that
/// does not decode to UTF-8 is treated as missing.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    header.split("; ").find_map(|pair| {
        let raw = pair.strip_prefix(name)?.strip_prefix('=')?;
        let raw = raw.split(';').next().unwrap_or_default();
        urlencoding::decode(raw).ok().map(|v| v.into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cookie_display() {
        let cookie = SetCookie::new("install_id", "11111111-1111-4111-8111-111111111111", 34_560_000);
        assert_eq!(
            cookie.to_string(),
            "install_id=11111111-1111-4111-8111-111111111111; Max-Age=34560000; Path=/; SameSite=Lax"
        );
    }

    #[test]
    fn test_set_cookie_encodes_value() {
        let cookie = SetCookie::new("k", "a b;c", 10);
        assert_eq!(cookie.to_string(), "k=a%20b%3Bc; Max-Age=10; Path=/; SameSite=Lax");
        assert_eq!(SetCookie::expire("k").to_string(), "k=; Max-Age=0; Path=/; SameSite=Lax");
    }

    #[test]
    fn test_read_cookie() {
        let header = "theme=dark; install_id=abc%2D123; x_install_id=other";
        assert_eq!(read_cookie(header, "install_id").as_deref(), Some("abc-123"));
        assert_eq!(read_cookie(header, "theme").as_deref(), Some("dark"));
        assert_eq!(read_cookie(header, "missing"), None);
        assert_eq!(read_cookie("", "install_id"), None);
    }

    #[test]
    fn test_read_cookie_requires_exact_name() {
        assert_eq!(read_cookie("x_install_id=other", "install_id"), None);
        assert_eq!(read_cookie("install_idx=other", "install_id"), None);
        assert_eq!(read_cookie("install_id=", "install_id").as_deref(), Some(""));
    }

    #[test]
    fn test_read_cookie_invalid_encoding() {
        assert_eq!(read_cookie("install_id=%FF", "install_id"), None);
    }
}
