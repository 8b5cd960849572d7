//! Cookie storage
//!
//! In-memory cookie jar backing `document.cookie`. Nothing is written to
//! disk: cookies live as long as the jar.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use url::Url;

/// A browser cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub expires: Option<u64>, // Unix timestamp
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Lax,
    Strict,
    None,
}

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl Cookie {
    /// Create a new session cookie
    pub fn new(name: &str, value: &str, domain: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::Lax,
        }
    }

    /// Check if cookie is expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }

    /// Check if cookie is expired at the given Unix time
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    /// Check if cookie matches a URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !self.domain_matches(host) {
            return false;
        }

        if !url.path().starts_with(&self.path) && !self.path.is_empty() {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        true
    }

    fn domain_matches(&self, host: &str) -> bool {
        match self.domain.strip_prefix('.') {
            Some(suffix) => host == suffix || host.ends_with(&format!(".{suffix}")),
            None => host.eq_ignore_ascii_case(&self.domain),
        }
    }

    /// Parse a `Set-Cookie` header or `document.cookie` assignment
    pub fn parse(header: &str, default_domain: &str) -> Option<Self> {
        Self::parse_at(header, default_domain, unix_now())
    }

    /// Parse relative to the given Unix time (for `max-age`)
    pub fn parse_at(header: &str, default_domain: &str, now: u64) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name, value.trim(), default_domain);

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let val = val.trim();
                match attr.trim().to_ascii_lowercase().as_str() {
                    "domain" => cookie.domain = val.to_string(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        // max-age wins over expires
                        if let Some(ts) = parse_http_date(val) {
                            cookie.expires.get_or_insert(ts);
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(if secs <= 0 {
                                0
                            } else {
                                now.saturating_add(secs as u64)
                            });
                        }
                    }
                    "samesite" => {
                        cookie.same_site = match val.to_ascii_lowercase().as_str() {
                            "strict" => SameSite::Strict,
                            "none" => SameSite::None,
                            _ => SameSite::Lax,
                        };
                    }
                    _ => {}
                }
            } else {
                match part.to_ascii_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Serialize to Cookie header format
    pub fn to_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

}

// ----------------------------------------------------------------------------
// HTTP dates
// ----------------------------------------------------------------------------

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Format a Unix time as an IMF-fixdate (`Thu, 01 Jan 1970 00:00:00 GMT`)
pub fn http_date(secs: u64) -> String {
    let secs = secs as i64;
    let days = secs.div_euclid(86_400);
    let rem = secs.rem_euclid(86_400);
    let (year, month, day) = civil_from_days(days);
    let weekday = WEEKDAYS[(days + 4).rem_euclid(7) as usize];
    format!(
        "{}, {:02} {} {} {:02}:{:02}:{:02} GMT",
        weekday,
        day,
        MONTHS[(month - 1) as usize],
        year,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Parse an HTTP date (`Wed, 21 Oct 2015 07:28:00 GMT` or
/// `Wednesday, 21-Oct-15 07:28:00 GMT`). Dates before 1970 clamp to 0.
pub fn parse_http_date(s: &str) -> Option<u64> {
    let s = s.trim();
    let rest = s.split_once(',').map_or(s, |(_, r)| r).trim();
    let mut fields: Vec<&str> = Vec::new();
    for field in rest.split_whitespace() {
        if fields.is_empty() && field.contains('-') {
            fields.extend(field.split('-'));
        } else {
            fields.push(field);
        }
    }
    let [day, month, year, time, ..] = fields.as_slice() else {
        return None;
    };

    let day: i64 = day.parse().ok()?;
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))? as i64
        + 1;
    let mut year: i64 = year.parse().ok()?;
    if year < 100 {
        year += if year < 70 { 2000 } else { 1900 };
    }

    let mut hms = time.split(':').map(|p| p.parse::<i64>().ok());
    let (h, m, sec) = (hms.next()??, hms.next()??, hms.next()??);
    if !(1..=31).contains(&day) || h > 23 || m > 59 || sec > 60 {
        return None;
    }

    let ts = days_from_civil(year, month, day) * 86_400 + h * 3600 + m * 60 + sec;
    Some(ts.max(0) as u64)
}

// ----------------------------------------------------------------------------
// Cookie jar
// ----------------------------------------------------------------------------

/// Cookie jar - stores and manages cookies
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    /// Cookies indexed by domain -> name
    cookies: BTreeMap<String, BTreeMap<String, Cookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie. An already expired cookie deletes any stored one.
    pub fn add(&mut self, cookie: Cookie) {
        if cookie.is_expired() {
            tracing::debug!(name = %cookie.name, "Removing expired cookie");
            self.remove(&cookie.domain, &cookie.name);
            return;
        }

        self.cookies
            .entry(cookie.domain.clone())
            .or_default()
            .insert(cookie.name.clone(), cookie);
    }

    /// Remove a cookie
    pub fn remove(&mut self, domain: &str, name: &str) {
        if let Some(domain_cookies) = self.cookies.get_mut(domain) {
            domain_cookies.remove(name);
        }
        self.cookies.retain(|_, v| !v.is_empty());
    }

    /// Get cookies for a URL
    pub fn get_for_url(&self, url: &Url) -> Vec<&Cookie> {
        self.cookies
            .values()
            .flat_map(|domain_cookies| domain_cookies.values())
            .filter(|c| c.matches(url) && !c.is_expired())
            .collect()
    }

    /// Look up one cookie visible to a URL
    pub fn get(&self, url: &Url, name: &str) -> Option<&Cookie> {
        self.get_for_url(url).into_iter().find(|c| c.name == name)
    }

    /// Build Cookie header for a request
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.get_for_url(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|c| c.to_header())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Apply a `document.cookie` assignment made by a page at `url`
    pub fn set_from_document(&mut self, url: &Url, assignment: &str) -> bool {
        let domain = url.host_str().unwrap_or("");
        match Cookie::parse(assignment, domain) {
            Some(cookie) if !cookie.http_only => {
                self.add(cookie);
                true
            }
            _ => false,
        }
    }

    /// Count cookies
    pub fn len(&self) -> usize {
        self.cookies.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parse() {
        let cookie = Cookie::parse("session=abc123; Path=/; Secure; HttpOnly", "example.com").unwrap();
        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert!(cookie.secure);
        assert!(cookie.http_only);
    }

    #[test]
    fn test_max_age() {
        let cookie = Cookie::parse_at("a=b; max-age=60", "example.com", 1_000).unwrap();
        assert_eq!(cookie.expires, Some(1_060));

        let cookie = Cookie::parse_at("a=b; max-age=0", "example.com", 1_000).unwrap();
        assert!(cookie.is_expired_at(1_000));
    }

    #[test]
    fn test_http_date_format() {
        assert_eq!(http_date(0), "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(http_date(1_445_412_480), "Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(http_date(951_782_400), "Tue, 29 Feb 2000 00:00:00 GMT");
    }

    #[test]
    fn test_http_date_parse() {
        assert_eq!(parse_http_date("Wed, 21 Oct 2015 07:28:00 GMT"), Some(1_445_412_480));
        assert_eq!(parse_http_date("Wednesday, 21-Oct-15 07:28:00 GMT"), Some(1_445_412_480));
        assert_eq!(parse_http_date("Thu, 01 Jan 1960 00:00:00 GMT"), Some(0));
        assert_eq!(parse_http_date("not a date"), None);
    }

    #[test]
    fn test_cookie_jar() {
        let mut jar = CookieJar::new();
        let cookie = Cookie::new("test", "value", "example.com");
        jar.add(cookie);

        let url = Url::parse("https://example.com/page").unwrap();
        let cookies = jar.get_for_url(&url);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "test");
        assert_eq!(jar.cookie_header(&url).as_deref(), Some("test=value"));
    }

    #[test]
    fn test_expired_assignment_deletes() {
        let url = Url::parse("http://example.com/").unwrap();
        let mut jar = CookieJar::new();
        assert!(jar.set_from_document(&url, "k=v; path=/"));
        assert_eq!(jar.len(), 1);

        assert!(jar.set_from_document(&url, "k=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/"));
        assert!(jar.is_empty());
    }

    #[test]
    fn test_wildcard_domain() {
        let cookie = Cookie::parse("a=b; domain=.example.com", "example.com").unwrap();
        assert!(cookie.matches(&Url::parse("http://www.example.com/").unwrap()));
        assert!(cookie.matches(&Url::parse("http://example.com/").unwrap()));
        assert!(!cookie.matches(&Url::parse("http://badexample.com/").unwrap()));
    }
}
