//! Identity cookies shared between the login form and the upstream API.
//!
//! Each id is written under two casings because the backend normalises
//! cookie names inconsistently.

use axum::http::{header::COOKIE, HeaderMap};
use cookie::Cookie;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::CookieConfig;

pub const EMP_ID: &str = "EmpID";
pub const EMP_ID_LOWER: &str = "empid";
pub const COMPANY_ID: &str = "CompanyID";
pub const COMPANY_ID_LOWER: &str = "companyid";

/// Order in which identity cookies are forwarded upstream.
pub const IDENTITY_COOKIE_NAMES: [&str; 4] = [EMP_ID, EMP_ID_LOWER, COMPANY_ID, COMPANY_ID_LOWER];

/// Characters left as-is when forwarding values, the same set JavaScript's
/// `encodeURIComponent` leaves alone.
const COOKIE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the four cookies issued after a successful login.
pub fn identity_cookies(empid: &str, companyid: &str, config: &CookieConfig) -> Vec<Cookie<'static>> {
    IDENTITY_COOKIE_NAMES
        .iter()
        .map(|&name| {
            let value = match name {
                EMP_ID | EMP_ID_LOWER => empid,
                _ => companyid,
            };

            let mut builder = Cookie::build((name, value.to_owned()))
                .http_only(true)
                .path("/")
                .same_site(config.same_site.same_site())
                .secure(config.is_secure());

            if let Some(secs) = config.max_age_secs {
                builder = builder.max_age(time::Duration::seconds(secs));
            }

            builder.build()
        })
        .collect()
}

/// Identity cookies carried by one inbound request.
///
/// The first occurrence of a name wins. Values are stored percent-decoded with
/// surrounding double quotes removed; a value that does not decode to UTF-8
/// is kept raw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityCookies {
    values: [Option<String>; 4],
}

impl IdentityCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut values: [Option<String>; 4] = Default::default();

        for header in headers.get_all(COOKIE) {
            let Ok(header) = header.to_str() else {
                continue;
            };

            for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                let Ok(cookie) = Cookie::parse_encoded(pair).or_else(|_| Cookie::parse(pair)) else {
                    continue;
                };
                let Some(slot) = IDENTITY_COOKIE_NAMES.iter().position(|&n| n == cookie.name()) else {
                    continue;
                };
                if values[slot].is_none() {
                    values[slot] = Some(cookie.value_trimmed().to_owned());
                }
            }
        }

        Self { values }
    }

    /// Value of one identity cookie. Empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        let slot = IDENTITY_COOKIE_NAMES.iter().position(|&n| n == name)?;
        self.values[slot].as_deref().filter(|v| !v.is_empty())
    }

    pub fn emp_id(&self) -> Option<&str> {
        self.get(EMP_ID).or_else(|| self.get(EMP_ID_LOWER))
    }

    pub fn company_id(&self) -> Option<&str> {
        self.get(COMPANY_ID).or_else(|| self.get(COMPANY_ID_LOWER))
    }

    pub fn is_empty(&self) -> bool {
        IDENTITY_COOKIE_NAMES.iter().all(|name| self.get(name).is_none())
    }

    /// `Cookie` header for the upstream request, or `None` when no identity
    /// cookie is present.
    pub fn upstream_cookie_header(&self) -> Option<String> {
        let pairs: Vec<String> = IDENTITY_COOKIE_NAMES
            .iter()
            .filter_map(|&name| {
                self.get(name)
                    .map(|value| format!("{name}={}", utf8_percent_encode(value, COOKIE_VALUE)))
            })
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SameSitePolicy;
    use axum::http::HeaderValue;
    use cookie::SameSite;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for c in cookies {
            headers.append(COOKIE, HeaderValue::from_str(c).unwrap());
        }
        headers
    }

    #[test]
    fn issues_both_casings_with_site_wide_http_only_attributes() {
        let cookies = identity_cookies("123", "co9", &CookieConfig::default());

        let pairs: Vec<(&str, &str)> = cookies.iter().map(|c| (c.name(), c.value())).collect();
        assert_eq!(
            pairs,
            vec![("EmpID", "123"), ("empid", "123"), ("CompanyID", "co9"), ("companyid", "co9")]
        );

        for cookie in &cookies {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
            assert_eq!(cookie.secure(), Some(false));
            assert_eq!(cookie.max_age(), None);
        }
    }

    #[test]
    fn cross_site_policy_marks_cookies_secure() {
        let config = CookieConfig {
            same_site: SameSitePolicy::None,
            secure: false,
            max_age_secs: Some(7200),
        };
        let cookies = identity_cookies("1", "2", &config);

        for cookie in &cookies {
            assert_eq!(cookie.same_site(), Some(SameSite::None));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.max_age(), Some(time::Duration::hours(2)));
        }
    }

    #[test]
    fn forwards_present_cookies_in_fixed_order() {
        let identity = IdentityCookies::from_headers(&headers(&[
            "companyid=co9; theme=dark; EmpID=123",
            "CompanyID=co9",
        ]));

        assert_eq!(
            identity.upstream_cookie_header().as_deref(),
            Some("EmpID=123; CompanyID=co9; companyid=co9")
        );
    }

    #[test]
    fn omits_absent_and_empty_cookies() {
        let identity = IdentityCookies::from_headers(&headers(&["EmpID=; empid=7; other=1"]));
        assert_eq!(identity.upstream_cookie_header().as_deref(), Some("empid=7"));

        let none = IdentityCookies::from_headers(&headers(&["session=abc"]));
        assert!(none.is_empty());
        assert_eq!(none.upstream_cookie_header(), None);
    }

    #[test]
    fn values_are_decoded_then_re_encoded() {
        let identity = IdentityCookies::from_headers(&headers(&["EmpID=a%20b%3Bc; companyid=x%2Fy"]));

        assert_eq!(identity.get("EmpID"), Some("a b;c"));
        assert_eq!(identity.company_id(), Some("x/y"));
        assert_eq!(
            identity.upstream_cookie_header().as_deref(),
            Some("EmpID=a%20b%3Bc; companyid=x%2Fy")
        );
    }

    #[test]
    fn undecodable_value_is_forwarded_raw() {
        let identity = IdentityCookies::from_headers(&headers(&["EmpID=%FF; companyid=c1"]));

        assert_eq!(identity.get("EmpID"), Some("%FF"));
        assert_eq!(
            identity.upstream_cookie_header().as_deref(),
            Some("EmpID=%25FF; companyid=c1")
        );
    }

    #[test]
    fn quoted_values_are_unwrapped() {
        let identity = IdentityCookies::from_headers(&headers(&[r#"EmpID="123"; CompanyID="co 9""#]));

        assert_eq!(identity.emp_id(), Some("123"));
        assert_eq!(
            identity.upstream_cookie_header().as_deref(),
            Some("EmpID=123; CompanyID=co%209")
        );
    }

    #[test]
    fn forwarded_values_keep_uri_component_safe_characters() {
        let identity = IdentityCookies::from_headers(&headers(&["EmpID=a!b'(c)*~-_.; empid=x%2By%40z"]));

        assert_eq!(
            identity.upstream_cookie_header().as_deref(),
            Some("EmpID=a!b'(c)*~-_.; empid=x%2By%40z")
        );
    }

    #[test]
    fn first_occurrence_wins() {
        let identity = IdentityCookies::from_headers(&headers(&["empid=first; empid=second"]));
        assert_eq!(identity.emp_id(), Some("first"));
    }
}
