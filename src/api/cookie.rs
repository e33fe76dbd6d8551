/// Raw `Cookie` header value as issued by the platform, e.g.
/// `csrftoken=abc; sessionid=xyz`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar(String);

impl CookieJar {
    pub const CSRF_TOKEN: &'static str = "csrftoken";

    pub fn new(header: impl Into<String>) -> Self {
        Self(header.into().trim().to_owned())
    }

    pub fn header(&self) -> &str {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.trim())
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.get(Self::CSRF_TOKEN)
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn jar() -> CookieJar {
        CookieJar::new("sessionid=s3cr3t;  csrftoken=tok=en ; theme=dark\n")
    }

    #[rstest]
    fn test_cookie_jar_finds_csrf_token(jar: CookieJar) {
        assert_eq!("tok=en", assert_some!(jar.csrf_token()));
        assert_eq!("s3cr3t", assert_some!(jar.get("sessionid")));
    }

    #[rstest]
    fn test_cookie_jar_does_not_match_prefixes(jar: CookieJar) {
        assert_none!(jar.get("session"));
        assert_none!(CookieJar::default().csrf_token());
    }

    #[rstest]
    fn test_cookie_jar_keeps_trimmed_header(jar: CookieJar) {
        assert_eq!(
            "sessionid=s3cr3t;  csrftoken=tok=en ; theme=dark",
            jar.header()
        );
    }
}
