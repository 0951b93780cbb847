//! Redirect callback query parameters.

use url::Url;

/// Parameters the authorization server delivers via the redirect URL.
///
/// A redirect carries either an authorization code, an error pair, or
/// nothing at all (a user navigating to the callback route directly).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    /// Single-use authorization code.
    pub code: Option<String>,
    /// Provider error identifier (e.g. `access_denied`).
    pub error: Option<String>,
    /// Human-readable error description supplied by the provider.
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Extracts callback parameters from a redirect URL.
    ///
    /// Unknown query parameters are ignored; repeated parameters keep the
    /// first occurrence.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Returns true if the provider reported an error.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(url: &str) -> CallbackParams {
        CallbackParams::from_url(&Url::parse(url).expect("valid url"))
    }

    #[test]
    fn test_code_extracted() {
        let params = parse("http://localhost:8000/auth?code=xyz&state=s1");
        assert_eq!(params.code.as_deref(), Some("xyz"));
        assert!(!params.has_error());
    }

    #[test]
    fn test_error_with_description() {
        let params =
            parse("http://localhost:8000/auth?error=access_denied&error_description=User+cancelled");
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert_eq!(params.error_description.as_deref(), Some("User cancelled"));
        assert!(params.has_error());
    }

    #[test]
    fn test_bare_navigation_has_no_params() {
        let params = parse("http://localhost:8000/auth");
        assert_eq!(params, CallbackParams::default());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = parse("http://localhost:8000/auth?code=first&code=second");
        assert_eq!(params.code.as_deref(), Some("first"));
    }
}
