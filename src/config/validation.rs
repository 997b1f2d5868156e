use crate::config::types::{Config, CookiesConfig, CrawlConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site(&config.site)?;
    validate_crawl(&config.crawl)?;
    validate_cookies(&config.cookies)?;
    Ok(())
}

/// Validates the site and transport configuration
fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&site.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if site.base_url.ends_with('/') {
        return Err(ConfigError::Validation(
            "base-url must not end with a trailing slash".to_string(),
        ));
    }

    if let Some(proxy) = &site.proxy {
        let proxy_url = Url::parse(proxy)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy: {}", e)))?;

        if !matches!(proxy_url.scheme(), "socks5" | "socks5h" | "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "proxy scheme must be socks5, socks5h, http, or https, got '{}'",
                proxy_url.scheme()
            )));
        }
    }

    Ok(())
}

/// Validates crawl behavior configuration
fn validate_crawl(crawl: &CrawlConfig) -> Result<(), ConfigError> {
    if crawl.subsection.is_empty() {
        return Err(ConfigError::Validation(
            "subsection cannot be empty".to_string(),
        ));
    }

    // The subsection is a single path segment in listing URLs
    if crawl.subsection.contains('/') || crawl.subsection.contains('?') {
        return Err(ConfigError::Validation(format!(
            "subsection must be a bare name, got '{}'",
            crawl.subsection
        )));
    }

    if crawl.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start-page must be >= 1, got {}",
            crawl.start_page
        )));
    }

    if crawl.sort.is_empty() || !crawl.sort.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "sort must be a bare alphanumeric token, got '{}'",
            crawl.sort
        )));
    }

    if crawl.inter_page_delay_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "inter-page-delay-secs must be >= 1 to avoid hammering the site, got {}",
            crawl.inter_page_delay_secs
        )));
    }

    Ok(())
}

/// Validates the cookie values
fn validate_cookies(cookies: &CookiesConfig) -> Result<(), ConfigError> {
    if cookies.session_id.is_empty() {
        return Err(ConfigError::Validation(
            "cookies.session-id cannot be empty; copy it from a browser session".to_string(),
        ));
    }

    if cookies.captcha_token.is_empty() {
        return Err(ConfigError::Validation(
            "cookies.captcha-token cannot be empty; copy it from a browser session".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "http://forumabcdef.onion".to_string(),
                proxy: Some("socks5h://127.0.0.1:9050".to_string()),
            },
            crawl: CrawlConfig {
                subsection: "OpSec".to_string(),
                start_page: 1,
                sort: "new".to_string(),
                paginate: true,
                inter_page_delay_secs: 1,
                retry_cooldown_secs: 5,
            },
            cookies: CookiesConfig {
                session_id: "sid".to_string(),
                captcha_token: "tok".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_trailing_slash_base_url() {
        let mut config = valid_config();
        config.site.base_url = "http://forumabcdef.onion/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_bad_base_url_scheme() {
        let mut config = valid_config();
        config.site.base_url = "ftp://forumabcdef.onion".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_unparseable_proxy() {
        let mut config = valid_config();
        config.site.proxy = Some("not a url".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_empty_subsection() {
        let mut config = valid_config();
        config.crawl.subsection = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_subsection_with_path_separator() {
        let mut config = valid_config();
        config.crawl.subsection = "a/b".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_non_alphanumeric_sort() {
        let mut config = valid_config();
        config.crawl.sort = "new&x=1".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_page_delay() {
        let mut config = valid_config();
        config.crawl.inter_page_delay_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_cookie_values() {
        let mut config = valid_config();
        config.cookies.session_id = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_proxy_is_optional() {
        let mut config = valid_config();
        config.site.proxy = None;
        assert!(validate(&config).is_ok());
    }
}
