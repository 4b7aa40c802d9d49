use crate::core::PageSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use thirtyfour::prelude::*;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

const CHROME_ARGS: [&str; 5] = [
    "--headless=new",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--window-size=1920,1080",
];

/// Renders the stats page in headless Chrome through a running ChromeDriver
/// and returns the resulting DOM. Each fetch opens and closes its own session.
pub struct WebDriverPageSource {
    webdriver_url: String,
    url: String,
}

impl WebDriverPageSource {
    pub fn new(webdriver_url: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            url: url.into(),
        }
    }

    async fn render(driver: &WebDriver, url: &str) -> Result<String> {
        driver.goto(url).await?;
        Ok(driver.source().await?)
    }
}

#[async_trait]
impl PageSource for WebDriverPageSource {
    async fn fetch_page(&self) -> Result<String> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_chrome_option("args", CHROME_ARGS.to_vec())?;

        tracing::debug!(
            "Rendering {} via WebDriver at {}",
            self.url,
            self.webdriver_url
        );
        let driver = WebDriver::new(&self.webdriver_url, caps).await?;

        let result = Self::render(&driver, &self.url).await;

        // The session is closed whether or not rendering worked
        if let Err(e) = driver.quit().await {
            tracing::warn!("Failed to quit browser session: {}", e);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScrapeError;
    use httpmock::prelude::*;

    const SESSION: &str = r#"{"value":{"sessionId":"s1","capabilities":{"browserName":"chrome"}}}"#;

    #[tokio::test]
    async fn test_returns_rendered_source() {
        let server = MockServer::start();
        let new_session = server.mock(|when, then| {
            when.method(POST).path("/session");
            then.status(200)
                .header("content-type", "application/json")
                .body(SESSION);
        });
        server.mock(|when, then| {
            when.method(POST).path("/session/s1/timeouts");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"value":null}"#);
        });
        server.mock(|when, then| {
            when.method(GET).path("/session/s1/url");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"value":"http://stats.test/skaters"}"#);
        });
        let goto = server.mock(|when, then| {
            when.method(POST)
                .path("/session/s1/url")
                .body_contains("http://stats.test/skaters");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"value":null}"#);
        });
        server.mock(|when, then| {
            when.method(GET).path("/session/s1/source");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"value":"<html><td class=\"name ng-binding ng-scope\">A</td></html>"}"#);
        });
        let quit = server.mock(|when, then| {
            when.method(DELETE).path("/session/s1");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"value":null}"#);
        });

        let source: Box<dyn PageSource> =
            Box::new(WebDriverPageSource::new(server.base_url(), "http://stats.test/skaters"));
        let markup = source.fetch_page().await.unwrap();

        assert!(markup.contains("name ng-binding ng-scope"));
        new_session.assert();
        goto.assert();
        quit.assert();
    }

    #[tokio::test]
    async fn test_unreachable_driver_is_browser_error() {
        let source = WebDriverPageSource::new("http://127.0.0.1:9", "http://stats.test/skaters");
        let err = source.fetch_page().await.unwrap_err();

        assert!(matches!(err, ScrapeError::BrowserError(_)));
        assert!(!err.is_retryable());
        assert!(err.recovery_suggestion().contains("ChromeDriver"));
    }
}
