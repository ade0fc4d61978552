use crate::config::HarvestConfig;
use crate::error::RenderError;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::timeout;

/// How many times to poll a freshly spawned chromedriver before giving up
const LOCAL_CONNECT_ATTEMPTS: usize = 20;
const LOCAL_CONNECT_INTERVAL: Duration = Duration::from_millis(250);

/// Something that can turn a URL into fully rendered HTML
#[allow(async_fn_in_trait)]
pub trait Renderer {
    /// Load `url` and return the page markup once it has settled
    async fn render(&mut self, url: &str) -> Result<String, RenderError>;

    /// Release any browser session; called exactly once at the end of a run
    async fn close(&mut self);
}

/// Where the WebDriver session comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// An already running WebDriver endpoint (Selenium grid, chromedriver, ...)
    Remote { endpoint: String },
    /// A chromedriver process spawned for the duration of the run
    Local { binary: String, port: u16 },
}

impl Backend {
    pub fn from_config(config: &HarvestConfig) -> Self {
        match &config.webdriver_url {
            Some(endpoint) => Backend::Remote {
                endpoint: endpoint.clone(),
            },
            None => Backend::Local {
                binary: config.chromedriver_path.clone(),
                port: config.chromedriver_port,
            },
        }
    }
}

struct Session {
    client: Client,
    // Killed on drop as well as on close
    driver: Option<Child>,
}

/// Headless Chrome driven over WebDriver.
///
/// The session is created on the first `render` call, not on construction.
pub struct WebDriverRenderer {
    backend: Backend,
    settle_delay: Duration,
    navigation_timeout: Duration,
    session: Option<Session>,
}

impl WebDriverRenderer {
    pub fn new(backend: Backend, settle_delay: Duration, navigation_timeout: Duration) -> Self {
        Self {
            backend,
            settle_delay,
            navigation_timeout,
            session: None,
        }
    }

    pub fn from_config(config: &HarvestConfig) -> Self {
        Self::new(
            Backend::from_config(config),
            config.settle_delay(),
            config.navigation_timeout(),
        )
    }

    /// Get the live client, connecting first if needed
    async fn client(&mut self) -> Result<&Client, RenderError> {
        if self.session.is_none() {
            let session = match &self.backend {
                Backend::Remote { endpoint } => connect_remote(endpoint).await?,
                Backend::Local { binary, port } => start_local(binary, *port).await?,
            };
            self.session = Some(session);
        }
        match &self.session {
            Some(session) => Ok(&session.client),
            None => Err(RenderError::Session("no session".to_string())),
        }
    }

    async fn drop_session(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.client.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
            if let Some(mut driver) = session.driver {
                if let Err(e) = driver.kill().await {
                    ::log::warn!("Failed to stop chromedriver: {}", e);
                }
            }
        }
    }
}

impl Renderer for WebDriverRenderer {
    async fn render(&mut self, url: &str) -> Result<String, RenderError> {
        let settle_delay = self.settle_delay;
        let navigation_timeout = self.navigation_timeout;
        let client = self.client().await?;

        let navigation = async {
            client.goto(url).await?;
            tokio::time::sleep(settle_delay).await;
            client.source().await
        };

        let result = timeout(navigation_timeout, navigation).await;
        match result {
            Ok(Ok(html)) => Ok(html),
            Ok(Err(e)) => {
                let message = e.to_string();
                if is_lost_session(&message) {
                    // Next render reconnects
                    ::log::warn!("Lost WebDriver session while loading {}", url);
                    self.drop_session().await;
                }
                Err(RenderError::Navigation {
                    url: url.to_string(),
                    message,
                })
            }
            Err(_) => Err(RenderError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    async fn close(&mut self) {
        self.drop_session().await;
        ::log::debug!("Renderer closed");
    }
}

fn is_lost_session(message: &str) -> bool {
    message.contains("Unable to find session") || message.contains("invalid session id")
}

/// Capabilities for a headless Chrome session
fn headless_capabilities() -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": ["--headless=new", "--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"]
        }),
    );
    caps
}

async fn connect(endpoint: &str) -> Result<Client, fantoccini::error::NewSessionError> {
    ClientBuilder::native()
        .capabilities(headless_capabilities())
        .connect(endpoint)
        .await
}

async fn connect_remote(endpoint: &str) -> Result<Session, RenderError> {
    ::log::info!("Connecting to remote WebDriver at {}", endpoint);
    match connect(endpoint).await {
        Ok(client) => Ok(Session {
            client,
            driver: None,
        }),
        Err(e) => {
            ::log::error!(
                "Make sure the WebDriver server is running or unset SELENIUM_URL/WEBDRIVER_URL to use a local chromedriver"
            );
            Err(RenderError::Session(format!(
                "failed to connect to WebDriver at {endpoint}: {e}"
            )))
        }
    }
}

async fn start_local(binary: &str, port: u16) -> Result<Session, RenderError> {
    ::log::info!("Starting local chromedriver ({}) on port {}", binary, port);
    let mut driver = Command::new(binary)
        .arg(format!("--port={port}"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| RenderError::Session(format!("failed to spawn {binary}: {e}")))?;

    let endpoint = format!("http://localhost:{port}");
    let mut last_error = String::new();
    for attempt in 1..=LOCAL_CONNECT_ATTEMPTS {
        match connect(&endpoint).await {
            Ok(client) => {
                ::log::debug!("Connected to chromedriver after {} attempt(s)", attempt);
                return Ok(Session {
                    client,
                    driver: Some(driver),
                });
            }
            Err(e) => {
                last_error = e.to_string();
                tokio::time::sleep(LOCAL_CONNECT_INTERVAL).await;
            }
        }
    }

    if let Err(e) = driver.kill().await {
        ::log::warn!("Failed to stop chromedriver: {}", e);
    }
    Err(RenderError::Session(format!(
        "chromedriver on {endpoint} never accepted a session: {last_error}"
    )))
}
