#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub)]
use async_trait::async_trait;
use site_contact::AppBuilder;
use site_contact::config::{Config, ContactConfig, RateLimitConfig, ServerConfig, TelemetryConfig};
use site_contact::domain::submission::Submission;
use site_contact::services::notifier::{Notifier, NotifyError};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("site_contact=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub fn get_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mgmt_port: 0,
            trusted_proxies: vec!["127.0.0.1/32".parse().unwrap()],
            ..Default::default()
        },
        rate_limit: RateLimitConfig { per_second: 10_000, burst: 10_000 },
        contact: ContactConfig::default(),
        telemetry: TelemetryConfig::default(),
    }
}

/// Collects every submission handed to it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Submission>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Submission> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, submission: &Submission) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub contact_url: String,
    pub client: reqwest::Client,
    pub notifier: Arc<RecordingNotifier>,
    pub config: Config,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        setup_tracing();

        let notifier = Arc::new(RecordingNotifier::default());
        let services = AppBuilder::new(config.clone()).with_notifier(notifier.clone()).build();
        let router = site_contact::api::app_router(&config, services);

        let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_addr = api_listener.local_addr().unwrap();
        let mgmt_addr = mgmt_listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(api_listener, router.into_make_service_with_connect_info::<SocketAddr>()).await.unwrap();
        });
        tokio::spawn(async move {
            axum::serve(
                mgmt_listener,
                site_contact::api::mgmt_router().into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        let server_url = format!("http://{api_addr}");
        Self {
            contact_url: format!("{server_url}{}", config.contact.route),
            server_url,
            mgmt_url: format!("http://{mgmt_addr}"),
            client: reqwest::Client::new(),
            notifier,
            config,
        }
    }

    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client.post(&self.contact_url).json(body).send().await.unwrap()
    }
}
