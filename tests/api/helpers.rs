use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;

use once_cell::sync::Lazy;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tokio::net::TcpListener;

use waitlist::startup::{self, AppState};
use waitlist::store::InMemoryStore;
use waitlist::telemetry;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::initialize_subscriber(subscriber);
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::initialize_subscriber(subscriber);
    };
});

pub struct App {
    pub address: SocketAddr,
    pub client: Client,
    pub store: Option<Arc<InMemoryStore>>,
}

impl App {
    /// An app backed by a fresh in-memory store.
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let app_state = AppState::with_store(store.clone());

        App::spawn(app_state, Some(store)).await
    }

    /// An app with no store configured, as when the database settings are missing.
    pub async fn without_store() -> Self {
        App::spawn(AppState::default(), None).await
    }

    async fn spawn(app_state: AppState, store: Option<Arc<InMemoryStore>>) -> Self {
        Lazy::force(&TRACING);

        let listener = TcpListener::bind(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to start a test application");
        let address = listener.local_addr().unwrap();

        tokio::spawn(startup::run(listener, app_state));

        App {
            address,
            client: Client::new(),
            store,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn store(&self) -> &InMemoryStore {
        self.store.as_deref().expect("This app was started without a store")
    }
}

impl App {
    pub fn build_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url(), path);

        if method == Method::GET {
            self.client.get(url)
        } else if method == Method::POST {
            self.client.post(url)
        } else {
            panic!("No implementation for this request method {}", method)
        }
    }

    pub async fn get_health_check(&self) -> Response {
        self.build_request(Method::GET, "/health_check")
            .send()
            .await
            .unwrap()
    }

    pub async fn get_home(&self) -> Response {
        self.build_request(Method::GET, "/").send().await.unwrap()
    }

    pub async fn post_signups<T: Serialize + ?Sized>(&self, body: &T) -> Response {
        self.build_request(Method::POST, "/signups")
            .json(body)
            .send()
            .await
            .unwrap()
    }
}
