use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::IpAddr;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Set when running in a hosted (non-local) deployment
    #[serde(default)]
    pub deployment_marker: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub refresh_interval_ms: u64,
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl UpstreamSettings {
    pub fn dashboard_url(&self) -> String {
        format!("{}/data/dashboard", self.base_url)
    }

    /// True when the base URL points at this machine
    pub fn is_loopback(&self) -> bool {
        let Ok(url) = reqwest::Url::parse(&self.base_url) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };

        if host.eq_ignore_ascii_case("localhost") {
            return true;
        }
        host.trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false)
    }

    /// A loopback backend is unreachable from a hosted deployment
    pub fn short_circuits_to_fallback(&self) -> bool {
        self.is_loopback()
            && self
                .deployment_marker
                .as_deref()
                .is_some_and(|m| !m.trim().is_empty())
    }
}

impl AppConfig {
    /// URL the dashboard controller polls: explicit, or this server's own proxy route
    pub fn proxy_url(&self) -> String {
        if let Some(url) = &self.dashboard.proxy_url {
            return url.trim_end_matches('/').to_string();
        }

        let (host, port) = self
            .server
            .bind
            .rsplit_once(':')
            .unwrap_or((self.server.bind.as_str(), "80"));
        let host = match host {
            "0.0.0.0" | "" => "127.0.0.1",
            "[::]" => "[::1]",
            other => other,
        };
        format!("http://{}:{}/api/data/dashboard", host, port)
    }

    fn normalize(mut self) -> Self {
        self.upstream.base_url = self.upstream.base_url.trim_end_matches('/').to_string();
        if self.upstream.base_url.is_empty() {
            self.upstream.base_url = DEFAULT_BACKEND_URL.to_string();
        }
        self
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("server.bind", "0.0.0.0:3000")?
        .set_default("upstream.base_url", DEFAULT_BACKEND_URL)?
        .set_default("upstream.timeout_ms", 3000)?
        .set_default("dashboard.refresh_interval_ms", 5000)
}

fn finish(
    builder: ConfigBuilder<DefaultState>,
    backend_url: Option<String>,
    deployment_marker: Option<String>,
) -> anyhow::Result<AppConfig> {
    let settings = builder
        .set_override_option("upstream.base_url", backend_url)?
        .set_override_option("upstream.deployment_marker", deployment_marker)?
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config.normalize())
}

/// `DASHBOARD_UPSTREAM__BASE_URL` -> `upstream.base_url`
fn environment() -> Environment {
    Environment::with_prefix("DASHBOARD")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Defaults, then `config/dashboard.*`, then `DASHBOARD_*` variables, then
/// `NEXT_PUBLIC_BACKEND_URL` / `VERCEL_URL`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = builder_with_defaults()?
        .add_source(File::with_name("config/dashboard").required(false))
        .add_source(environment());

    finish(
        builder,
        std::env::var("NEXT_PUBLIC_BACKEND_URL").ok(),
        std::env::var("VERCEL_URL").ok(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn upstream(base_url: &str, marker: Option<&str>) -> UpstreamSettings {
        UpstreamSettings {
            base_url: base_url.to_string(),
            timeout_ms: 3000,
            deployment_marker: marker.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults() {
        let config = finish(builder_with_defaults().unwrap(), None, None).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.upstream.base_url, "http://localhost:5000");
        assert_eq!(config.upstream.timeout_ms, 3000);
        assert_eq!(config.dashboard.refresh_interval_ms, 5000);
        assert!(config.upstream.deployment_marker.is_none());
        assert_eq!(config.proxy_url(), "http://127.0.0.1:3000/api/data/dashboard");
    }

    #[test]
    fn test_file_and_overrides() {
        let builder = builder_with_defaults().unwrap().add_source(File::from_str(
            r#"
            [upstream]
            base_url = "http://inventory.internal:8000/"
            timeout_ms = 1500

            [dashboard]
            refresh_interval_ms = 2000
            proxy_url = "http://dash.internal/api/data/dashboard/"
            "#,
            FileFormat::Toml,
        ));
        let config = finish(builder, None, Some("preview.example.com".to_string())).unwrap();

        assert_eq!(config.upstream.base_url, "http://inventory.internal:8000");
        assert_eq!(config.upstream.timeout_ms, 1500);
        assert_eq!(
            config.upstream.deployment_marker.as_deref(),
            Some("preview.example.com")
        );
        assert_eq!(config.proxy_url(), "http://dash.internal/api/data/dashboard");
    }

    #[test]
    fn test_backend_url_override_wins() {
        let builder = builder_with_defaults().unwrap().add_source(File::from_str(
            "[upstream]\nbase_url = \"http://from-file:1\"",
            FileFormat::Toml,
        ));
        let config = finish(builder, Some("https://api.example.com/".to_string()), None).unwrap();

        assert_eq!(config.upstream.base_url, "https://api.example.com");
        assert_eq!(
            config.upstream.dashboard_url(),
            "https://api.example.com/data/dashboard"
        );
    }

    #[test]
    fn test_is_loopback() {
        assert!(upstream("http://localhost:5000", None).is_loopback());
        assert!(upstream("http://LOCALHOST", None).is_loopback());
        assert!(upstream("http://127.0.0.1:5000", None).is_loopback());
        assert!(upstream("http://[::1]:5000", None).is_loopback());
        assert!(!upstream("http://10.0.0.5:5000", None).is_loopback());
        assert!(!upstream("https://api.example.com", None).is_loopback());
        assert!(!upstream("not a url", None).is_loopback());
    }

    #[test]
    fn test_short_circuit_needs_both_conditions() {
        let hosted = Some("app.vercel.app");

        assert!(upstream("http://localhost:5000", hosted).short_circuits_to_fallback());
        assert!(!upstream("http://localhost:5000", None).short_circuits_to_fallback());
        assert!(!upstream("http://localhost:5000", Some("")).short_circuits_to_fallback());
        assert!(!upstream("https://api.example.com", hosted).short_circuits_to_fallback());
    }

    #[test]
    fn test_environment_overrides() {
        let vars: config::Map<String, String> = [
            ("DASHBOARD_UPSTREAM__BASE_URL", "http://inventory.internal:8000"),
            ("DASHBOARD_UPSTREAM__TIMEOUT_MS", "1200"),
            ("DASHBOARD_DASHBOARD__REFRESH_INTERVAL_MS", "2500"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let builder = builder_with_defaults()
            .unwrap()
            .add_source(environment().source(Some(vars)));

        let config = finish(builder, None, None).unwrap();

        assert_eq!(config.upstream.base_url, "http://inventory.internal:8000");
        assert_eq!(config.upstream.timeout_ms, 1200);
        assert_eq!(config.dashboard.refresh_interval_ms, 2500);
    }

    #[test]
    fn test_proxy_url_from_bind() {
        let mut config = finish(builder_with_defaults().unwrap(), None, None).unwrap();

        config.server.bind = "192.168.1.20:8080".to_string();
        assert_eq!(config.proxy_url(), "http://192.168.1.20:8080/api/data/dashboard");

        config.server.bind = "[::]:3000".to_string();
        assert_eq!(config.proxy_url(), "http://[::1]:3000/api/data/dashboard");
    }
}
