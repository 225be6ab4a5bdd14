use std::env;

use cbr_common::{helpers::parse_boolean_flag, Secret};
use log::*;
use stripe_tools::StripeConfig;

const DEFAULT_CBR_HOST: &str = "127.0.0.1";
const DEFAULT_CBR_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The hosted business directory the relay reads from.
    pub directory: DirectoryConfig,
    /// Payment processor credentials and webhook settings.
    pub stripe: StripeServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CBR_HOST.to_string(),
            port: DEFAULT_CBR_PORT,
            directory: DirectoryConfig::default(),
            stripe: StripeServerConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CBR_HOST").ok().unwrap_or_else(|| DEFAULT_CBR_HOST.into());
        let port = env::var("CBR_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CBR_PORT. {e} Using the default, {DEFAULT_CBR_PORT}, instead."
                    );
                    DEFAULT_CBR_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CBR_PORT);
        let directory = DirectoryConfig::from_env_or_default();
        let stripe = StripeServerConfig::from_env_or_default();
        Self { host, port, directory, stripe }
    }
}

//-----------------------------------------------  DirectoryConfig  ---------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub api_key: Secret<String>,
}

impl DirectoryConfig {
    pub fn from_env_or_default() -> Self {
        let base_url = env::var("CBR_DIRECTORY_URL").ok().unwrap_or_else(|| {
            error!("🪛️ CBR_DIRECTORY_URL is not set. Please set it to the base URL of the business directory.");
            String::default()
        });
        let api_key = env::var("CBR_DIRECTORY_API_KEY").ok().unwrap_or_else(|| {
            error!("🪛️ CBR_DIRECTORY_API_KEY is not set. Directory requests will be unauthenticated and likely fail.");
            String::default()
        });
        Self { base_url, api_key: Secret::new(api_key) }
    }
}

//----------------------------------------------  StripeServerConfig  -------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct StripeServerConfig {
    pub api: StripeConfig,
    /// If false, the webhook signature check is skipped and every delivery is trusted. **DANGER**
    pub signature_checks: bool,
}

impl StripeServerConfig {
    pub fn from_env_or_default() -> Self {
        let api = StripeConfig::new_from_env_or_default();
        let signature_checks = parse_boolean_flag(env::var("CBR_STRIPE_SIG_CHECKS").ok(), true);
        if !signature_checks {
            warn!(
                "🚨️ Webhook signature checks are disabled. Anyone who can reach this server can settle \
                 transactions. Do not run production like this."
            );
        }
        Self { api, signature_checks }
    }
}
