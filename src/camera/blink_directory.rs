use crate::blink_config::BlinkApiConfig;
use crate::camera::device_directory::{DeviceCandidate, DeviceDirectory, Discovery};
use crate::common::timestamp_utils;
use crate::core::console::{self, Console};
use crate::errors::AppError;
use crate::settings::document::Credential;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};

const LOGIN_HOST: &str = "rest-prod.immedia-semi.com";
const DEVICE_IDENTIFIER: &str = "blink-connect-setup";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    account: LoginAccount,
    auth: LoginAuth,
}

#[derive(Debug, Deserialize)]
struct LoginAccount {
    account_id: u64,
    client_id: u64,
    #[serde(default)]
    user_id: Option<u64>,
    tier: String,
    #[serde(default)]
    client_verification_required: bool,
}

#[derive(Debug, Deserialize)]
struct LoginAuth {
    token: String,
}

#[derive(Debug, Deserialize)]
struct PinVerifyResponse {
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HomescreenDevice {
    name: String,
    #[serde(default)]
    serial: String,
}

#[derive(Debug, Default, Deserialize)]
struct Homescreen {
    #[serde(default)]
    cameras: Vec<HomescreenDevice>,
    #[serde(default)]
    owls: Vec<HomescreenDevice>, // Blink Mini
    #[serde(default)]
    doorbells: Vec<HomescreenDevice>,
}

/// [`DeviceDirectory`] backed by the Blink REST API.
pub struct BlinkDirectory {
    client: Client,
    config: BlinkApiConfig,
}

impl BlinkDirectory {
    pub fn new(config: &BlinkApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        debug!("🌐 Blink HTTP client created (timeout {}s)", config.request_timeout_secs);
        Ok(BlinkDirectory { client, config: config.clone() })
    }

    fn base_url(&self, host: &str) -> String {
        match &self.config.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", host),
        }
    }

    fn regional_url(&self, credential: &Credential) -> String {
        let host = credential.host.as_deref().unwrap_or(LOGIN_HOST);
        self.base_url(host)
    }

    async fn login(&self, username: &str, password: &str, uid: &str) -> Result<(Credential, bool), AppError> {
        let url = format!("{}/api/v5/account/login", self.base_url(LOGIN_HOST));
        info!("🔐 Logging in to Blink as '{}'", username);
        let start_time = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "unique_id": uid,
                "device_identifier": DEVICE_IDENTIFIER,
                "client_name": self.config.client_name,
                "email": username,
                "password": password,
                "reauth": "true",
            }))
            .send()
            .await?;
        let login: LoginResponse = check_status(response, username, "login").await?.json().await?;
        debug!("Blink login answered in {:?} (tier {})", start_time.elapsed(), login.account.tier);

        let mut credential = Credential::for_user(username);
        credential.password = Some(password.to_string());
        credential.uid = Some(uid.to_string());
        credential.device_id = Some(DEVICE_IDENTIFIER.to_string());
        credential.token = Some(login.auth.token);
        credential.host = Some(format!("rest-{}.immedia-semi.com", login.account.tier));
        credential.region_id = Some(login.account.tier);
        credential.client_id = Some(login.account.client_id);
        credential.account_id = Some(login.account.account_id);
        credential.user_id = login.account.user_id;
        Ok((credential, login.account.client_verification_required))
    }

    async fn verify_pin(&self, credential: &Credential, pin: &str) -> Result<(), AppError> {
        let (account_id, client_id) = match (credential.account_id, credential.client_id) {
            (Some(account_id), Some(client_id)) => (account_id, client_id),
            _ => return Err(AppError::Discovery("login did not return account and client ids".to_string())),
        };
        let url = format!(
            "{}/api/v4/account/{}/client/{}/pin/verify",
            self.regional_url(credential),
            account_id,
            client_id
        );
        let response = self
            .client
            .post(&url)
            .header("TOKEN-AUTH", credential.token.as_deref().unwrap_or_default())
            .json(&json!({ "pin": pin }))
            .send()
            .await?;
        let verdict: PinVerifyResponse = check_status(response, &credential.username, "PIN verification")
            .await?
            .json()
            .await?;
        if !verdict.valid {
            return Err(AppError::Authentication {
                username: credential.username.clone(),
                details: verdict.message.unwrap_or_else(|| "PIN was rejected".to_string()),
            });
        }
        info!("✅ Blink client verified for '{}'", credential.username);
        Ok(())
    }

    async fn login_and_verify(
        &self,
        username: &str,
        password: &str,
        uid: &str,
        console: &mut dyn Console,
    ) -> Result<Credential, AppError> {
        let (credential, needs_pin) = self.login(username, password, uid).await?;
        if needs_pin {
            let pin = console.read_line("Enter the PIN Blink sent to your email: ")?;
            self.verify_pin(&credential, pin.trim()).await?;
        }
        Ok(credential)
    }

    async fn interactive_login(
        &self,
        console: &mut dyn Console,
        previous: Option<&Credential>,
    ) -> Result<Credential, AppError> {
        let username = console::prompt(console, "Blink account email:", previous.map(|c| c.username.as_str()))?;
        let password = console.read_line("Blink account password: ")?;
        let uid = previous.and_then(|c| c.uid.clone()).unwrap_or_else(fresh_uid);
        self.login_and_verify(username.trim(), &password, &uid, console).await
    }

    async fn fetch_devices(&self, credential: &Credential) -> Result<Vec<DeviceCandidate>, AppError> {
        let account_id = credential
            .account_id
            .ok_or_else(|| AppError::Discovery("stored credentials have no account id".to_string()))?;
        let url = format!("{}/api/v3/accounts/{}/homescreen", self.regional_url(credential), account_id);
        let start_time = Instant::now();
        let response = self
            .client
            .get(&url)
            .header("TOKEN-AUTH", credential.token.as_deref().unwrap_or_default())
            .send()
            .await?;
        let homescreen: Homescreen = check_status(response, &credential.username, "homescreen")
            .await?
            .json()
            .await?;

        let devices: Vec<DeviceCandidate> = homescreen
            .cameras
            .into_iter()
            .chain(homescreen.owls)
            .chain(homescreen.doorbells)
            .map(|d| DeviceCandidate::new(d.name, d.serial))
            .collect();
        info!("📷 Blink reported {} camera(s) in {:?}", devices.len(), start_time.elapsed());
        Ok(devices)
    }
}

/// Client uid for a login that has none stored yet.
fn fresh_uid() -> String {
    format!("BlinkCamera_{:x}", timestamp_utils::current_utc_nanos())
}

async fn check_status(response: Response, username: &str, step: &str) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!("❌ Blink {} failed with status {}: {}", step, status, body);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(AppError::Authentication {
            username: username.to_string(),
            details: format!("{} rejected ({})", step, status),
        })
    } else {
        Err(AppError::Discovery(format!("Blink {} failed with status {}", step, status)))
    }
}

#[async_trait]
impl DeviceDirectory for BlinkDirectory {
    async fn authenticate_and_discover(
        &mut self,
        existing: Option<Credential>,
        console: &mut dyn Console,
    ) -> Result<Discovery, AppError> {
        let credential = match existing {
            Some(stored) if stored.token.is_some() && stored.account_id.is_some() => {
                debug!("Reusing stored Blink token for '{}'", stored.username);
                match self.fetch_devices(&stored).await {
                    Ok(devices) => return Ok(Discovery { credential: stored, devices }),
                    Err(AppError::Authentication { .. }) if stored.password.is_some() => {
                        warn!("⚠️ Stored Blink token for '{}' expired, logging in again", stored.username);
                        let password = stored.password.clone().unwrap_or_default();
                        let uid = stored.uid.clone().unwrap_or_else(fresh_uid);
                        self.login_and_verify(&stored.username, &password, &uid, console).await?
                    }
                    Err(e) => return Err(e),
                }
            }
            Some(stored) => match (stored.password.as_deref(), stored.uid.as_deref()) {
                (Some(password), Some(uid)) => self.login_and_verify(&stored.username, password, uid, console).await?,
                _ => self.interactive_login(console, Some(&stored)).await?,
            },
            None => self.interactive_login(console, None).await?,
        };

        let devices = self.fetch_devices(&credential).await?;
        Ok(Discovery { credential, devices })
    }
}
