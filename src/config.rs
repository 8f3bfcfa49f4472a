//! Client configuration: endpoints, timings and user-facing text.
//!
//! Everything has a default matching the production page. The browser build
//! reads optional overrides from a JSON blob embedded by the template; any
//! field left out keeps its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::alerts::AlertTimings;
use crate::errors::ClientError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_CHATBOT_PATH: &str = "/api/chatbot";
pub const DEFAULT_RELOAD_DELAY_MS: u64 = 1000;
pub const DEFAULT_ALERT_VISIBLE_MS: u64 = 5000;
pub const DEFAULT_ALERT_FADE_MS: u64 = 150;
pub const DEFAULT_INPUT_MAX_HEIGHT_PX: i32 = 100;
pub const DEFAULT_FOCUS_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every request path. Empty means same origin.
    pub api_base: String,
    pub chatbot_path: String,
    pub reload_delay_ms: u64,
    pub alert_visible_ms: u64,
    pub alert_fade_ms: u64,
    pub input_max_height_px: i32,
    pub focus_delay_ms: u64,
    pub text: UiText,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            chatbot_path: DEFAULT_CHATBOT_PATH.to_string(),
            reload_delay_ms: DEFAULT_RELOAD_DELAY_MS,
            alert_visible_ms: DEFAULT_ALERT_VISIBLE_MS,
            alert_fade_ms: DEFAULT_ALERT_FADE_MS,
            input_max_height_px: DEFAULT_INPUT_MAX_HEIGHT_PX,
            focus_delay_ms: DEFAULT_FOCUS_DELAY_MS,
            text: UiText::default(),
        }
    }
}

impl ClientConfig {
    /// Parse overrides from JSON and validate the result.
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if !self.chatbot_path.starts_with('/') {
            return Err(ClientError::Config(format!(
                "chatbot_path must start with '/': {}",
                self.chatbot_path
            )));
        }
        if self.input_max_height_px <= 0 {
            return Err(ClientError::Config(format!(
                "input_max_height_px must be positive: {}",
                self.input_max_height_px
            )));
        }
        Ok(())
    }

    /// Join `path` onto the configured base without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    pub fn chatbot_url(&self) -> String {
        self.endpoint(&self.chatbot_path)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn alert_timings(&self) -> AlertTimings {
        AlertTimings {
            visible_for: Duration::from_millis(self.alert_visible_ms),
            fade_for: Duration::from_millis(self.alert_fade_ms),
        }
    }
}

/// Every string the client shows on its own (server messages pass through).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiText {
    pub join_loading: String,
    pub leave_loading: String,
    pub cancel_loading: String,
    pub leave_confirm: String,
    pub cancel_confirm: String,
    pub join_failed: String,
    pub action_failed: String,
    pub chat_fallback: String,
    pub chat_offline: String,
    pub welcome_title: String,
    pub welcome_body: String,
    pub default_avatar_color: String,
}

impl Default for UiText {
    fn default() -> Self {
        Self {
            join_loading: "Chargement...".into(),
            leave_loading: "Annulation...".into(),
            cancel_loading: "Annulation...".into(),
            leave_confirm:
                "Êtes-vous sûr de vouloir quitter cet événement ? Vous perdrez vos points."
                    .into(),
            cancel_confirm:
                "Êtes-vous sûr de vouloir annuler cet événement ? Cette action est irréversible."
                    .into(),
            join_failed: "Une erreur est survenue lors de l'inscription.".into(),
            action_failed: "Une erreur est survenue.".into(),
            chat_fallback: "Oups, une petite erreur est survenue. Réessaie !".into(),
            chat_offline:
                "Désolé, je n'ai pas pu me connecter. Vérifie ta connexion internet et réessaie !"
                    .into(),
            welcome_title: "Salut champion !".into(),
            welcome_body: "Je suis Coach Sport+, ton assistant sportif personnel. Pose-moi tes \
                           questions sur le sport, les activités ou comment bien t'entraîner !"
                .into(),
            default_avatar_color: "#667eea".into(),
        }
    }
}
