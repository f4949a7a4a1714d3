use crate::error::{Result, SplitError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SUBJECT: &str = "Votre Bulletin de salaire";
pub const DEFAULT_BODY: &str = "Bonjour M ,Mme veuillez trouver en pièces vos bulletins de salaire .Bonne réception .Hervé KOFFI";

/// SMTP relay used by `send`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    pub from_email: String,
    #[serde(default)]
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".into(),
            port: 587,
            username: String::new(),
            password: None,
            from_email: String::new(),
            from_name: String::new(),
        }
    }
}

/// Subject and body of payslip mails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailTemplate {
    pub subject: String,
    pub body: String,
}

impl Default for MailTemplate {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.into(),
            body: DEFAULT_BODY.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where split pages and the report are written
    pub output_dir: PathBuf,
    /// Job store file (relative paths resolve against the working directory)
    pub jobs_file: PathBuf,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub mail: MailTemplate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("completed"),
            jobs_file: PathBuf::from("completed").join("jobs.json"),
            smtp: SmtpConfig::default(),
            mail: MailTemplate::default(),
        }
    }
}

impl Config {
    /// Load the saved config (or defaults), then apply `SMTP_*` environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Saved config only; what `config --set-*` edits and writes back
    pub fn load_file() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(serde_json::from_str::<Config>(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SplitError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("bulletin-split").join("config.json"))
    }

    /// Environment wins over the file
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Some(port) = lookup("SMTP_PORT") {
            match port.parse() {
                Ok(port) => self.smtp.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid SMTP_PORT"),
            }
        }
        if let Some(user) = lookup("SMTP_USER") {
            self.smtp.username = user;
        }
        if let Some(password) = lookup("SMTP_PASSWORD") {
            self.smtp.password = Some(password);
        }
    }

    /// Sender address, falling back to the SMTP login
    pub fn sender(&self) -> &str {
        if self.smtp.from_email.is_empty() {
            &self.smtp.username
        } else {
            &self.smtp.from_email
        }
    }

    /// True when a real SMTP send is possible
    pub fn has_smtp_credentials(&self) -> bool {
        !self.smtp.username.is_empty()
            && self.smtp.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}
