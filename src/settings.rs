//! Soft-AP settings and the `/setinfo` form that carries them.
//!
//! The form uses the same keys as the ESP AT `CWSAP` command:
//! `ssid=yuxin&pwd=TestPWD&chl=1&ecn=0&maxconn=1&ssidhidden=0`.

use serde::{Deserialize, Serialize};

static DEFAULT_AP_SSID: Option<&str> = option_env!("AP_SSID");
static DEFAULT_AP_PASS: Option<&str> = option_env!("AP_PASS");

pub const DEFAULT_CHANNEL: u8 = 1;
pub const DEFAULT_MAX_CONNECTIONS: u16 = 4;

/// The soft-AP driver accepts at most this many stations.
pub const MAX_CONNECTIONS_LIMIT: u16 = 10;
pub const MAX_CHANNEL: u8 = 13;
pub const MAX_SSID_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("malformed form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),
    #[error("ssid must be 1..=32 bytes, got {0}")]
    Ssid(usize),
    #[error("{0}")]
    Password(&'static str),
    #[error("channel must be 1..=13, got {0}")]
    Channel(u8),
    #[error("unsupported encryption code {0}")]
    Encryption(u8),
    #[error("max connections must be 1..=10, got {0}")]
    MaxConnections(u16),
    #[error("ssidhidden must be 0 or 1, got {0}")]
    SsidHidden(u8),
}

/// Soft-AP authentication, numbered like the `ecn` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encryption {
    Open,
    WpaPsk,
    Wpa2Psk,
    WpaWpa2Psk,
}

impl Encryption {
    /// Code 1 is WEP, which a soft-AP cannot offer.
    pub fn from_code(code: u8) -> Result<Self, SettingsError> {
        match code {
            0 => Ok(Encryption::Open),
            2 => Ok(Encryption::WpaPsk),
            3 => Ok(Encryption::Wpa2Psk),
            4 => Ok(Encryption::WpaWpa2Psk),
            other => Err(SettingsError::Encryption(other)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Encryption::Open => 0,
            Encryption::WpaPsk => 2,
            Encryption::Wpa2Psk => 3,
            Encryption::WpaWpa2Psk => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApSettings {
    pub ssid: String,
    pub password: String,
    pub channel: u8,
    pub encryption: Encryption,
    pub max_connections: u16,
    pub ssid_hidden: bool,
}

impl Default for ApSettings {
    fn default() -> Self {
        let password = DEFAULT_AP_PASS.unwrap_or("mypassword").to_string();
        let encryption = if password.is_empty() {
            Encryption::Open
        } else {
            Encryption::Wpa2Psk
        };

        Self {
            ssid: DEFAULT_AP_SSID.unwrap_or("myssid").to_string(),
            password,
            channel: DEFAULT_CHANNEL,
            encryption,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            ssid_hidden: false,
        }
    }
}

#[derive(Deserialize)]
struct SetInfoForm {
    ssid: String,
    pwd: String,
    chl: u8,
    ecn: u8,
    #[serde(default = "default_maxconn")]
    maxconn: u16,
    #[serde(default)]
    ssidhidden: u8,
}

fn default_maxconn() -> u16 {
    DEFAULT_MAX_CONNECTIONS
}

impl ApSettings {
    /// Decodes and validates a URL-encoded `/setinfo` body.
    pub fn from_form(body: &str) -> Result<Self, SettingsError> {
        let form: SetInfoForm = serde_urlencoded::from_str(body.trim())?;

        let ssid_hidden = match form.ssidhidden {
            0 => false,
            1 => true,
            other => return Err(SettingsError::SsidHidden(other)),
        };

        let settings = Self {
            ssid: form.ssid,
            password: form.pwd,
            channel: form.chl,
            encryption: Encryption::from_code(form.ecn)?,
            max_connections: form.maxconn,
            ssid_hidden,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.ssid.is_empty() || self.ssid.len() > MAX_SSID_LEN {
            return Err(SettingsError::Ssid(self.ssid.len()));
        }

        match self.encryption {
            Encryption::Open if !self.password.is_empty() => {
                return Err(SettingsError::Password(
                    "an open network must not have a password",
                ));
            }
            Encryption::Open => {}
            _ if self.password.len() < MIN_PASSWORD_LEN
                || self.password.len() > MAX_PASSWORD_LEN =>
            {
                return Err(SettingsError::Password(
                    "password must be 8..=64 bytes for a secured network",
                ));
            }
            // The driver reads a 64-character password as a raw PSK.
            _ if self.password.len() == MAX_PASSWORD_LEN
                && !self.password.bytes().all(|b| b.is_ascii_hexdigit()) =>
            {
                return Err(SettingsError::Password(
                    "a 64-byte password must be a hex PSK",
                ));
            }
            _ => {}
        }

        if self.channel == 0 || self.channel > MAX_CHANNEL {
            return Err(SettingsError::Channel(self.channel));
        }

        if self.max_connections == 0 || self.max_connections > MAX_CONNECTIONS_LIMIT {
            return Err(SettingsError::MaxConnections(self.max_connections));
        }

        Ok(())
    }

    /// Settings to bring the AP up with when the driver refuses these.
    /// `None` when these already are the compiled defaults.
    pub fn fallback(&self) -> Option<ApSettings> {
        let defaults = ApSettings::default();
        (*self != defaults).then_some(defaults)
    }

    /// A copy safe to log or hand out over HTTP.
    pub fn masked(&self) -> MaskedSettings<'_> {
        MaskedSettings {
            ssid: &self.ssid,
            password: "*".repeat(self.password.len().min(8)),
            channel: self.channel,
            encryption: self.encryption,
            ecn: self.encryption.code(),
            max_connections: self.max_connections,
            ssid_hidden: self.ssid_hidden,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MaskedSettings<'a> {
    pub ssid: &'a str,
    pub password: String,
    pub channel: u8,
    pub encryption: Encryption,
    /// `encryption` as its form code.
    pub ecn: u8,
    pub max_connections: u16,
    pub ssid_hidden: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_open_network_form() {
        let settings =
            ApSettings::from_form("ssid=yuxin&pwd=&chl=1&ecn=0&maxconn=1&ssidhidden=0").unwrap();

        assert_eq!(
            settings,
            ApSettings {
                ssid: "yuxin".to_string(),
                password: String::new(),
                channel: 1,
                encryption: Encryption::Open,
                max_connections: 1,
                ssid_hidden: false,
            }
        );
    }

    #[test]
    fn decodes_percent_encoded_values() {
        let settings =
            ApSettings::from_form("ssid=My+Home%21&pwd=p%40ss+word&chl=6&ecn=3&maxconn=4&ssidhidden=1")
                .unwrap();

        assert_eq!(settings.ssid, "My Home!");
        assert_eq!(settings.password, "p@ss word");
        assert_eq!(settings.channel, 6);
        assert_eq!(settings.encryption, Encryption::Wpa2Psk);
        assert!(settings.ssid_hidden);
    }

    #[test]
    fn optional_fields_fall_back() {
        let settings = ApSettings::from_form("ssid=lab&pwd=12345678&chl=11&ecn=4").unwrap();
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!settings.ssid_hidden);
    }

    #[test]
    fn ignores_unknown_keys_and_trailing_newline() {
        let settings =
            ApSettings::from_form("ssid=lab&pwd=&chl=2&ecn=0&submit=Save\r\n").unwrap();
        assert_eq!(settings.channel, 2);
    }

    #[test]
    fn missing_ssid_is_a_form_error() {
        let err = ApSettings::from_form("pwd=12345678&chl=1&ecn=3").unwrap_err();
        assert!(matches!(err, SettingsError::Form(_)));
    }

    #[test]
    fn non_numeric_channel_is_a_form_error() {
        let err = ApSettings::from_form("ssid=a&pwd=&chl=x&ecn=0").unwrap_err();
        assert!(matches!(err, SettingsError::Form(_)));
    }

    #[test]
    fn rejects_wep() {
        let err = ApSettings::from_form("ssid=a&pwd=12345678&chl=1&ecn=1").unwrap_err();
        assert!(matches!(err, SettingsError::Encryption(1)));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=&chl=14&ecn=0").unwrap_err(),
            SettingsError::Channel(14)
        ));
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=&chl=0&ecn=0").unwrap_err(),
            SettingsError::Channel(0)
        ));
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=&chl=1&ecn=0&maxconn=11").unwrap_err(),
            SettingsError::MaxConnections(11)
        ));
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=&chl=1&ecn=0&ssidhidden=2").unwrap_err(),
            SettingsError::SsidHidden(2)
        ));
    }

    #[test]
    fn rejects_bad_ssid_length() {
        let long = "x".repeat(MAX_SSID_LEN + 1);
        let body = format!("ssid={long}&pwd=&chl=1&ecn=0");
        assert!(matches!(
            ApSettings::from_form(&body).unwrap_err(),
            SettingsError::Ssid(33)
        ));
        assert!(matches!(
            ApSettings::from_form("ssid=&pwd=&chl=1&ecn=0").unwrap_err(),
            SettingsError::Ssid(0)
        ));
    }

    #[test]
    fn password_must_match_encryption() {
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=short&chl=1&ecn=3").unwrap_err(),
            SettingsError::Password(_)
        ));
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=&chl=1&ecn=2").unwrap_err(),
            SettingsError::Password(_)
        ));
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=12345678&chl=1&ecn=0").unwrap_err(),
            SettingsError::Password(_)
        ));
    }

    #[test]
    fn encryption_codes_round_trip() {
        for code in [0, 2, 3, 4] {
            assert_eq!(Encryption::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn defaults_are_valid() {
        let settings = ApSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.channel, DEFAULT_CHANNEL);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn masked_hides_password() {
        let settings = ApSettings {
            password: "a-very-long-password".to_string(),
            encryption: Encryption::Wpa2Psk,
            ..ApSettings::default()
        };
        let masked = settings.masked();
        assert_eq!(masked.password, "********");

        let json = serde_json::to_value(&masked).unwrap();
        assert_eq!(json["password"], "********");
        assert_eq!(json["encryption"], "Wpa2Psk");
        assert_eq!(json["ecn"], 3);
    }

    #[test]
    fn stored_settings_fall_back_to_defaults() {
        let stored = ApSettings::from_form("ssid=lab&pwd=12345678&chl=6&ecn=3").unwrap();
        assert_eq!(stored.fallback(), Some(ApSettings::default()));
        assert_eq!(ApSettings::default().fallback(), None);
    }

    #[test]
    fn password_length_boundaries() {
        let body = |pwd: &str| format!("ssid=lab&pwd={pwd}&chl=1&ecn=3");

        assert!(ApSettings::from_form(&body(&"p".repeat(MIN_PASSWORD_LEN))).is_ok());
        assert!(matches!(
            ApSettings::from_form(&body(&"p".repeat(MIN_PASSWORD_LEN - 1))).unwrap_err(),
            SettingsError::Password(_)
        ));
        assert!(ApSettings::from_form(&body(&"p".repeat(MAX_PASSWORD_LEN - 1))).is_ok());
        assert!(matches!(
            ApSettings::from_form(&body(&"a".repeat(MAX_PASSWORD_LEN + 1))).unwrap_err(),
            SettingsError::Password(_)
        ));
    }

    #[test]
    fn full_length_password_must_be_hex() {
        let hex = "0123456789abcdefABCDEF".repeat(3)[..MAX_PASSWORD_LEN].to_string();
        let settings =
            ApSettings::from_form(&format!("ssid=lab&pwd={hex}&chl=1&ecn=3")).unwrap();
        assert_eq!(settings.password, hex);

        let not_hex = "z".repeat(MAX_PASSWORD_LEN);
        assert!(matches!(
            ApSettings::from_form(&format!("ssid=lab&pwd={not_hex}&chl=1&ecn=3")).unwrap_err(),
            SettingsError::Password(_)
        ));
    }

    #[test]
    fn max_connections_boundaries() {
        assert!(matches!(
            ApSettings::from_form("ssid=a&pwd=&chl=1&ecn=0&maxconn=0").unwrap_err(),
            SettingsError::MaxConnections(0)
        ));
        let one = ApSettings::from_form("ssid=a&pwd=&chl=1&ecn=0&maxconn=1").unwrap();
        assert_eq!(one.max_connections, 1);
        let limit = ApSettings::from_form("ssid=a&pwd=&chl=1&ecn=0&maxconn=10").unwrap();
        assert_eq!(limit.max_connections, MAX_CONNECTIONS_LIMIT);
    }

    #[test]
    fn accepts_full_length_ssid() {
        let ssid = "x".repeat(MAX_SSID_LEN);
        let settings = ApSettings::from_form(&format!("ssid={ssid}&pwd=&chl=13&ecn=0")).unwrap();
        assert_eq!(settings.ssid.len(), MAX_SSID_LEN);
        assert_eq!(settings.channel, MAX_CHANNEL);
    }
}
