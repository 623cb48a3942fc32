use esp_idf_svc::nvs::{EspDefaultNvs, EspDefaultNvsPartition};

use crate::settings::{ApSettings, Encryption};

const NAMESPACE: &str = "softap";

/// Soft-AP settings persisted in NVS.
pub struct SettingsStore {
    nvs: EspDefaultNvs,
}

impl SettingsStore {
    pub fn new(partition: EspDefaultNvsPartition) -> anyhow::Result<Self> {
        Ok(Self {
            nvs: EspDefaultNvs::new(partition, NAMESPACE, true)?,
        })
    }

    /// Returns `None` when nothing usable is stored.
    pub fn load(&self) -> Option<ApSettings> {
        match self.read() {
            Ok(Some(settings)) => match settings.validate() {
                Ok(()) => Some(settings),
                Err(e) => {
                    log::warn!("Ignoring stored soft-AP settings: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::error!("Failed to read soft-AP settings: {:?}", e);
                None
            }
        }
    }

    fn read(&self) -> anyhow::Result<Option<ApSettings>> {
        let mut ssid_buf = [0u8; 33];
        let mut pwd_buf = [0u8; 65];

        let Some(ssid) = self.nvs.get_str("ssid", &mut ssid_buf)? else {
            return Ok(None);
        };
        let Some(password) = self.nvs.get_str("pwd", &mut pwd_buf)? else {
            return Ok(None);
        };
        let (Some(channel), Some(ecn), Some(max_connections), Some(hidden)) = (
            self.nvs.get_u8("chl")?,
            self.nvs.get_u8("ecn")?,
            self.nvs.get_u16("maxconn")?,
            self.nvs.get_u8("hidden")?,
        ) else {
            return Ok(None);
        };

        Ok(Some(ApSettings {
            ssid: ssid.to_string(),
            password: password.to_string(),
            channel,
            encryption: Encryption::from_code(ecn)?,
            max_connections,
            ssid_hidden: hidden != 0,
        }))
    }

    pub fn save(&mut self, settings: &ApSettings) -> anyhow::Result<()> {
        self.nvs.set_str("ssid", &settings.ssid)?;
        self.nvs.set_str("pwd", &settings.password)?;
        self.nvs.set_u8("chl", settings.channel)?;
        self.nvs.set_u8("ecn", settings.encryption.code())?;
        self.nvs.set_u16("maxconn", settings.max_connections)?;
        self.nvs.set_u8("hidden", settings.ssid_hidden as u8)?;
        Ok(())
    }
}
