use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::{modem::Modem, peripheral::Peripheral},
    ipv4::{self, Mask, Subnet},
    netif::{EspNetif, NetifConfiguration, NetifStack},
    nvs::EspDefaultNvsPartition,
    wifi::{
        AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration as WifiConfig, EspWifi,
        WifiDriver,
    },
};

use crate::settings::{ApSettings, Encryption};

/// Fixed router address of the soft-AP, also handed out as DNS.
const AP_IP: ipv4::Ipv4Addr = ipv4::Ipv4Addr::new(192, 168, 4, 1);
const AP_NETMASK: Mask = Mask(24);

fn auth_method(encryption: Encryption) -> AuthMethod {
    match encryption {
        Encryption::Open => AuthMethod::None,
        Encryption::WpaPsk => AuthMethod::WPA,
        Encryption::Wpa2Psk => AuthMethod::WPA2Personal,
        Encryption::WpaWpa2Psk => AuthMethod::WPAWPA2Personal,
    }
}

pub fn start<'d>(
    modem: impl Peripheral<P = Modem> + 'd,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    settings: &ApSettings,
) -> anyhow::Result<BlockingWifi<EspWifi<'d>>> {
    let ap_netif_config = NetifConfiguration {
        ip_configuration: Some(ipv4::Configuration::Router(ipv4::RouterConfiguration {
            subnet: Subnet {
                gateway: AP_IP,
                mask: AP_NETMASK,
            },
            dhcp_enabled: true,
            dns: Some(AP_IP),
            secondary_dns: None,
        })),
        ..NetifConfiguration::wifi_default_router()
    };
    let ap_netif = EspNetif::new_with_conf(&ap_netif_config)?;

    let driver = WifiDriver::new(modem, sysloop.clone(), Some(nvs))?;

    // The driver wants a STA netif even when only the AP side is used.
    let sta_netif = EspNetif::new(NetifStack::Sta)?;

    let mut wifi = BlockingWifi::wrap(
        EspWifi::wrap_all(driver, sta_netif, ap_netif)?,
        sysloop,
    )?;

    let ap_config = AccessPointConfiguration {
        ssid: settings
            .ssid
            .as_str()
            .try_into()
            .map_err(|_| anyhow::anyhow!("ssid too long: {}", settings.ssid))?,
        password: settings
            .password
            .as_str()
            .try_into()
            .map_err(|_| anyhow::anyhow!("password too long"))?,
        ssid_hidden: settings.ssid_hidden,
        channel: settings.channel,
        auth_method: auth_method(settings.encryption),
        max_connections: settings.max_connections,
        ..Default::default()
    };

    wifi.set_configuration(&WifiConfig::AccessPoint(ap_config))?;
    wifi.start()?;
    wifi.wait_netif_up()?;

    log::info!(
        "wifi_init_softap finished. SSID:{} password:{} channel:{}",
        settings.ssid,
        settings.masked().password,
        settings.channel
    );
    let ip_info = wifi.wifi().ap_netif().get_ip_info()?;
    log::info!("Soft-AP IP info: {:?}", ip_info);

    Ok(wifi)
}
