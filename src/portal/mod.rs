//! Soft-AP bring-up and the configuration web server.
//!
//! Only built for ESP-IDF targets.

mod events;
mod handlers;
mod server;
mod softap;
mod store;

use std::sync::{mpsc, Arc, Mutex};

use esp_idf_svc::{
    eventloop::EspSystemEventLoop, hal::prelude::Peripherals, nvs::EspDefaultNvsPartition,
};

use crate::settings::ApSettings;

pub use events::PortalEvent;
pub use server::{PortalState, WebServer};
pub use store::SettingsStore;

/// Boots the access point and serves the configuration page until reset.
pub fn run() -> anyhow::Result<()> {
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let partition = EspDefaultNvsPartition::take()?;

    let store = SettingsStore::new(partition.clone())?;
    let settings = store.load().unwrap_or_else(|| {
        log::info!("No stored soft-AP settings, using defaults");
        ApSettings::default()
    });
    settings.validate()?;

    // Stored settings that the driver refuses must not keep the AP down.
    let mut modem = peripherals.modem;
    let (_wifi, settings) = match softap::start(
        &mut modem,
        sysloop.clone(),
        partition.clone(),
        &settings,
    ) {
        Ok(wifi) => (wifi, settings),
        Err(e) => {
            let Some(defaults) = settings.fallback() else {
                return Err(e);
            };
            log::error!(
                "Soft-AP failed with stored settings, falling back to defaults: {:?}",
                e
            );
            let wifi = softap::start(&mut modem, sysloop.clone(), partition, &defaults)?;
            (wifi, defaults)
        }
    };

    let (events_tx, events_rx) = mpsc::channel();
    let _listeners = events::listen(&sysloop, events_tx)?;

    let mut server = WebServer::new(Arc::new(PortalState {
        active: settings,
        store: Mutex::new(store),
    }));
    server.start();

    // The listeners hold the sender, so this only ends if they are dropped.
    for event in events_rx {
        match event {
            PortalEvent::StationGotIp | PortalEvent::ApStarted => {
                if !server.is_running() {
                    log::info!("Starting webserver");
                    server.start();
                }
            }
            PortalEvent::ApStopped => {
                log::info!("Access point stopped, stopping webserver");
                server.stop();
            }
        }
    }

    Ok(())
}
