use std::sync::mpsc::Sender;

use esp_idf_svc::{
    eventloop::{EspSubscription, EspSystemEventLoop, System},
    netif::IpEvent,
    wifi::WifiEvent,
};

use crate::station::StationEvent;

/// System events the web server lifecycle reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalEvent {
    ApStarted,
    ApStopped,
    StationGotIp,
}

/// Keeps the event loop subscriptions registered while alive.
pub struct EventListeners {
    _wifi: EspSubscription<'static, System>,
    _ip: EspSubscription<'static, System>,
}

pub fn listen(
    sysloop: &EspSystemEventLoop,
    events: Sender<PortalEvent>,
) -> anyhow::Result<EventListeners> {
    let wifi_events = events.clone();
    let wifi = sysloop.subscribe::<WifiEvent, _>(move |event| {
        let station = match event {
            WifiEvent::ApStaConnected(sta) => StationEvent::Joined {
                mac: sta.mac(),
                aid: sta.aid(),
            },
            WifiEvent::ApStaDisconnected(sta) => StationEvent::Left {
                mac: sta.mac(),
                aid: sta.aid(),
            },
            WifiEvent::ApStarted => {
                let _ = wifi_events.send(PortalEvent::ApStarted);
                return;
            }
            WifiEvent::ApStopped => {
                let _ = wifi_events.send(PortalEvent::ApStopped);
                return;
            }
            _ => return,
        };
        log::info!("{station}");
    })?;

    let ip = sysloop.subscribe::<IpEvent, _>(move |event| {
        if let IpEvent::DhcpIpAssigned(_) = event {
            let _ = events.send(PortalEvent::StationGotIp);
        }
    })?;

    Ok(EventListeners {
        _wifi: wifi,
        _ip: ip,
    })
}
