use std::fmt;

/// A client station joining or leaving the access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationEvent {
    Joined { mac: [u8; 6], aid: u16 },
    Left { mac: [u8; 6], aid: u16 },
}

pub fn format_mac(mac: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

impl fmt::Display for StationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationEvent::Joined { mac, aid } => {
                write!(f, "station {} join, AID={}", format_mac(mac), aid)
            }
            StationEvent::Left { mac, aid } => {
                write!(f, "station {} leave, AID={}", format_mac(mac), aid)
            }
        }
    }
}
