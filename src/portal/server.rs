use std::sync::{Arc, Mutex};

use esp_idf_svc::http::server::{Configuration, EspHttpServer};

use super::{handlers, SettingsStore};
use crate::settings::ApSettings;

const SERVER_PORT: u16 = 80;

/// State the HTTP handlers share.
pub struct PortalState {
    /// Settings the access point was brought up with.
    pub active: ApSettings,
    pub store: Mutex<SettingsStore>,
}

pub struct WebServer {
    server: Option<EspHttpServer<'static>>,
    state: Arc<PortalState>,
}

impl WebServer {
    pub fn new(state: Arc<PortalState>) -> Self {
        Self {
            server: None,
            state,
        }
    }

    pub fn is_running(&self) -> bool {
        self.server.is_some()
    }

    /// Starts the server unless it is already running. Failures are logged
    /// and leave the server stopped.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        log::info!("Starting server on port: '{}'", SERVER_PORT);
        match self.create() {
            Ok(server) => self.server = Some(server),
            Err(e) => log::error!("Error starting server! {:?}", e),
        }
    }

    fn create(&self) -> anyhow::Result<EspHttpServer<'static>> {
        let config = Configuration {
            http_port: SERVER_PORT,
            stack_size: 8192,
            max_uri_handlers: 4,
            ..Default::default()
        };

        let mut server = EspHttpServer::new(&config)?;

        log::info!("Registering URI handlers");
        handlers::register_routes(&mut server, self.state.clone())?;

        Ok(server)
    }

    /// Dropping the handle stops the underlying httpd instance.
    pub fn stop(&mut self) {
        if self.server.take().is_some() {
            log::info!("Server stopped");
        }
    }
}
