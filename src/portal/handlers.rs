//! HTTP route handlers

use std::sync::Arc;

use embedded_svc::http::Headers;
use esp_idf_svc::{
    http::{
        server::{EspHttpConnection, EspHttpServer, Request},
        Method,
    },
    io::Write,
};

use super::PortalState;
use crate::{
    body::{receive_body, BodyError, BODY_BUFFER_LEN},
    page,
    settings::ApSettings,
};

/// Delay between answering `/setinfo` and rebooting into the new settings.
const RESTART_DELAY: std::time::Duration = std::time::Duration::from_secs(2);

pub fn register_routes(
    server: &mut EspHttpServer<'static>,
    state: Arc<PortalState>,
) -> anyhow::Result<()> {
    server.fn_handler("/", Method::Get, |req| handle_index(req))?;

    let state_post = state.clone();
    server.fn_handler("/setinfo", Method::Post, move |req| {
        handle_setinfo(req, &state_post)
    })?;

    server.fn_handler("/api/status", Method::Get, move |req| {
        handle_status(req, &state)
    })?;

    Ok(())
}

fn handle_index(req: Request<&mut EspHttpConnection<'_>>) -> anyhow::Result<()> {
    let mut resp = req.into_response(200, None, &[("Content-Type", page::CONTENT_TYPE)])?;
    resp.write_all(page::INDEX_HTML.as_bytes())?;
    Ok(())
}

fn handle_setinfo(
    mut req: Request<&mut EspHttpConnection<'_>>,
    state: &PortalState,
) -> anyhow::Result<()> {
    let content_len = req.content_len().unwrap_or(0) as usize;
    let mut buf = [0u8; BODY_BUFFER_LEN];

    let body = match receive_body(&mut req, content_len, &mut buf) {
        Ok(body) => body,
        Err(e @ (BodyError::ShortRead { .. } | BodyError::Io(_))) => {
            log::error!("Failed to post control value: {}", e);
            req.into_status_response(e.status())?
                .write_all(b"Internal Server Error")?;
            return Ok(());
        }
        Err(e) => {
            log::warn!("Rejecting post: {}", e);
            req.into_status_response(e.status())?
                .write_all(e.to_string().as_bytes())?;
            return Ok(());
        }
    };

    log::info!("Post data is : {}", body);

    let settings = match ApSettings::from_form(body) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Invalid soft-AP settings: {}", e);
            req.into_status_response(400)?
                .write_all(e.to_string().as_bytes())?;
            return Ok(());
        }
    };

    log::info!("New soft-AP settings: {:?}", settings.masked());

    {
        let mut store = state.store.lock().unwrap();
        if let Err(e) = store.save(&settings) {
            log::error!("Failed to save soft-AP settings: {:?}", e);
            req.into_status_response(500)?
                .write_all(b"Failed to save settings")?;
            return Ok(());
        }
    }

    req.into_ok_response()?;

    std::thread::spawn(|| {
        std::thread::sleep(RESTART_DELAY);
        log::info!("Restarting with new soft-AP settings");
        unsafe { esp_idf_svc::sys::esp_restart() }
    });

    Ok(())
}

fn handle_status(
    req: Request<&mut EspHttpConnection<'_>>,
    state: &PortalState,
) -> anyhow::Result<()> {
    let json = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "settings": state.active.masked(),
    });

    let mut resp = req.into_response(200, None, &[("Content-Type", "application/json")])?;
    resp.write_all(json.to_string().as_bytes())?;
    Ok(())
}
