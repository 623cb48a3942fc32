#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    softap_config::portal::run()
}

/// Host build: decodes each argument as a `/setinfo` body and logs the result.
#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use softap_config::settings::ApSettings;

    let env = env_logger::Env::default().filter_or("SOFTAP_LOG", "info");
    env_logger::init_from_env(env);

    let defaults = ApSettings::default();
    log::info!("Default soft-AP settings: {:?}", defaults.masked());
    log::info!(
        "Configuration page: {} bytes",
        softap_config::page::INDEX_HTML.len()
    );

    for body in std::env::args().skip(1) {
        match ApSettings::from_form(&body) {
            Ok(settings) => log::info!("{:?} -> {:?}", body, settings.masked()),
            Err(e) => log::error!("{:?} -> {}", body, e),
        }
    }

    Ok(())
}
