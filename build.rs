fn main() {
    // Host builds (unit tests, the dry-run binary) have no ESP-IDF environment.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
