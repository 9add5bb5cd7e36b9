/// Installs a `tracing` fmt subscriber that writes through the test
/// harness capture. Later calls are ignored.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
