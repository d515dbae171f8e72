use std::sync::OnceLock;

// Shared tokio runtime for all background network work. The UI thread never
// blocks on it; tasks report back over mpsc channels.
static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

pub fn rt() -> &'static tokio::runtime::Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("tokio runtime")
    })
}
