use std::fs;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    // Initialize logging once
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Create a file (and its parent directories) with placeholder content
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, b"not really a video").expect("Failed to write test file");
}
