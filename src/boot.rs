use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::models::content::ContentDocument;
use crate::store;

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &["website", "website/static"];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, seeds a starter content.json on a fresh
/// install, and aborts only when the filesystem itself is unusable. A
/// broken content file is NOT fatal — the site serves the loading
/// placeholder until the operator fixes and redeploys it.
pub fn run() {
    info!("Vitrine boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Content file ────────────────────────────────
    let content_path = store::content_path();
    if !Path::new(&content_path).exists() {
        match seed_default_content(&content_path) {
            Ok(_) => info!("  Seeded starter content at {}", content_path),
            Err(e) => {
                warn!("  Could not seed {}: {} (site will show the loading page)", content_path, e);
                warnings += 1;
            }
        }
    } else {
        match store::ContentStore::load(&content_path) {
            Ok(_) => {}
            Err(e) => {
                warn!("  Content file problem: {} (site will show the loading page)", e);
                warnings += 1;
            }
        }
    }

    // ── 3. Rocket.toml exists ──────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found — using default config");
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}

fn seed_default_content(path: &str) -> Result<(), String> {
    let doc = ContentDocument::default_document();
    let json = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| e.to_string())
}
