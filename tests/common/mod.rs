#![allow(dead_code)]

pub use buildwatch_test_utils::builders;
pub use buildwatch_test_utils::collecting_sink::CollectingSink;
pub use buildwatch_test_utils::fake_backend::{FakeOutcome, FakeToolBackend};
pub use buildwatch_test_utils::{init_tracing, with_timeout};

use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script named `name` into `dir`.
///
/// The script receives the verb as `$1` and the target as `$2`, exactly like
/// the real tool would.
#[cfg(unix)]
pub fn write_tool_script(dir: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(path)
}
