//! Read a project `.env` into a key-value map without applying it (precedence is decided
//! in the crate root).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `.env` in `override_dir` when given, else in the current directory.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Parses `.env` with the `dotenv` crate's line grammar (quotes, `export`, comments).
/// A missing file yields an empty map; the first malformed line is an error.
pub fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, dotenv::Error> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    dotenv::from_path_iter(&path)?.collect()
}
