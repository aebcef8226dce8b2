//! Path utilities: expand ~ and derive side files next to the database.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// File holding the signed-in session token for a given database.
pub fn session_file_for(db_path: &str) -> PathBuf {
    let mut p = expand_tilde(db_path).into_os_string();
    p.push(".session");
    PathBuf::from(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_file_sits_next_to_database() {
        let p = session_file_for("/tmp/paprika.sqlite");
        assert_eq!(p, PathBuf::from("/tmp/paprika.sqlite.session"));
    }
}
