use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variables consulted for the login name, in order.
const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Name of the invoking OS account, read from the environment at call time.
pub fn current_user() -> String {
    user_from(|key| std::env::var_os(key))
}

fn user_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<OsString>,
{
    USER_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.to_string_lossy().into_owned())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Default config file location (~/.config/scriptkeeper/config.toml or platform equivalent)
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "scriptkeeper")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
