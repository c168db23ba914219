use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_path(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("todo_client_{tag}_{suffix}.toml"))
}

#[test]
fn defaults_to_local_backend() {
    assert_eq!(
        ClientSettings::default().api_url,
        "http://localhost:5000/api/todos"
    );
}

#[test]
fn missing_settings_file_keeps_defaults() {
    let settings = load_settings_from(&temp_settings_path("missing"));
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn settings_file_overrides_default() {
    let path = temp_settings_path("file");
    fs::write(&path, "api_url = \"http://todo.internal:8080/api/todos\"\n").expect("write");

    let settings = load_settings_from(&path);
    assert_eq!(settings.api_url, "http://todo.internal:8080/api/todos");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn malformed_settings_file_is_ignored() {
    let path = temp_settings_path("bad");
    fs::write(&path, "api_url = [").expect("write");

    let settings = load_settings_from(&path);
    assert_eq!(settings, ClientSettings::default());

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn settings_file_errors_name_the_file() {
    assert!(read_settings_file(&temp_settings_path("absent"))
        .expect("missing file is not an error")
        .is_none());

    let path = temp_settings_path("broken");
    fs::write(&path, "api_url = [").expect("write");
    let err = read_settings_file(&path).expect_err("parse error");
    assert!(format!("{err:#}").contains(&format!("failed to parse {}", path.display())));
    fs::remove_file(path).expect("cleanup");

    let dir = env::temp_dir();
    let err = read_settings_file(&dir).expect_err("directory is not readable as a file");
    assert!(format!("{err:#}").contains("failed to read"));
    assert_eq!(load_settings_from(&dir), ClientSettings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let settings = apply_env_overrides(ClientSettings::default(), |name| match name {
        "TODO_API_URL" => Some("http://a/api/todos".to_string()),
        "APP__API_URL" => Some("http://b/api/todos".to_string()),
        _ => None,
    });
    assert_eq!(settings.api_url, "http://b/api/todos");
}

#[test]
fn blank_env_values_are_ignored() {
    let settings = apply_env_overrides(ClientSettings::default(), |_| Some("  ".to_string()));
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn normalizing_trims_trailing_slash() {
    let url = normalize_api_url("http://localhost:5000/api/todos/").expect("url");
    assert_eq!(url.as_str(), "http://localhost:5000/api/todos");
}

#[test]
fn normalizing_blank_falls_back_to_default() {
    let url = normalize_api_url("   ").expect("url");
    assert_eq!(url.as_str(), DEFAULT_API_URL);
}

#[test]
fn rejects_non_http_urls() {
    assert!(normalize_api_url("mailto:someone@example.com").is_err());
    assert!(normalize_api_url("ftp://example.com/api/todos").is_err());
    assert!(normalize_api_url("not a url").is_err());
}
