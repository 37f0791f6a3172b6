use super::*;

#[test]
fn log_dir_is_under_app_data_dir() {
    let (Some(data), Some(logs)) = (get_data_dir(), get_log_dir()) else {
        return;
    };
    assert!(logs.starts_with(&data));
    assert!(logs.ends_with(LOG_DIR));
    assert!(data.to_string_lossy().contains(APP_NAME));
}

#[test]
fn config_dir_names_the_app() {
    if let Some(dir) = get_config_dir() {
        assert!(dir.ends_with(APP_NAME));
    }
}
