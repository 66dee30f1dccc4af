use gloo_console::error as console_error;
use gloo_storage::{LocalStorage, Storage};

// values are kept as bare strings rather than json, so that the stored theme
// reads "dark" and not "\"dark\""
pub fn get_local_storage(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).unwrap_or_else(|err| {
        console_error!(format!("Failed to fetch local storage {key}: {err:?}"));
        None
    })
}

pub fn set_local_storage(key: &str, value: &str) {
    LocalStorage::raw()
        .set_item(key, value)
        .unwrap_or_else(|err| console_error!(format!("Failed to set local storage {key}: {err:?}")))
}
