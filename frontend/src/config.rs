use web_sys::window;

pub fn get_api_base_url() -> String {
    // Use the current hostname and port for API requests so the app works
    // when served by the backend itself or accessed from another machine.
    if let Some(window) = window() {
        if let Ok(location) = window.location().host() {
            if !location.contains(":8080") {
                let protocol = window
                    .location()
                    .protocol()
                    .unwrap_or_else(|_| "http:".to_string());
                return format!("{}//{}", protocol, location);
            }
        }
    }

    // The trunk dev server runs on 8080; the API lives on 3000.
    "http://127.0.0.1:3000".to_string()
}
