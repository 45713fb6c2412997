use shared::constants::API_BASE_URL;
use web_sys::window;

/// Base URL for API calls, `/api` included.
pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            // Trunk dev server: the API lives on the backend port
            if host.ends_with(":8080") {
                return API_BASE_URL.to_string();
            }

            // Served by the backend itself
            let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}/api", protocol, host);
        }
    }

    API_BASE_URL.to_string()
}

pub fn api_url(endpoint: &str) -> String {
    join_url(&get_api_base_url(), endpoint)
}

fn join_url(base: &str, endpoint: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::constants::LEADERBOARD_ENDPOINT;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000/api/", LEADERBOARD_ENDPOINT),
            "http://localhost:3000/api/leaderboard"
        );
        assert_eq!(join_url(API_BASE_URL, "/content"), "http://localhost:3000/api/content");
    }
}
