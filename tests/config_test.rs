use spotiproxy::config::{Config, DEFAULT_API_URL, DEFAULT_SERVER_ADDRESS};

const VARS: [&str; 9] = [
    "SPOTIFY_CLIENT_ID",
    "SPOTIFY_CLIENT_SECRET",
    "SPOTIFY_REDIRECT_URI",
    "SERVER_ADDRESS",
    "SPOTIFY_API_URL",
    "SESSION_SECRET",
    "SESSION_MAX_AGE_SECS",
    "COOKIE_SECURE",
    "UPSTREAM_TIMEOUT_SECS",
];

fn set(name: &str, value: &str) {
    // SAFETY: the environment is only touched by the single test below
    unsafe { std::env::set_var(name, value) }
}

fn reset() {
    for name in VARS {
        // SAFETY: see `set`
        unsafe { std::env::remove_var(name) }
    }
}

// Every environment mutation lives in this one test.
#[test]
fn test_from_env() {
    reset();
    let err = Config::from_env().expect_err("credentials missing");
    assert_eq!(err, "SPOTIFY_CLIENT_ID must be set");

    set("SPOTIFY_CLIENT_ID", "id");
    set("SPOTIFY_CLIENT_SECRET", "secret");
    assert_eq!(
        Config::from_env().expect_err("redirect missing"),
        "SPOTIFY_REDIRECT_URI must be set"
    );

    set("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:3001/auth/callback");
    let cfg = Config::from_env().expect("valid");
    assert_eq!(cfg.client_id, "id");
    assert_eq!(cfg.server_addr, DEFAULT_SERVER_ADDRESS);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.upstream_timeout_secs, 10);
    assert!(!cfg.secure_cookies);
    // a secret is generated when none is configured
    assert_eq!(cfg.session_secret.len(), 64);

    set("SERVER_ADDRESS", "0.0.0.0:8080");
    set("SESSION_SECRET", "fixed");
    set("SESSION_MAX_AGE_SECS", "3600");
    set("COOKIE_SECURE", "true");
    set("UPSTREAM_TIMEOUT_SECS", "3");
    let cfg = Config::from_env().expect("valid");
    assert_eq!(cfg.server_addr, "0.0.0.0:8080");
    assert_eq!(cfg.session_secret, "fixed");
    assert_eq!(cfg.session_max_age_secs, 3600);
    assert!(cfg.secure_cookies);
    assert_eq!(cfg.upstream_timeout_secs, 3);

    set("UPSTREAM_TIMEOUT_SECS", "soon");
    let err = Config::from_env().expect_err("bad number");
    assert!(err.contains("UPSTREAM_TIMEOUT_SECS"));

    reset();
}

#[test]
fn test_redirect_targets() {
    let cfg = Config::default();
    assert_eq!(cfg.app_root(), "/");
    assert_eq!(cfg.login_error_url("auth_failed"), "/login?error=auth_failed");

    let cfg = Config {
        app_url: "https://music.example.com/".to_string(),
        ..Config::default()
    };
    assert_eq!(cfg.app_root(), "https://music.example.com/");
    assert_eq!(
        cfg.login_error_url("access_denied"),
        "https://music.example.com/login?error=access_denied"
    );
}
