use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const GITHUB_OWNER: &str = "GITHUB_OWNER";
    pub const GITHUB_REPO: &str = "GITHUB_REPO";
    pub const GITHUB_BRANCH: &str = "GITHUB_BRANCH";
    /// Base64-encoded admin username. Obfuscation only, not a security boundary.
    pub const ADMIN_USER_B64: &str = "ADMIN_USER_B64";
    /// Base64-encoded admin password.
    pub const ADMIN_PASS_B64: &str = "ADMIN_PASS_B64";
    pub const PORT: &str = "PORT";
    pub const LOCAL_NOTES_FILE: &str = "LOCAL_NOTES_FILE";
    pub const PUBLIC_DIR: &str = "PUBLIC_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const BRANCH: &str = "main";
    pub const LOCAL_NOTES_FILE: &str = "./data/local-notes.json";
    pub const PUBLIC_DIR: &str = "./public";
    /// Root path for notes in the remote repository
    pub const NOTES_ROOT: &str = "notes";
    /// Stock credentials ("admin"/"admin"), overridable via env
    pub const ADMIN_USER_B64: &str = "YWRtaW4=";
    pub const ADMIN_PASS_B64: &str = "YWRtaW4=";
    /// Categories materialized by the repo setup endpoint
    pub const SETUP_CATEGORIES: &[&str] = &["programming", "personal", "work", "study", "ideas"];
}

/// GitHub Contents API coordinates. Present only when token, owner and
/// repo are all configured; otherwise the server runs in local mode.
#[derive(Clone)]
pub struct RemoteConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub remote: Option<RemoteConfig>,
    pub admin_user_b64: String,
    pub admin_pass_b64: String,
    pub local_notes_file: String,
    pub public_dir: String,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Read configuration once at startup. Every value is absence-tolerant:
    /// missing GitHub credentials put the server in local mode, missing
    /// admin credentials fall back to the stock defaults.
    pub fn from_env() -> Self {
        let token = non_empty_var(env_vars::GITHUB_TOKEN);
        let owner = non_empty_var(env_vars::GITHUB_OWNER);
        let repo = non_empty_var(env_vars::GITHUB_REPO);

        let remote = match (token, owner, repo) {
            (Some(token), Some(owner), Some(repo)) => Some(RemoteConfig {
                token,
                owner,
                repo,
                branch: non_empty_var(env_vars::GITHUB_BRANCH)
                    .unwrap_or_else(|| defaults::BRANCH.to_string()),
            }),
            _ => None,
        };

        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            remote,
            admin_user_b64: non_empty_var(env_vars::ADMIN_USER_B64)
                .unwrap_or_else(|| defaults::ADMIN_USER_B64.to_string()),
            admin_pass_b64: non_empty_var(env_vars::ADMIN_PASS_B64)
                .unwrap_or_else(|| defaults::ADMIN_PASS_B64.to_string()),
            local_notes_file: non_empty_var(env_vars::LOCAL_NOTES_FILE)
                .unwrap_or_else(|| defaults::LOCAL_NOTES_FILE.to_string()),
            public_dir: non_empty_var(env_vars::PUBLIC_DIR)
                .unwrap_or_else(|| defaults::PUBLIC_DIR.to_string()),
        }
    }
}
