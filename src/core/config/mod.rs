//! Service configuration.
//!
//! # Module layout
//!
//! - **types**: resolved structs handed to the server and gateway
//!   (`Config`, `ServerConfig`, `LlmConfig`, …).
//! - **raw**: TOML deserialization shapes with serde defaults; private.
//! - **load**: `load`, `load_from`, `[meta] base` inheritance, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::{NamedTempFile, TempDir};

    use crate::error::AppError;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_without_file() {
        let cfg = load_from(None, &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
        assert_eq!(cfg.server.service_name, "BCA Expert Chat API");
        assert!(cfg.server.cors);
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.model, "gemini-2.5-flash");
        assert_eq!(cfg.llm.max_tokens, 500);
        assert_eq!(cfg.llm.temperature, 0.3);
        assert_eq!(cfg.llm.timeout_seconds, 30);
        assert!(cfg.llm.api_base.is_none());
        assert!(cfg.llm_api_key.is_none());
    }

    #[test]
    fn toml_values_are_applied() {
        let f = write_toml(
            r#"
[server]
bind = "0.0.0.0:8080"
cors = false

[llm]
api_base = "https://llm.example/v1"
model = "gpt-4o-mini"
timeout_seconds = 5
"#,
        );
        let cfg = load_from(Some(f.path()), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert!(!cfg.server.cors);
        assert_eq!(cfg.llm.api_base.as_deref(), Some("https://llm.example/v1"));
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.timeout_seconds, 5);
        // untouched keys keep their defaults
        assert_eq!(cfg.llm.max_tokens, 500);
    }

    #[test]
    fn env_overrides_win_over_toml() {
        let f = write_toml(
            r#"
[server]
bind = "0.0.0.0:8080"

[log]
level = "warn"

[llm]
api_base = "https://from-toml/v1"
"#,
        );
        let env = EnvOverrides {
            api_key: Some("sk-test".into()),
            api_base: Some("https://from-env/v1".into()),
            bind: Some("127.0.0.1:9999".into()),
            log_level: Some("debug".into()),
        };
        let cfg = load_from(Some(f.path()), &env).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:9999");
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.llm.api_base.as_deref(), Some("https://from-env/v1"));
        assert_eq!(cfg.llm_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn blank_api_base_counts_as_missing() {
        let env = EnvOverrides { api_base: Some("   ".into()), ..Default::default() };
        let cfg = load_from(None, &env).unwrap();
        assert!(cfg.llm.api_base.is_none());
    }

    #[test]
    fn base_chain_is_merged() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[server]\nservice_name = \"Base\"\nbind = \"127.0.0.1:1\"\n",
        )
        .unwrap();
        let overlay = dir.path().join("prod.toml");
        std::fs::write(&overlay, "[meta]\nbase = \"base.toml\"\n\n[server]\nbind = \"127.0.0.1:2\"\n")
            .unwrap();

        let cfg = load_from(Some(overlay.as_path()), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.server.service_name, "Base");
        assert_eq!(cfg.server.bind, "127.0.0.1:2");
    }

    #[test]
    fn three_level_chain_merges_nearest_last() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("shared")).unwrap();
        std::fs::write(
            dir.path().join("shared").join("root.toml"),
            "[llm]\nmodel = \"root-model\"\nmax_tokens = 100\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("mid.toml"),
            "[meta]\nbase = \"shared/root.toml\"\n\n[llm]\nmax_tokens = 200\ntemperature = 0.9\n",
        )
        .unwrap();
        let top = dir.path().join("top.toml");
        std::fs::write(&top, "[meta]\nbase = \"mid.toml\"\n\n[llm]\ntemperature = 0.1\n").unwrap();

        let cfg = load_from(Some(top.as_path()), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.llm.model, "root-model");
        assert_eq!(cfg.llm.max_tokens, 200);
        assert_eq!(cfg.llm.temperature, 0.1);
    }

    #[test]
    fn circular_base_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.toml"), "[meta]\nbase = \"b.toml\"\n").unwrap();
        std::fs::write(dir.path().join("b.toml"), "[meta]\nbase = \"a.toml\"\n").unwrap();

        let err = load_from(Some(dir.path().join("a.toml").as_path()), &EnvOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let f = write_toml("[server\nbind = ");
        let err = load_from(Some(f.path()), &EnvOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("config error"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let f = write_toml("[llm]\ntimeout_seconds = 0\n");
        assert!(load_from(Some(f.path()), &EnvOverrides::default()).is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let f = write_toml("[log]\nlevel = \"verbose\"\n");
        let err = load_from(Some(f.path()), &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.contains("verbose")), "{err}");

        let env = EnvOverrides { log_level: Some("loud".into()), ..Default::default() };
        assert!(matches!(load_from(None, &env), Err(AppError::Config(_))));
    }

    #[test]
    fn log_directive_is_accepted() {
        let f = write_toml("[log]\nlevel = \"warn,bca_expert=debug\"\n");
        let cfg = load_from(Some(f.path()), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.log.level, "warn,bca_expert=debug");
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Some(Path::new("/nonexistent/config.toml")), &EnvOverrides::default());
        assert!(result.unwrap_err().to_string().contains("cannot read"));
    }

    #[test]
    fn log_file_tilde_expands() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let f = write_toml("[log]\nfile = \"~/bca-expert.log\"\n");
        let cfg = load_from(Some(f.path()), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.log.file, Some(home.join("bca-expert.log")));
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_home("/var/log/bca.log"), PathBuf::from("/var/log/bca.log"));
    }

    #[test]
    fn bare_tilde_is_home_and_other_users_pass_through() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/"), home);
        assert_eq!(expand_home("~alice/x.log"), PathBuf::from("~alice/x.log"));
        assert_eq!(expand_home("logs/~/x.log"), PathBuf::from("logs/~/x.log"));
    }
}
