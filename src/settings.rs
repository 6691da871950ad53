/// Run settings for the mail phase
///
/// Settings live in a small JSON file (`data/setting.json` by default) or, if
/// the file ends in `.toml`, a TOML file with the same keys:
///
/// ```json
/// { "senderEmail": "office@school.example", "shouldSendEmail": "true", "emailTitle": "成績報表" }
/// ```
use crate::error::{ReportError, Result};
use log::debug;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// Placeholder replaced by the recipient's name in subject and body templates
pub const TEACHER_PLACEHOLDER: &str = "{teacher}";

pub const DEFAULT_EMAIL_BODY: &str =
    "您好 {teacher} 老師，\n\n附件為您的成績報表，請查收。\n\n此為系統自動發送的郵件，請勿回覆。";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSettings {
    #[serde(default)]
    pub sender_email: String,

    /// Accepts `true`/`false` or the strings "true"/"false"
    #[serde(default, deserialize_with = "bool_or_string")]
    pub should_send_email: bool,

    /// Subject line template
    #[serde(default)]
    pub email_title: String,

    /// Body template; the built-in greeting is used when absent
    #[serde(default)]
    pub email_body: Option<String>,
}

fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

impl RunSettings {
    pub fn subject_for(&self, teacher_name: &str) -> String {
        self.email_title.replace(TEACHER_PLACEHOLDER, teacher_name)
    }

    pub fn body_for(&self, teacher_name: &str) -> String {
        self.email_body.as_deref().unwrap_or(DEFAULT_EMAIL_BODY).replace(TEACHER_PLACEHOLDER, teacher_name)
    }
}

/// Load settings from `path`, picking TOML or JSON by extension
pub fn load_settings(path: &Path) -> Result<RunSettings> {
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let content = content.trim_start_matches('\u{feff}');

    let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    debug!("Loading settings from {:?} as {}", path, if is_toml { "TOML" } else { "JSON" });

    let parsed = if is_toml {
        toml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ReportError::Settings { path: path.to_path_buf(), message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_json_with_string_flag() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "setting.json",
            r#"{"senderEmail":"office@school.example","shouldSendEmail":"true","emailTitle":"成績報表"}"#,
        );

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.sender_email, "office@school.example");
        assert!(settings.should_send_email);
        assert_eq!(settings.email_title, "成績報表");
        assert!(settings.email_body.is_none());
    }

    #[test]
    fn test_json_with_bool_flag_and_bom() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "setting.json", "\u{feff}{\"shouldSendEmail\": false}");
        let settings = load_settings(&path).unwrap();
        assert!(!settings.should_send_email);
    }

    #[test]
    fn test_toml_settings() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "setting.toml",
            "senderEmail = \"a@b.c\"\nshouldSendEmail = true\nemailTitle = \"Grades for {teacher}\"\n",
        );

        let settings = load_settings(&path).unwrap();
        assert!(settings.should_send_email);
        assert_eq!(settings.subject_for("Mr.Lee"), "Grades for Mr.Lee");
    }

    #[test]
    fn test_body_template() {
        let settings = RunSettings::default();
        assert!(settings.body_for("王").starts_with("您好 王 老師"));

        let custom = RunSettings { email_body: Some("Dear {teacher}".to_string()), ..Default::default() };
        assert_eq!(custom.body_for("Lee"), "Dear Lee");
    }

    #[test]
    fn test_invalid_settings_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "setting.json", "{not json");
        assert!(matches!(load_settings(&path), Err(ReportError::Settings { .. })));
    }

    #[test]
    fn test_missing_settings_is_io_error() {
        assert!(matches!(load_settings(Path::new("nope/setting.json")), Err(ReportError::Io { .. })));
    }
}
