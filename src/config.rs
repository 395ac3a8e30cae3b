use crate::utils::error::{ArchiveNavError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "archive-nav";
const CONFIG_ENV: &str = "ARCHIVE_NAV_CONFIG";

/// 작업 디렉토리 설정
///
/// 새 아카이브를 만들 때 쓰는 staging 디렉토리와 압축 해제용 temp 디렉토리.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub staging_dir: PathBuf,
    pub temp_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    staging_dir: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
}

impl ModelConfig {
    pub fn new(staging_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// 하나의 루트 아래에 두 디렉토리를 배치 (테스트/임시 실행용)
    pub fn under(root: &Path) -> Self {
        Self::new(root.join("newArchive"), root.join("tmp"))
    }

    /// 설정 파일 경로: 환경 변수 우선, 없으면 사용자 설정 디렉토리
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(CONFIG_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
    }

    /// 설정 로드 (파일이 없으면 기본값)
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    /// TOML 문자열 파싱, 빠진 항목은 기본값으로 채운다
    pub fn from_toml(data: &str) -> Result<Self> {
        let parsed: ConfigFile =
            toml::from_str(data).map_err(|e| ArchiveNavError::Config(e.to_string()))?;
        let defaults = Self::default();
        Ok(Self {
            staging_dir: parsed.staging_dir.unwrap_or(defaults.staging_dir),
            temp_dir: parsed.temp_dir.unwrap_or(defaults.temp_dir),
        })
    }
}

/// 기본값: staging은 데이터 디렉토리, temp는 시스템 임시 디렉토리
///
/// 데이터 디렉토리가 없으면 둘 다 임시 디렉토리 아래 형제로 둔다.
/// 두 디렉토리는 서로 중첩하지 않는다.
impl Default for ModelConfig {
    fn default() -> Self {
        let temp_root = env::temp_dir().join(APP_DIR_NAME);
        let staging_root = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| temp_root.clone());
        Self {
            staging_dir: staging_root.join("newArchive"),
            temp_dir: temp_root.join("tmp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_toml_full() {
        let config = ModelConfig::from_toml(
            r#"
staging_dir = "/srv/archive/staging"
temp_dir = "/srv/archive/tmp"
"#,
        )
        .expect("parse config");
        assert_eq!(config.staging_dir, PathBuf::from("/srv/archive/staging"));
        assert_eq!(config.temp_dir, PathBuf::from("/srv/archive/tmp"));
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let config = ModelConfig::from_toml("temp_dir = \"/var/tmp/nav\"").expect("parse");
        assert_eq!(config.temp_dir, PathBuf::from("/var/tmp/nav"));
        assert_eq!(config.staging_dir, ModelConfig::default().staging_dir);
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = ModelConfig::from_toml("staging_dir = [1, 2");
        assert!(matches!(result, Err(ArchiveNavError::Config(_))));
    }

    #[test]
    fn test_from_file_and_under() {
        let temp = tempdir().expect("create tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "staging_dir = \"/data/staging\"\n").expect("write config");
        let config = ModelConfig::from_file(&path).expect("load config");
        assert_eq!(config.staging_dir, PathBuf::from("/data/staging"));

        let local = ModelConfig::under(temp.path());
        assert_eq!(local.staging_dir, temp.path().join("newArchive"));
        assert_eq!(local.temp_dir, temp.path().join("tmp"));
    }

    #[test]
    fn test_default_dirs_are_app_scoped() {
        let config = ModelConfig::default();
        assert!(config.staging_dir.ends_with("archive-nav/newArchive"));
        assert!(config.temp_dir.ends_with("archive-nav/tmp"));
        assert!(!config.staging_dir.starts_with(&config.temp_dir));
        assert!(!config.temp_dir.starts_with(&config.staging_dir));
    }
}
