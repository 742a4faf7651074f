//! 설정 관리 — docker-format.toml 파싱 및 런타임 설정
//!
//! [`DockerFormatConfig`]는 로깅과 필터 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`DOCKER_FORMAT_FILTER_TAG=docker.${name}` 형식)
//! 3. 설정 파일 (`docker-format.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), docker_format_core::error::DockerFormatError> {
//! use docker_format_core::config::DockerFormatConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = DockerFormatConfig::load("docker-format.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = DockerFormatConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, DockerFormatError};

/// Docker가 컨테이너별 설정을 저장하는 기본 디렉토리
pub const DEFAULT_CONTAINERS_PATH: &str = "/var/lib/docker/containers";

/// docker-format 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerFormatConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 필터 설정
    #[serde(default)]
    pub filter: FilterSection,
}

impl DockerFormatConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DockerFormatError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DockerFormatError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DockerFormatError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DockerFormatError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, DockerFormatError> {
        toml::from_str(toml_str).map_err(|e| {
            DockerFormatError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `DOCKER_FORMAT_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "DOCKER_FORMAT_GENERAL_LOG_LEVEL");
        override_string(
            &mut self.general.log_format,
            "DOCKER_FORMAT_GENERAL_LOG_FORMAT",
        );

        override_string(&mut self.filter.tag, "DOCKER_FORMAT_FILTER_TAG");
        override_string(
            &mut self.filter.container_id,
            "DOCKER_FORMAT_FILTER_CONTAINER_ID",
        );
        override_string(
            &mut self.filter.docker_containers_path,
            "DOCKER_FORMAT_FILTER_DOCKER_CONTAINERS_PATH",
        );
        override_parsed(
            &mut self.filter.tag_rewrite,
            "DOCKER_FORMAT_FILTER_TAG_REWRITE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DockerFormatError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.filter.validate()?;
        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 출력 태그 재작성 방식
///
/// `Compat`은 기존 플러그인이 실제로 내보내던 태그를 그대로 재현합니다.
/// `${name}`/`${container_name}` 치환 결과가 버려지고 `${image_name}`만 치환됩니다.
/// `Full`은 모든 플레이스홀더를 치환합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRewriteMode {
    /// 기존 출력과 호환 (기본값)
    #[default]
    Compat,
    /// 모든 플레이스홀더 치환
    Full,
}

impl fmt::Display for TagRewriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compat => write!(f, "compat"),
            Self::Full => write!(f, "full"),
        }
    }
}

impl FromStr for TagRewriteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compat" => Ok(Self::Compat),
            "full" => Ok(Self::Full),
            other => Err(ConfigError::InvalidValue {
                field: "filter.tag_rewrite".to_owned(),
                reason: format!("unknown mode '{other}', expected 'compat' or 'full'"),
            }),
        }
    }
}

/// 필터 설정 (`[filter]` 섹션)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// 출력 태그 템플릿 (`${name}`, `${container_name}`, `${image_name}`)
    pub tag: String,
    /// 컨테이너 ID 추출 템플릿 (`${tag_parts[N]}`)
    pub container_id: String,
    /// Docker 컨테이너 설정 디렉토리
    pub docker_containers_path: String,
    /// 출력 태그 재작성 방식
    pub tag_rewrite: TagRewriteMode,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            tag: "docker.${container_name}".to_owned(),
            container_id: "${tag_parts[1]}".to_owned(),
            docker_containers_path: DEFAULT_CONTAINERS_PATH.to_owned(),
            tag_rewrite: TagRewriteMode::default(),
        }
    }
}

impl FilterSection {
    /// `[filter]` 섹션의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tag.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "filter.tag".to_owned(),
                reason: "tag template must not be empty".to_owned(),
            });
        }

        if self.container_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "filter.container_id".to_owned(),
                reason: "container id template must not be empty".to_owned(),
            });
        }

        validate_containers_path(&self.docker_containers_path)
    }
}

/// 컨테이너 디렉토리 경로를 검증합니다 (path traversal 방지).
///
/// - 비어 있지 않아야 함
/// - 절대 경로여야 함
/// - ".." 컴포넌트를 포함하지 않아야 함
pub fn validate_containers_path(path_str: &str) -> Result<(), ConfigError> {
    const FIELD: &str = "filter.docker_containers_path";

    if path_str.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: FIELD.to_owned(),
            reason: "path must not be empty".to_owned(),
        });
    }

    let path = Path::new(path_str);
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(ConfigError::InvalidValue {
            field: FIELD.to_owned(),
            reason: format!("path '{path_str}' contains path traversal pattern '..'"),
        });
    }

    if !path.is_absolute() {
        return Err(ConfigError::InvalidValue {
            field: FIELD.to_owned(),
            reason: format!("path '{path_str}' must be an absolute path"),
        });
    }

    Ok(())
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_parsed<T>(target: &mut T, env_key: &str)
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<T>() {
            Ok(parsed) => *target = parsed,
            Err(e) => warn!(
                env_key,
                value = val.as_str(),
                error = %e,
                "failed to parse env var, ignoring"
            ),
        }
    }
}
