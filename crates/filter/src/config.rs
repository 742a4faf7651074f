//! 필터 설정
//!
//! [`FilterConfig`]는 core의 [`FilterSection`](docker_format_core::config::FilterSection)을
//! 기반으로 필터 런타임 설정을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use docker_format_core::config::DockerFormatConfig;
//! use docker_format_filter::config::FilterConfig;
//!
//! let core_config = DockerFormatConfig::default();
//! let config = FilterConfig::from_core(&core_config.filter);
//! ```

use std::path::PathBuf;

use docker_format_core::config::{FilterSection, TagRewriteMode, validate_containers_path};
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// 필터 런타임 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// 출력 태그 템플릿
    pub tag: String,
    /// 컨테이너 ID 추출 템플릿
    pub container_id: String,
    /// Docker 컨테이너 설정 디렉토리
    pub docker_containers_path: PathBuf,
    /// 출력 태그 재작성 방식
    pub tag_rewrite: TagRewriteMode,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::from_core(&FilterSection::default())
    }
}

impl FilterConfig {
    /// core의 `FilterSection`에서 필터 설정을 생성합니다.
    pub fn from_core(core: &FilterSection) -> Self {
        Self {
            tag: core.tag.clone(),
            container_id: core.container_id.clone(),
            docker_containers_path: PathBuf::from(&core.docker_containers_path),
            tag_rewrite: core.tag_rewrite,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.tag.is_empty() {
            return Err(FilterError::Config {
                field: "tag".to_owned(),
                reason: "tag template must not be empty".to_owned(),
            });
        }

        if self.container_id.is_empty() {
            return Err(FilterError::Config {
                field: "container_id".to_owned(),
                reason: "container id template must not be empty".to_owned(),
            });
        }

        let path = self.docker_containers_path.to_string_lossy();
        validate_containers_path(&path).map_err(|e| FilterError::Config {
            field: "docker_containers_path".to_owned(),
            reason: e.to_string(),
        })
    }
}

/// 필터 설정 빌더
#[derive(Default)]
pub struct FilterConfigBuilder {
    config: FilterConfig,
}

impl FilterConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 출력 태그 템플릿을 설정합니다.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.config.tag = tag.into();
        self
    }

    /// 컨테이너 ID 추출 템플릿을 설정합니다.
    pub fn container_id(mut self, template: impl Into<String>) -> Self {
        self.config.container_id = template.into();
        self
    }

    /// 컨테이너 설정 디렉토리를 설정합니다.
    pub fn docker_containers_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.docker_containers_path = path.into();
        self
    }

    /// 출력 태그 재작성 방식을 설정합니다.
    pub fn tag_rewrite(mut self, mode: TagRewriteMode) -> Self {
        self.config.tag_rewrite = mode;
        self
    }

    /// 설정을 검증하고 `FilterConfig`를 생성합니다.
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
