//! 컨테이너 설정 저장소 -- ID별 설정 문서를 지연 로딩하고 캐싱
//!
//! [`ContainerConfigStore`]는 [`ConfigSource`]에서 읽은 결과를 ID별로 한 번만
//! 캐싱합니다. 파일이 없거나 파싱에 실패한 결과도 `None`으로 캐싱되며,
//! 프로세스(정확히는 저장소 인스턴스) 수명 동안 다시 읽지 않습니다.
//!
//! # 아키텍처
//!
//! ```text
//! MetadataResolver
//!        │ get(id)
//!        ▼
//! ContainerConfigStore ── cache: HashMap<id, Option<ContainerConfig>>
//!        │ (miss)
//!        ▼
//!   ConfigSource (trait)
//!     │        │
//!     ▼        ▼
//!   FsConfigSource   테스트용 구현
//!     │
//!     ▼
//! {containers_path}/{id}/config.json  (없으면 config.v2.json)
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use docker_format_core::metrics as m;
use tracing::{debug, warn};

use crate::container::ContainerConfig;
use crate::error::FilterError;

/// 구버전 Docker 설정 파일 이름
pub const CONFIG_FILE: &str = "config.json";

/// 현재 Docker 설정 파일 이름
pub const CONFIG_V2_FILE: &str = "config.v2.json";

/// 컨테이너 설정 문서를 읽어오는 trait
///
/// 실제 구현은 [`FsConfigSource`]이며, 테스트에서는 읽기 횟수를 세는
/// 구현으로 교체할 수 있습니다.
pub trait ConfigSource {
    /// ID에 해당하는 설정 문서를 읽습니다.
    fn load(&self, id: &str) -> Result<ContainerConfig, FilterError>;
}

/// 로컬 Docker 컨테이너 디렉토리에서 설정을 읽는 소스
#[derive(Debug, Clone)]
pub struct FsConfigSource {
    root: PathBuf,
}

impl FsConfigSource {
    /// 컨테이너 디렉토리를 루트로 하는 소스를 생성합니다.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 컨테이너 디렉토리 루트
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 실제로 읽을 설정 파일 경로를 결정합니다.
    ///
    /// `config.json`이 존재하면 그것을, 아니면 `config.v2.json`을 반환합니다.
    pub fn config_path(&self, id: &str) -> PathBuf {
        let dir = self.root.join(id);
        let legacy = dir.join(CONFIG_FILE);
        if legacy.exists() {
            legacy
        } else {
            dir.join(CONFIG_V2_FILE)
        }
    }
}

/// ID가 컨테이너 디렉토리 밖을 가리키지 않는지 검증합니다.
fn validate_container_id(id: &str) -> Result<(), FilterError> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\', '\0']) {
        return Err(FilterError::InvalidContainerId { id: id.to_owned() });
    }
    Ok(())
}

impl ConfigSource for FsConfigSource {
    fn load(&self, id: &str) -> Result<ContainerConfig, FilterError> {
        validate_container_id(id)?;

        let path = self.config_path(id);
        let bytes = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FilterError::ConfigNotFound { id: id.to_owned() }
            } else {
                FilterError::Read {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| FilterError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        ContainerConfig::from_value(value).ok_or_else(|| FilterError::Malformed {
            path: path.display().to_string(),
        })
    }
}

/// ID별 컨테이너 설정 캐시
///
/// 캐시는 쓰기 한 번(write-once)이며 만료나 제거가 없습니다.
/// 인스턴스가 캐시를 소유하므로 필터 인스턴스끼리 항목을 공유하지 않습니다.
pub struct ContainerConfigStore<S = FsConfigSource> {
    source: S,
    cache: HashMap<String, Option<ContainerConfig>>,
}

impl ContainerConfigStore<FsConfigSource> {
    /// 파일 시스템 소스로 저장소를 생성합니다.
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self::new(FsConfigSource::new(root))
    }
}

impl<S: ConfigSource> ContainerConfigStore<S> {
    /// 주어진 소스로 빈 저장소를 생성합니다.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// ID에 해당하는 설정을 반환합니다.
    ///
    /// 처음 요청된 ID만 소스에서 읽고, 이후에는 캐시된 결과를 반환합니다.
    /// 읽기/파싱 실패는 `None`으로 캐싱되며 재시도하지 않습니다.
    pub fn get(&mut self, id: &str) -> Option<&ContainerConfig> {
        if self.cache.contains_key(id) {
            metrics::counter!(m::FILTER_CONFIG_CACHE_HITS_TOTAL).increment(1);
        } else {
            metrics::counter!(m::FILTER_CONFIG_CACHE_MISSES_TOTAL).increment(1);
            let loaded = self.load(id);
            self.cache.insert(id.to_owned(), loaded);
        }

        self.cache.get(id).and_then(Option::as_ref)
    }

    /// 캐시에 항목(성공/실패 포함)이 있는지 확인합니다.
    pub fn contains(&self, id: &str) -> bool {
        self.cache.contains_key(id)
    }

    /// 캐시된 항목 수
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// 캐시가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// 설정 소스
    pub fn source(&self) -> &S {
        &self.source
    }

    fn load(&self, id: &str) -> Option<ContainerConfig> {
        match self.source.load(id) {
            Ok(config) => {
                debug!(container_id = id, "container config loaded");
                Some(config)
            }
            Err(e) => {
                metrics::counter!(
                    m::FILTER_CONFIG_LOAD_FAILURES_TOTAL,
                    m::LABEL_REASON => e.reason_label()
                )
                .increment(1);
                match e {
                    FilterError::ConfigNotFound { .. } | FilterError::InvalidContainerId { .. } => {
                        debug!(container_id = id, error = %e, "container config unavailable");
                    }
                    _ => {
                        warn!(container_id = id, error = %e, "failed to load container config");
                    }
                }
                None
            }
        }
    }
}
