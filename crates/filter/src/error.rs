//! 필터 에러 타입
//!
//! [`FilterError`]는 필터 내부에서 발생하는 에러를 표현합니다.
//! 컨테이너 설정 로딩 에러는 저장소 경계에서 `None`으로 변환되어
//! 호출자에게 전파되지 않으며, 로그와 메트릭으로만 남습니다.
//! `From<FilterError> for DockerFormatError` 변환이 구현되어 있어
//! 설정 검증 에러는 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use docker_format_core::error::DockerFormatError;

/// 필터 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 경로로 사용할 수 없는 컨테이너 ID
    #[error("invalid container id: {id:?}")]
    InvalidContainerId {
        /// 컨테이너 ID
        id: String,
    },

    /// 두 후보 경로 모두에 설정 파일이 없음
    #[error("container config not found: {id}")]
    ConfigNotFound {
        /// 컨테이너 ID
        id: String,
    },

    /// 설정 파일 읽기 실패
    #[error("failed to read {path}: {source}")]
    Read {
        /// 파일 경로
        path: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// JSON 파싱 실패
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 최상위가 JSON 객체가 아님
    #[error("malformed container config {path}: expected JSON object")]
    Malformed {
        /// 파일 경로
        path: String,
    },

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl FilterError {
    /// 메트릭 레이블로 사용하는 짧은 사유 문자열
    pub fn reason_label(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::InvalidContainerId { .. } => "invalid_id",
            Self::ConfigNotFound { .. } => "not_found",
            Self::Read { .. } => "read",
            Self::Parse { .. } => "parse",
            Self::Malformed { .. } => "malformed",
            Self::Regex(_) => "regex",
        }
    }
}

impl From<FilterError> for DockerFormatError {
    fn from(err: FilterError) -> Self {
        DockerFormatError::Filter(err.to_string())
    }
}
