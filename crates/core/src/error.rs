//! 에러 타입 — 도메인별 에러 정의

/// docker-format 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum DockerFormatError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 필터 처리 에러
    #[error("filter error: {0}")]
    Filter(String),

    /// 레코드 입출력 에러
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 이벤트 레코드 에러
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// 이벤트 디코딩 실패
    #[error("failed to decode event at line {line}: {reason}")]
    Decode { line: usize, reason: String },

    /// 이벤트 인코딩 실패
    #[error("failed to encode event: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_top_level() {
        let err: DockerFormatError = ConfigError::InvalidValue {
            field: "filter.tag".to_owned(),
            reason: "must not be empty".to_owned(),
        }
        .into();
        assert!(matches!(err, DockerFormatError::Config(_)));
        assert!(err.to_string().contains("filter.tag"));
    }

    #[test]
    fn record_decode_error_display() {
        let err = RecordError::Decode {
            line: 7,
            reason: "expected value".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("expected value"));
    }
}
