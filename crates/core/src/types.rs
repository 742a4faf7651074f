//! 도메인 타입 — 레코드와 이벤트 표현

use serde::{Deserialize, Serialize};

/// 로그 레코드
///
/// 필드 이름에서 JSON 값으로의 매핑입니다. 필터는 기존 필드를 건드리지 않고
/// 메타데이터 필드만 추가합니다.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// 레코드에 추가되는 필드 이름
pub mod fields {
    /// 컨테이너 ID
    pub const CONTAINER_ID: &str = "container_id";
    /// 컨테이너 이름
    pub const CONTAINER_NAME: &str = "container_name";
    /// 이미지 이름 (태그 제외)
    pub const IMAGE_NAME: &str = "image_name";
    /// 서비스 ID (compose 작업 디렉토리 레이블)
    pub const SERVICE_ID: &str = "service_id";
}

/// 호스트가 전달하는 단일 이벤트
///
/// 타임스탬프는 필터 입장에서 불투명한 값이므로 타입 매개변수로 둡니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<T> {
    /// 라우팅 태그 (점으로 구분)
    pub tag: String,
    /// 이벤트 시각
    pub time: T,
    /// 레코드 본문
    #[serde(default)]
    pub record: Record,
}

impl<T> Event<T> {
    /// 새 이벤트를 생성합니다.
    pub fn new(tag: impl Into<String>, time: T, record: Record) -> Self {
        Self {
            tag: tag.into(),
            time,
            record,
        }
    }
}
