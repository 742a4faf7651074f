//! Docker 컨테이너 설정 문서
//!
//! Docker 런타임이 컨테이너마다 저장하는 `config.v2.json`(구버전은 `config.json`)의
//! 필요한 필드만 읽습니다. 문서 구조를 강제하지 않고, 각 접근자가 중간 키가
//! 없거나 타입이 다르면 `None`을 반환합니다.
//!
//! ```text
//! {
//!   "Name": "/myapp_web_1",
//!   "Config": {
//!     "Image": "myrepo/myimage:latest",
//!     "Env": ["FOO=bar"],
//!     "Labels": { "com.docker.compose.project.working_dir": "/srv/myapp" }
//!   }
//! }
//! ```

use serde_json::{Map, Value};

/// 파싱된 컨테이너 설정 문서
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerConfig {
    doc: Map<String, Value>,
}

impl ContainerConfig {
    /// JSON 값에서 설정 문서를 생성합니다. 최상위가 객체가 아니면 `None`입니다.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(doc) => Some(Self { doc }),
            _ => None,
        }
    }

    /// 원시 `Name` 값 (Docker는 앞에 `/`를 붙여 저장합니다)
    pub fn name(&self) -> Option<&str> {
        self.doc.get("Name")?.as_str()
    }

    /// 앞의 구분자(`/`)를 제거한 컨테이너 이름. 이름이 비어 있으면 `None`입니다.
    pub fn container_name(&self) -> Option<&str> {
        let mut chars = self.name()?.chars();
        chars.next()?;
        Some(chars.as_str())
    }

    /// `Config.Image` 값 (태그 포함)
    pub fn image(&self) -> Option<&str> {
        self.section()?.get("Image")?.as_str()
    }

    /// 첫 번째 `:`부터 끝까지(태그)를 제거한 이미지 이름
    pub fn image_name(&self) -> Option<&str> {
        let image = self.image()?;
        Some(image.split_once(':').map_or(image, |(repo, _)| repo))
    }

    /// `Config.Env` 항목들. 문자열이 아닌 항목은 건너뜁니다.
    pub fn env(&self) -> impl Iterator<Item = &str> {
        self.section()
            .and_then(|config| config.get("Env"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// `Config.Labels[key]` 값
    pub fn label(&self, key: &str) -> Option<&str> {
        self.section()?.get("Labels")?.get(key)?.as_str()
    }

    fn section(&self) -> Option<&Map<String, Value>> {
        self.doc.get("Config")?.as_object()
    }
}
