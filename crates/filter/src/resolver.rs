//! 메타데이터 해석기 -- 컨테이너 설정 문서에서 이름, 이미지, 환경변수, 레이블 추출
//!
//! 모든 조회는 [`ContainerConfigStore`]에 위임하며, 설정이 없거나 필드가
//! 없거나 형식이 맞지 않으면 `None`을 반환합니다.

use crate::container::ContainerConfig;
use crate::store::{ConfigSource, ContainerConfigStore, FsConfigSource};

/// 컨테이너 메타데이터 해석기
pub struct MetadataResolver<S = FsConfigSource> {
    store: ContainerConfigStore<S>,
}

impl<S: ConfigSource> MetadataResolver<S> {
    /// 저장소를 감싸는 해석기를 생성합니다.
    pub fn new(store: ContainerConfigStore<S>) -> Self {
        Self { store }
    }

    /// 컨테이너 설정 문서를 읽을 수 있는지 확인합니다.
    pub fn has_config(&mut self, id: &str) -> bool {
        self.store.get(id).is_some()
    }

    /// 캐시된(또는 새로 읽은) 설정 문서
    pub fn config(&mut self, id: &str) -> Option<&ContainerConfig> {
        self.store.get(id)
    }

    /// 컨테이너 이름을 반환합니다.
    ///
    /// Docker는 이름 앞에 구분자(`/`)를 붙여 저장하므로 첫 글자를 제거합니다.
    /// 이름이 비어 있으면 `None`입니다.
    pub fn container_name(&mut self, id: &str) -> Option<String> {
        self.store.get(id)?.container_name().map(str::to_owned)
    }

    /// [`container_name`](Self::container_name)의 별칭
    pub fn name(&mut self, id: &str) -> Option<String> {
        self.container_name(id)
    }

    /// 이미지 이름을 반환합니다. 첫 번째 `:`부터 끝까지(태그)는 제거합니다.
    pub fn image_name(&mut self, id: &str) -> Option<String> {
        self.store.get(id)?.image_name().map(str::to_owned)
    }

    /// `Config.Env`에서 `key`에 해당하는 값을 반환합니다.
    ///
    /// 각 항목을 `=`로 나눈 뒤 끝의 빈 조각을 버리고, 정확히 두 조각인
    /// 항목만 인정합니다. 따라서 `KEY=a=b`나 `KEY=`는 무시됩니다.
    pub fn env_variable(&mut self, id: &str, key: &str) -> Option<String> {
        self.store.get(id)?.env().find_map(|entry| {
            let mut parts: Vec<&str> = entry.split('=').collect();
            while parts.last().is_some_and(|p| p.is_empty()) {
                parts.pop();
            }
            match parts.as_slice() {
                [name, value] if *name == key => Some((*value).to_owned()),
                _ => None,
            }
        })
    }

    /// `Config.Labels[key]` 값을 반환합니다.
    pub fn label(&mut self, id: &str, key: &str) -> Option<String> {
        self.store.get(id)?.label(key).map(str::to_owned)
    }

    /// 내부 저장소
    pub fn store(&self) -> &ContainerConfigStore<S> {
        &self.store
    }
}
