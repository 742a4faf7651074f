//! Docker 컨테이너 메타데이터 보강 필터
//!
//! 로그 수집기가 전달하는 (태그, 시각, 레코드)마다 태그에서 컨테이너 ID를
//! 추출하고, 로컬 Docker 설정 파일에서 이름/이미지/레이블을 읽어 레코드에
//! 추가한 뒤 새 태그로 다시 내보냅니다.
//!
//! # 모듈 구성
//!
//! - [`interpolate`]: `${tag_parts[N]}` 및 출력 태그 플레이스홀더 치환
//! - [`container`]: Docker 컨테이너 설정 문서 접근자
//! - [`store`]: ID별 설정 문서 지연 로딩 및 캐시
//! - [`resolver`]: 이름, 이미지, 환경변수, 레이블 해석
//! - [`enricher`]: 레코드 보강 및 출력 태그 계산 (`RecordFilter` 구현)
//! - [`config`]: 필터 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! host ─▶ RecordEnricher ─▶ TagInterpolator
//!              │
//!              ▼
//!       MetadataResolver ─▶ ContainerConfigStore ─▶ FsConfigSource ─▶ config(.v2).json
//! ```

pub mod config;
pub mod container;
pub mod enricher;
pub mod error;
pub mod interpolate;
pub mod resolver;
pub mod store;

// --- 주요 타입 re-export ---

// 보강기
pub use enricher::{RecordEnricher, SERVICE_ID_LABEL, UNKNOWN};

// 설정
pub use config::{FilterConfig, FilterConfigBuilder};

// 에러
pub use error::FilterError;

// 구성 요소
pub use container::ContainerConfig;
pub use interpolate::TagInterpolator;
pub use resolver::MetadataResolver;
pub use store::{ConfigSource, ContainerConfigStore, FsConfigSource};
