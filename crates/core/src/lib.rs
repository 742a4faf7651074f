//! docker-format 공통 크레이트
//!
//! 필터 구현과 CLI가 공유하는 에러, 설정, 파이프라인 trait, 도메인 타입,
//! 메트릭 이름을 제공합니다.

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, DockerFormatError, RecordError};

// 설정
pub use config::{DockerFormatConfig, FilterSection, GeneralConfig, TagRewriteMode};

// 파이프라인 trait
pub use pipeline::{Chain, CollectingRouter, RecordFilter, Router};

// 도메인 타입
pub use types::{Event, Record};
