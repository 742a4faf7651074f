//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 필터는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `docker_format_`
//! - 접미어: `_total` (counter)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 실패 사유 레이블 키 (`FilterError::reason_label` 값)
pub const LABEL_REASON: &str = "reason";

// ─── Filter 메트릭 ─────────────────────────────────────────────────

/// Filter: 보강된 레코드 수 (counter)
pub const FILTER_RECORDS_ENRICHED_TOTAL: &str = "docker_format_filter_records_enriched_total";

/// Filter: 설정 캐시 적중 수 (counter)
pub const FILTER_CONFIG_CACHE_HITS_TOTAL: &str = "docker_format_filter_config_cache_hits_total";

/// Filter: 설정 캐시 미스 수 (counter, 디스크 조회 발생)
pub const FILTER_CONFIG_CACHE_MISSES_TOTAL: &str =
    "docker_format_filter_config_cache_misses_total";

/// Filter: 설정 로드 실패 수 (counter, label: reason)
pub const FILTER_CONFIG_LOAD_FAILURES_TOTAL: &str =
    "docker_format_filter_config_load_failures_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        FILTER_RECORDS_ENRICHED_TOTAL,
        "Total number of records enriched with container metadata"
    );
    describe_counter!(
        FILTER_CONFIG_CACHE_HITS_TOTAL,
        "Total number of container config lookups served from cache"
    );
    describe_counter!(
        FILTER_CONFIG_CACHE_MISSES_TOTAL,
        "Total number of container config lookups that read from disk"
    );
    describe_counter!(
        FILTER_CONFIG_LOAD_FAILURES_TOTAL,
        "Total number of container configs that were missing or malformed"
    );
}
