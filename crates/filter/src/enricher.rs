//! 레코드 보강기 -- 태그에서 컨테이너를 찾아 레코드를 보강하고 출력 태그를 계산
//!
//! # 처리 흐름
//!
//! ```text
//! tag ──TagInterpolator──▶ container id ──MetadataResolver──▶ name / image / label
//!                                                              │
//!              output tag ◀── render_output_tag ◀──────────────┤
//!              record     ◀── container_id, container_name,  ◀─┘
//!                             image_name, service_id
//! ```
//!
//! 보강은 항상 완료됩니다. 메타데이터가 없으면 이름과 이미지는 `"<unknown>"`이
//! 되고 `service_id`는 생략됩니다.
//!
//! # 사용 예시
//! ```ignore
//! use docker_format_filter::{FilterConfigBuilder, RecordEnricher};
//!
//! let config = FilterConfigBuilder::new()
//!     .tag("docker.${container_name}")
//!     .container_id("${tag_parts[1]}")
//!     .build()?;
//! let mut enricher = RecordEnricher::new(config)?;
//! let (tag, record) = enricher.enrich("docker.abc123", Record::new());
//! ```

use docker_format_core::metrics as m;
use docker_format_core::pipeline::RecordFilter;
use docker_format_core::types::{Record, fields};
use serde_json::Value;
use tracing::trace;

use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::interpolate::TagInterpolator;
use crate::resolver::MetadataResolver;
use crate::store::{ConfigSource, ContainerConfigStore, FsConfigSource};

/// 메타데이터를 찾을 수 없을 때 레코드에 쓰는 값
pub const UNKNOWN: &str = "<unknown>";

/// `service_id`로 사용하는 compose 레이블
pub const SERVICE_ID_LABEL: &str = "com.docker.compose.project.working_dir";

/// Docker 컨테이너 메타데이터 보강기
pub struct RecordEnricher<S = FsConfigSource> {
    config: FilterConfig,
    interpolator: TagInterpolator,
    resolver: MetadataResolver<S>,
}

impl RecordEnricher<FsConfigSource> {
    /// 설정의 컨테이너 디렉토리를 읽는 보강기를 생성합니다.
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        let source = FsConfigSource::new(config.docker_containers_path.clone());
        Self::with_source(config, source)
    }
}

impl<S: ConfigSource> RecordEnricher<S> {
    /// 주어진 설정 소스로 보강기를 생성합니다.
    pub fn with_source(config: FilterConfig, source: S) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            config,
            interpolator: TagInterpolator::new()?,
            resolver: MetadataResolver::new(ContainerConfigStore::new(source)),
        })
    }

    /// 입력 태그에서 컨테이너 ID를 추출합니다.
    pub fn container_id(&self, tag: &str) -> String {
        self.interpolator.interpolate(&self.config.container_id, tag)
    }

    /// 컨테이너 ID로 출력 태그를 계산합니다.
    ///
    /// 이름이나 이미지를 찾지 못하면 ID를 대신 사용합니다.
    pub fn output_tag(&mut self, id: &str) -> String {
        let meta = self.lookup(id);
        self.render_tag(id, meta.name.as_deref(), meta.image.as_deref())
    }

    /// 레코드를 보강하고 (출력 태그, 레코드)를 반환합니다.
    ///
    /// 기존 필드는 유지하며 `container_id`, `container_name`, `image_name`과
    /// (레이블이 있으면) `service_id`를 추가합니다.
    pub fn enrich(&mut self, tag: &str, mut record: Record) -> (String, Record) {
        let id = self.container_id(tag);
        let Metadata {
            name,
            image,
            service_id,
        } = self.lookup(&id);

        let out_tag = self.render_tag(&id, name.as_deref(), image.as_deref());

        record.insert(fields::CONTAINER_ID.to_owned(), Value::String(id));
        record.insert(
            fields::CONTAINER_NAME.to_owned(),
            Value::String(name.unwrap_or_else(|| UNKNOWN.to_owned())),
        );
        record.insert(
            fields::IMAGE_NAME.to_owned(),
            Value::String(image.unwrap_or_else(|| UNKNOWN.to_owned())),
        );
        if let Some(service_id) = service_id {
            record.insert(fields::SERVICE_ID.to_owned(), Value::String(service_id));
        }

        metrics::counter!(m::FILTER_RECORDS_ENRICHED_TOTAL).increment(1);
        trace!(input_tag = tag, output_tag = %out_tag, "record enriched");

        (out_tag, record)
    }

    /// 메타데이터 해석기
    ///
    /// 보강기와 같은 캐시를 공유합니다.
    pub fn resolver_mut(&mut self) -> &mut MetadataResolver<S> {
        &mut self.resolver
    }

    /// 필터 설정
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// 저장소를 한 번만 조회하여 보강에 필요한 값을 꺼냅니다.
    fn lookup(&mut self, id: &str) -> Metadata {
        let Some(config) = self.resolver.config(id) else {
            return Metadata::default();
        };
        Metadata {
            name: config.container_name().map(str::to_owned),
            image: config.image_name().map(str::to_owned),
            service_id: config.label(SERVICE_ID_LABEL).map(str::to_owned),
        }
    }

    fn render_tag(&self, id: &str, name: Option<&str>, image: Option<&str>) -> String {
        self.interpolator.render_output_tag(
            &self.config.tag,
            name.unwrap_or(id),
            image.unwrap_or(id),
            self.config.tag_rewrite,
        )
    }
}

#[derive(Default)]
struct Metadata {
    name: Option<String>,
    image: Option<String>,
    service_id: Option<String>,
}

impl<S: ConfigSource> RecordFilter for RecordEnricher<S> {
    fn name(&self) -> &str {
        "docker_format"
    }

    fn filter(&mut self, tag: &str, record: Record) -> (String, Record) {
        self.enrich(tag, record)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };

    use docker_format_core::config::TagRewriteMode;
    use serde_json::json;

    use super::*;
    use crate::config::FilterConfigBuilder;
    use crate::container::ContainerConfig;

    /// 메모리 문서를 반환하며 읽기 횟수를 공유 카운터에 기록하는 소스
    struct StaticSource {
        doc: Option<Value>,
        reads: Rc<Cell<usize>>,
    }

    impl ConfigSource for StaticSource {
        fn load(&self, id: &str) -> Result<ContainerConfig, FilterError> {
            self.reads.set(self.reads.get() + 1);
            self.doc
                .clone()
                .and_then(ContainerConfig::from_value)
                .ok_or_else(|| FilterError::ConfigNotFound { id: id.to_owned() })
        }
    }

    fn enricher(
        tag: &str,
        mode: TagRewriteMode,
        doc: Option<Value>,
    ) -> (RecordEnricher<StaticSource>, Rc<Cell<usize>>) {
        let config = FilterConfigBuilder::new()
            .tag(tag)
            .container_id("${tag_parts[1]}")
            .tag_rewrite(mode)
            .build()
            .unwrap();
        let reads = Rc::new(Cell::new(0));
        let source = StaticSource {
            doc,
            reads: Rc::clone(&reads),
        };
        (RecordEnricher::with_source(config, source).unwrap(), reads)
    }

    fn web_doc() -> Value {
        json!({
            "Name": "/myapp_web_1",
            "Config": {
                "Image": "myrepo/myimage:latest",
                "Labels": { "com.docker.compose.project.working_dir": "/srv/myapp" }
            }
        })
    }

    #[test]
    fn unknown_container_gets_sentinels() {
        let (mut e, _) = enricher("docker.${name}", TagRewriteMode::Full, None);
        let (tag, record) = e.enrich("docker.abc123", Record::new());

        assert_eq!(tag, "docker.abc123");
        assert_eq!(record[fields::CONTAINER_ID], "abc123");
        assert_eq!(record[fields::CONTAINER_NAME], UNKNOWN);
        assert_eq!(record[fields::IMAGE_NAME], UNKNOWN);
        assert!(!record.contains_key(fields::SERVICE_ID));
    }

    #[test]
    fn known_container_is_enriched() {
        let (mut e, _) = enricher("docker.${name}", TagRewriteMode::Full, Some(web_doc()));
        let (tag, record) = e.enrich("docker.abc123", Record::new());

        assert_eq!(tag, "docker.myapp_web_1");
        assert_eq!(record[fields::CONTAINER_NAME], "myapp_web_1");
        assert_eq!(record[fields::IMAGE_NAME], "myrepo/myimage");
        assert_eq!(record[fields::SERVICE_ID], "/srv/myapp");
    }

    #[test]
    fn existing_fields_are_preserved() {
        let (mut e, _) = enricher("docker.${name}", TagRewriteMode::Full, Some(web_doc()));
        let mut record = Record::new();
        record.insert("log".to_owned(), json!("hello"));
        record.insert("stream".to_owned(), json!("stdout"));

        let (_, record) = e.enrich("docker.abc123", record);

        assert_eq!(record["log"], "hello");
        assert_eq!(record["stream"], "stdout");
        assert_eq!(record.len(), 6);
    }

    #[test]
    fn full_mode_rewrites_every_placeholder() {
        let (mut e, _) = enricher(
            "${container_name}.${name}.${image_name}",
            TagRewriteMode::Full,
            Some(web_doc()),
        );
        let (tag, _) = e.enrich("docker.abc123", Record::new());
        assert_eq!(tag, "myapp_web_1.myapp_web_1.myrepo/myimage");
    }

    #[test]
    fn compat_mode_keeps_name_placeholders() {
        let (mut e, _) = enricher(
            "${container_name}.${name}.${image_name}",
            TagRewriteMode::Compat,
            Some(web_doc()),
        );
        let (tag, _) = e.enrich("docker.abc123", Record::new());
        assert_eq!(tag, "${container_name}.${name}.myrepo/myimage");
    }

    #[test]
    fn tag_falls_back_to_id() {
        let (mut e, _) = enricher("out.${image_name}", TagRewriteMode::Compat, None);
        assert_eq!(e.output_tag("abc123"), "out.abc123");
    }

    #[test]
    fn config_is_read_once_across_records() {
        let (mut e, reads) = enricher("docker.${name}", TagRewriteMode::Full, Some(web_doc()));
        for _ in 0..5 {
            e.enrich("docker.abc123", Record::new());
        }
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn short_tag_yields_empty_id() {
        let (mut e, _) = enricher("docker.${name}", TagRewriteMode::Full, None);
        let (tag, record) = e.enrich("docker", Record::new());
        assert_eq!(record[fields::CONTAINER_ID], "");
        assert_eq!(tag, "docker.");
    }

    #[test]
    fn record_filter_delegates_to_enrich() {
        let (mut e, _) = enricher("docker.${name}", TagRewriteMode::Full, Some(web_doc()));
        assert_eq!(RecordFilter::name(&e), "docker_format");
        let (tag, record) = e.filter("docker.abc123", Record::new());
        assert_eq!(tag, "docker.myapp_web_1");
        assert_eq!(record[fields::CONTAINER_ID], "abc123");
    }

    /// 카운터 이름별 누적값을 기록하는 레코더
    #[derive(Default)]
    struct CountingRecorder {
        counts: Arc<Mutex<HashMap<String, u64>>>,
    }

    struct NamedCounter {
        name: String,
        counts: Arc<Mutex<HashMap<String, u64>>>,
    }

    impl CounterFn for NamedCounter {
        fn increment(&self, value: u64) {
            *self.counts.lock().unwrap().entry(self.name.clone()).or_default() += value;
        }

        fn absolute(&self, value: u64) {
            self.counts.lock().unwrap().insert(self.name.clone(), value);
        }
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            Counter::from_arc(Arc::new(NamedCounter {
                name: key.name().to_owned(),
                counts: Arc::clone(&self.counts),
            }))
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    impl CountingRecorder {
        fn get(&self, name: &str) -> u64 {
            self.counts.lock().unwrap().get(name).copied().unwrap_or(0)
        }
    }

    #[test]
    fn one_cache_lookup_per_record() {
        let recorder = CountingRecorder::default();
        let (mut e, _) = enricher("docker.${name}", TagRewriteMode::Full, None);

        metrics::with_local_recorder(&recorder, || {
            e.enrich("docker.abc123", Record::new());
        });
        assert_eq!(recorder.get(m::FILTER_CONFIG_CACHE_MISSES_TOTAL), 1);
        assert_eq!(recorder.get(m::FILTER_CONFIG_CACHE_HITS_TOTAL), 0);

        metrics::with_local_recorder(&recorder, || {
            e.enrich("docker.abc123", Record::new());
        });
        assert_eq!(recorder.get(m::FILTER_CONFIG_CACHE_MISSES_TOTAL), 1);
        assert_eq!(recorder.get(m::FILTER_CONFIG_CACHE_HITS_TOTAL), 1);
        assert_eq!(recorder.get(m::FILTER_RECORDS_ENRICHED_TOTAL), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FilterConfig {
            container_id: String::new(),
            ..FilterConfig::default()
        };
        assert!(RecordEnricher::new(config).is_err());
    }
}
