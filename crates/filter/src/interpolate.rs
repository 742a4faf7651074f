//! 태그 보간 -- 태그 세그먼트와 컨테이너 메타데이터로 템플릿을 치환
//!
//! # 지원 플레이스홀더
//! - 컨테이너 ID 템플릿: `${tag_parts[N]}` (태그를 `.`으로 나눈 N번째 세그먼트, 0부터)
//! - 출력 태그 템플릿: `${name}`, `${container_name}`, `${image_name}`
//!
//! # 사용 예시
//! ```ignore
//! use docker_format_filter::interpolate::TagInterpolator;
//!
//! let interpolator = TagInterpolator::new()?;
//! assert_eq!(interpolator.interpolate("${tag_parts[1]}", "docker.abc123"), "abc123");
//! ```

use docker_format_core::config::TagRewriteMode;
use regex::{Captures, Regex};

use crate::error::FilterError;

const TAG_PARTS_PATTERN: &str = r"\$\{tag_parts\[([0-9]+)\]\}";
const OUTPUT_TAG_PATTERN: &str = r"\$\{(name|container_name|image_name)\}";

/// 태그 템플릿 보간기
///
/// 정규식은 생성 시 한 번만 컴파일합니다.
#[derive(Debug, Clone)]
pub struct TagInterpolator {
    tag_parts: Regex,
    output_tag: Regex,
}

impl TagInterpolator {
    /// 새 보간기를 생성합니다.
    pub fn new() -> Result<Self, FilterError> {
        Ok(Self {
            tag_parts: Regex::new(TAG_PARTS_PATTERN)?,
            output_tag: Regex::new(OUTPUT_TAG_PATTERN)?,
        })
    }

    /// 템플릿의 모든 `${tag_parts[N]}`를 태그의 N번째 세그먼트로 치환합니다.
    ///
    /// 범위를 벗어난 N은 빈 문자열로 치환됩니다.
    pub fn interpolate(&self, template: &str, tag: &str) -> String {
        let parts: Vec<&str> = tag.split('.').collect();

        self.tag_parts
            .replace_all(template, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| parts.get(idx).copied())
                    .unwrap_or_default()
                    .to_owned()
            })
            .into_owned()
    }

    /// 출력 태그 템플릿을 렌더링합니다.
    ///
    /// - `Full`: `${name}`, `${container_name}` → `container_name`, `${image_name}` → `image_name`
    /// - `Compat`: `${image_name}`만 치환하고 나머지 플레이스홀더는 그대로 둡니다.
    pub fn render_output_tag(
        &self,
        template: &str,
        container_name: &str,
        image_name: &str,
        mode: TagRewriteMode,
    ) -> String {
        self.output_tag
            .replace_all(template, |caps: &Captures<'_>| match (&caps[1], mode) {
                ("image_name", _) => image_name.to_owned(),
                (_, TagRewriteMode::Full) => container_name.to_owned(),
                (_, TagRewriteMode::Compat) => caps[0].to_owned(),
            })
            .into_owned()
    }
}
