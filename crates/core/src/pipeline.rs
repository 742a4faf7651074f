//! 파이프라인 trait — 호스트와 필터 사이의 확장 포인트 정의
//!
//! 호스트(로그 수집기/라우터)는 [`Router`]와 [`Chain`]을 제공하고,
//! 필터는 [`RecordFilter`]를 구현합니다.
//!
//! ```text
//! host dispatch ─▶ RecordFilter::emit_stream ─▶ Router::emit (레코드마다 1회)
//!                                             └▶ Chain::next (배치마다 1회)
//! ```

use crate::types::Record;

/// 호스트의 라우팅 인터페이스
///
/// 필터가 재작성한 태그로 이벤트를 다시 내보낼 때 사용합니다.
pub trait Router<T> {
    /// 이벤트 하나를 라우터로 내보냅니다.
    fn emit(&mut self, tag: String, time: T, record: Record);
}

/// 배치 처리 완료 신호
///
/// 의미 있는 데이터 없이 호스트 파이프라인이 계속 진행하도록 알립니다.
pub trait Chain {
    /// 다음 단계로 진행합니다.
    fn next(&mut self);
}

impl<F: FnMut()> Chain for F {
    fn next(&mut self) {
        self()
    }
}

/// 레코드 단위 필터 trait
///
/// 새로운 보강 로직을 추가하려면 이 trait을 구현합니다.
pub trait RecordFilter {
    /// 필터 이름
    fn name(&self) -> &str;

    /// 레코드 하나를 처리하여 (출력 태그, 레코드)를 반환합니다.
    fn filter(&mut self, tag: &str, record: Record) -> (String, Record);

    /// 이벤트 배치를 입력 순서대로 처리하여 라우터로 내보냅니다.
    ///
    /// 입력 하나당 정확히 한 번 `Router::emit`을 호출하며 레코드를 버리거나
    /// 합치지 않습니다. 마지막에 `Chain::next`를 한 번 호출합니다.
    fn emit_stream<T, I, R, C>(&mut self, tag: &str, events: I, router: &mut R, chain: &mut C)
    where
        Self: Sized,
        I: IntoIterator<Item = (T, Record)>,
        R: Router<T>,
        C: Chain,
    {
        for (time, record) in events {
            let (out_tag, record) = self.filter(tag, record);
            router.emit(out_tag, time, record);
        }
        chain.next();
    }
}

/// 내보낸 이벤트를 메모리에 모으는 라우터
///
/// 테스트와 단발성 CLI 처리에서 사용합니다.
#[derive(Debug, Default)]
pub struct CollectingRouter<T> {
    /// 내보낸 (태그, 시각, 레코드) 목록 (입력 순서)
    pub emitted: Vec<(String, T, Record)>,
}

impl<T> CollectingRouter<T> {
    /// 빈 라우터를 생성합니다.
    pub fn new() -> Self {
        Self {
            emitted: Vec::new(),
        }
    }
}

impl<T> Router<T> for CollectingRouter<T> {
    fn emit(&mut self, tag: String, time: T, record: Record) {
        self.emitted.push((tag, time, record));
    }
}
