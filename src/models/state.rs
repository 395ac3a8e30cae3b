use std::sync::mpsc::Sender;

/// 마지막 에러 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// 에러 없음
    #[default]
    NoError,
    /// 아카이브를 열거나 읽을 수 없음
    UnreadablePath,
    /// 지원하지 않는 형식 (미디어 타입 또는 접미사)
    UnsupportedFormat,
    /// 출력 아카이브를 쓰기용으로 열 수 없음
    WriteError,
}

/// 모델 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelState {
    /// 아카이브 없음
    #[default]
    Empty,
    /// 아카이브 읽는 중
    Loading,
    /// 목록 생성 완료
    Loaded,
    /// 마지막 열기 실패
    Failed(ErrorKind),
}

/// 뷰 계층으로 전달되는 변경 알림
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// 보이는 행 전체가 교체됨
    Reset,
    /// 행 개수 변경
    RowsChanged { row_count: usize },
    /// 디렉토리 목록 전체가 다시 만들어짐
    ListingChanged,
    ErrorChanged(ErrorKind),
    NameChanged(String),
    CurrentDirChanged(String),
    HasFilesChanged(bool),
}

/// 모델 변경 알림 수신자
pub trait ModelObserver {
    fn notify(&self, event: &ModelEvent);
}

impl ModelObserver for Sender<ModelEvent> {
    fn notify(&self, event: &ModelEvent) {
        // 수신측이 사라졌으면 알림은 버린다
        let _ = self.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_defaults() {
        assert_eq!(ErrorKind::default(), ErrorKind::NoError);
        assert_eq!(ModelState::default(), ModelState::Empty);
    }

    #[test]
    fn test_sender_observer_forwards_events() {
        let (tx, rx) = mpsc::channel();
        tx.notify(&ModelEvent::RowsChanged { row_count: 3 });
        tx.notify(&ModelEvent::HasFilesChanged(true));

        let events: Vec<ModelEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ModelEvent::RowsChanged { row_count: 3 },
                ModelEvent::HasFilesChanged(true)
            ]
        );
    }

    #[test]
    fn test_sender_observer_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::channel::<ModelEvent>();
        drop(rx);
        tx.notify(&ModelEvent::Reset);
    }
}
