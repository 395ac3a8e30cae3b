use super::*;
use crate::models::entry::{Role, RowValue};
use crate::models::listing::parent_dir;
use std::collections::BTreeMap;

impl ArchiveManager {
    // === 현재 디렉토리 ===

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    /// 현재 디렉토리 변경
    ///
    /// 같은 디렉토리라도 항상 행을 다시 읽는다. 목록에 없는 경로면 행이
    /// 비어 있을 뿐 에러는 아니다.
    pub fn set_current_dir(&mut self, dir: &str) {
        let dir = dir.trim_matches('/');
        debug!("current dir: {:?}", dir);
        self.current_dir = dir.to_string();
        self.emit(ModelEvent::CurrentDirChanged(self.current_dir.clone()));

        self.current_rows = self
            .listing
            .get(&self.current_dir)
            .map(<[Entry]>::to_vec)
            .unwrap_or_default();
        self.emit(ModelEvent::Reset);
        self.emit(ModelEvent::RowsChanged {
            row_count: self.current_rows.len(),
        });

        self.refresh_has_files();
    }

    /// 상위 디렉토리로 이동 (루트에서는 false)
    pub fn navigate_up(&mut self) -> bool {
        let Some(parent) = parent_dir(&self.current_dir).map(str::to_string) else {
            return false;
        };
        self.set_current_dir(&parent);
        true
    }

    /// 현재 행 중 디렉토리로 진입
    pub fn enter(&mut self, index: usize) -> bool {
        let Some(target) = self
            .row(index)
            .filter(|entry| entry.is_dir)
            .map(|entry| entry.full_path.clone())
        else {
            return false;
        };
        self.set_current_dir(&target);
        true
    }

    /// 보이는 행 중 파일이 하나라도 있는지
    pub fn has_files(&self) -> bool {
        self.has_files
    }

    pub(super) fn refresh_has_files(&mut self) {
        let contains_file = self.current_rows.iter().any(Entry::is_file);
        if self.has_files != contains_file {
            self.has_files = contains_file;
            self.emit(ModelEvent::HasFilesChanged(contains_file));
        }
    }

    // === 행 접근 ===

    pub fn row_count(&self) -> usize {
        self.current_rows.len()
    }

    pub fn rows(&self) -> &[Entry] {
        &self.current_rows
    }

    pub fn row(&self, index: usize) -> Option<&Entry> {
        self.current_rows.get(index)
    }

    /// 행의 필드 값 (범위 밖이면 None)
    pub fn data(&self, index: usize, role: Role) -> Option<RowValue> {
        self.row(index).map(|entry| entry.value(role))
    }

    /// 행 전체를 필드 이름으로 조회 (범위 밖이면 빈 맵)
    pub fn get(&self, index: usize) -> BTreeMap<&'static str, RowValue> {
        let Some(entry) = self.row(index) else {
            return BTreeMap::new();
        };
        Role::ALL
            .iter()
            .map(|role| (role.name(), entry.value(*role)))
            .collect()
    }

    pub fn role_names(&self) -> Vec<(Role, &'static str)> {
        Role::ALL.iter().map(|role| (*role, role.name())).collect()
    }
}
