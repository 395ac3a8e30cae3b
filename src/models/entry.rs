use std::cmp::Ordering;

/// 아카이브 내부 항목 (한 줄)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 디렉토리 여부
    pub is_dir: bool,
    /// 아카이브 루트 기준 전체 경로 ('/' 구분, 앞뒤 구분자 없음)
    pub full_path: String,
}

impl Entry {
    /// 새 항목 생성
    pub fn new(name: impl Into<String>, is_dir: bool, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir,
            full_path: full_path.into(),
        }
    }

    /// 파일 여부 확인
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }
}

/// 목록 정렬: 디렉토리 우선, 이름은 대소문자 무시
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// 뷰에서 사용하는 행 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Name,
    IsDir,
    FullPath,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Name, Role::IsDir, Role::FullPath];

    /// 뷰 바인딩 이름
    pub fn name(&self) -> &'static str {
        match self {
            Role::Name => "name",
            Role::IsDir => "isDir",
            Role::FullPath => "fullPath",
        }
    }
}

/// 행 필드 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValue {
    Text(String),
    Bool(bool),
}

impl Entry {
    /// 필드 값 조회
    pub fn value(&self, role: Role) -> RowValue {
        match role {
            Role::Name => RowValue::Text(self.name.clone()),
            Role::IsDir => RowValue::Bool(self.is_dir),
            Role::FullPath => RowValue::Text(self.full_path.clone()),
        }
    }
}
