//! GroupId 値オブジェクト
//!
//! グループは接続リクエストのクエリパラメータで外部から与えられる
//! 不透明な文字列キーで識別されます。グループ自体は独立した実体を持たず、
//! 所属する接続の集合として Registry 上にのみ存在します。

use thiserror::Error;

/// GroupId 構築時の検証エラー
#[derive(Debug, Error, PartialEq)]
pub enum GroupIdError {
    #[error("group id must not be empty")]
    Empty,
}

/// グループ識別子の値オブジェクト
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    /// 新しい GroupId を作成（検証付き）
    pub fn new(value: String) -> Result<Self, GroupIdError> {
        if value.trim().is_empty() {
            return Err(GroupIdError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupId {
    type Error = GroupIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
