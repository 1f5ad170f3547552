//! 表頭（ヘッダー）列の検索
//!
//! 表頭は完全一致とは限らないため、部分一致・大文字小文字区別・列順で最初の一致を採用する。

use crate::error::{Error, Result};

/// `target` を含む最初の列のインデックスを返す
pub fn find_column_index<I, S>(headers: I, target: &str) -> Option<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    headers
        .into_iter()
        .position(|header| header.as_ref().contains(target))
}

/// `find_column_index` の見つからない場合をエラーにした版
pub fn require_column<I, S>(headers: I, target: &str) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    find_column_index(headers, target).ok_or_else(|| Error::HeaderNotFound(target.to_string()))
}
