//! 房间（部屋）占用統計
//!
//! 行を上から順に走査し、部屋番号が空の行は直前の部屋の同室者として数える。
//!
//! ## 集計ルール
//! - 部屋番号のある行: `current_room` を更新し、未登録なら人数0で登録
//! - すべての行: `current_room` があればその部屋の人数を+1
//! - 1〜4人部屋のみ分類し、それ以外の人数は部屋数には含むが分類しない

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// セル文字列を部屋番号に変換
///
/// 小数表記（`301.0`）は整数部に切り捨てる。
pub fn parse_room_number(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f.trunc() as i64),
        _ => Err(Error::InvalidRoomNumber(text.to_string())),
    }
}

/// 1シート分の占用状態
#[derive(Debug, Clone, Default)]
pub struct OccupancyAnalyzer {
    /// 直近に現れた部屋番号（以降の空行に引き継がれる）
    current_room: Option<i64>,
    /// 部屋番号 → 人数
    occupancy: BTreeMap<i64, usize>,
    /// 異なる部屋の数
    total_rooms: usize,
}

impl OccupancyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1行分を取り込む
    pub fn push_row(&mut self, room: Option<i64>) {
        if let Some(room) = room {
            self.current_room = Some(room);
            if !self.occupancy.contains_key(&room) {
                self.occupancy.insert(room, 0);
                self.total_rooms += 1;
            }
        }

        if let Some(current) = self.current_room {
            *self.occupancy.entry(current).or_insert(0) += 1;
        }
    }

    /// 行をまとめて取り込む
    pub fn push_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        for room in rows {
            self.push_row(room);
        }
    }

    pub fn current_room(&self) -> Option<i64> {
        self.current_room
    }

    /// 部屋の人数
    pub fn occupants(&self, room: i64) -> Option<usize> {
        self.occupancy.get(&room).copied()
    }

    pub fn total_rooms(&self) -> usize {
        self.total_rooms
    }

    /// 状態を初期化（シートごとに呼ぶ）
    pub fn reset(&mut self) {
        self.current_room = None;
        self.occupancy.clear();
        self.total_rooms = 0;
    }

    pub fn summary(&self) -> RoomSummary {
        let mut summary = RoomSummary {
            total_rooms: self.total_rooms,
            ..Default::default()
        };

        for &occupants in self.occupancy.values() {
            match occupants {
                1 => summary.one += 1,
                2 => summary.two += 1,
                3 => summary.three += 1,
                4 => summary.four += 1,
                _ => {}
            }
        }

        summary
    }
}

/// 部屋タイプ別の集計結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub total_rooms: usize,
    pub one: usize,
    pub two: usize,
    pub three: usize,
    pub four: usize,
}

impl RoomSummary {
    /// 分類された部屋の合計（`total_rooms` 以下になる）
    pub fn bucketed(&self) -> usize {
        self.one + self.two + self.three + self.four
    }
}

impl fmt::Display for RoomSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} rooms", self.total_rooms)?;
        writeln!(f, "1-person rooms: {}", self.one)?;
        writeln!(f, "2-person rooms: {}", self.two)?;
        writeln!(f, "3-person rooms: {}", self.three)?;
        write!(f, "4-person rooms: {}", self.four)
    }
}
