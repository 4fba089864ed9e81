//! Location 値オブジェクト
//!
//! 参加者が報告する位置情報。受信時に検証され、一度構築されたら不変です。
//! 新しい位置報告は前の Location を丸ごと置き換えます（last-write-wins）。

use thiserror::Error;

/// Location 構築時の検証エラー
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("participant name must not be empty")]
    EmptyName,
    #[error("latitude {0} is out of range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// 検証済みの位置情報
///
/// - `name`: 参加者の表示名（トリム後に空でないこと）
/// - `latitude`: 緯度 [-90, 90]
/// - `longitude`: 経度 [-180, 180]
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// 新しい Location を作成（検証付き）
    ///
    /// # Arguments
    ///
    /// * `name` - 参加者の表示名
    /// * `latitude` - 緯度
    /// * `longitude` - 経度
    ///
    /// # Returns
    ///
    /// * `Ok(Location)` - 全フィールドが有効な場合
    /// * `Err(LocationError)` - いずれかのフィールドが無効な場合
    pub fn new(name: String, latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if name.trim().is_empty() {
            return Err(LocationError::EmptyName);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            name,
            latitude,
            longitude,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_location() {
        // テスト項目: 有効な値で Location が構築できる
        // given (前提条件):
        let name = "alice".to_string();

        // when (操作):
        let result = Location::new(name, 35.6812, 139.7671);

        // then (期待する結果):
        let location = result.unwrap();
        assert_eq!(location.name(), "alice");
        assert_eq!(location.latitude(), 35.6812);
        assert_eq!(location.longitude(), 139.7671);
    }

    #[test]
    fn test_boundary_values_are_valid() {
        // テスト項目: 緯度・経度の境界値が有効と判定される
        // given (前提条件):

        // when (操作):
        let north_west = Location::new("a".to_string(), 90.0, -180.0);
        let south_east = Location::new("b".to_string(), -90.0, 180.0);

        // then (期待する結果):
        assert!(north_west.is_ok());
        assert!(south_east.is_ok());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        // テスト項目: 空の名前が拒否される
        // given (前提条件):

        // when (操作):
        let result = Location::new("".to_string(), 0.0, 0.0);

        // then (期待する結果):
        assert_eq!(result, Err(LocationError::EmptyName));
    }

    #[test]
    fn test_whitespace_only_name_is_rejected() {
        // テスト項目: 空白のみの名前が拒否される
        // given (前提条件):

        // when (操作):
        let result = Location::new("   ".to_string(), 0.0, 0.0);

        // then (期待する結果):
        assert_eq!(result, Err(LocationError::EmptyName));
    }

    #[test]
    fn test_latitude_out_of_range_is_rejected() {
        // テスト項目: 範囲外の緯度が拒否される
        // given (前提条件):

        // when (操作):
        let too_high = Location::new("alice".to_string(), 95.0, 0.0);
        let too_low = Location::new("alice".to_string(), -90.1, 0.0);

        // then (期待する結果):
        assert_eq!(too_high, Err(LocationError::LatitudeOutOfRange(95.0)));
        assert_eq!(too_low, Err(LocationError::LatitudeOutOfRange(-90.1)));
    }

    #[test]
    fn test_longitude_out_of_range_is_rejected() {
        // テスト項目: 範囲外の経度が拒否される
        // given (前提条件):

        // when (操作):
        let too_high = Location::new("alice".to_string(), 0.0, 180.5);
        let too_low = Location::new("alice".to_string(), 0.0, -200.0);

        // then (期待する結果):
        assert_eq!(too_high, Err(LocationError::LongitudeOutOfRange(180.5)));
        assert_eq!(too_low, Err(LocationError::LongitudeOutOfRange(-200.0)));
    }
}
