use macros::{DomainPrimitive, PrimitiveDisplay};

use crate::{DomainError, DomainResult};

/// 緯度の範囲（度）
pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;

/// 緯度（度）
#[derive(Debug, Clone, Copy, PartialEq, DomainPrimitive, PrimitiveDisplay)]
pub struct Latitude {
    #[value_getter(ret = "val")]
    value: f64,
}

impl Latitude {
    /// 緯度を構築する。
    ///
    /// 緯度は-90.0度以上、90.0度以下でなければならない。
    pub fn new(value: f64) -> DomainResult<Self> {
        if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&value) {
            return Err(DomainError::validation().with_message(format!(
                "緯度は{}度以上、{}度以下を指定してください。",
                LATITUDE_MIN, LATITUDE_MAX
            )));
        }

        Ok(Self { value })
    }
}

/// 経度の範囲（度）
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

/// 経度（度）
#[derive(Debug, Clone, Copy, PartialEq, DomainPrimitive, PrimitiveDisplay)]
pub struct Longitude {
    #[value_getter(ret = "val")]
    value: f64,
}

impl Longitude {
    /// 経度を構築する。
    ///
    /// 経度は-180.0度以上、180.0度以下でなければならない。
    pub fn new(value: f64) -> DomainResult<Self> {
        if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&value) {
            return Err(DomainError::validation().with_message(format!(
                "経度は{}度以上、{}度以下を指定してください。",
                LONGITUDE_MIN, LONGITUDE_MAX
            )));
        }

        Ok(Self { value })
    }
}

/// 位置情報
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// 緯度
    pub latitude: Latitude,
    /// 経度
    pub longitude: Longitude,
}

impl Location {
    /// 位置情報を構築する。
    ///
    /// # 引数
    ///
    /// * `latitude` - 緯度（度）
    /// * `longitude` - 経度（度）
    ///
    /// # 戻り値
    ///
    /// 位置情報
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        Ok(Self {
            latitude: Latitude::new(latitude)?,
            longitude: Longitude::new(longitude)?,
        })
    }
}

/// 現在位置の取得タイムアウトの最小値（ミリ秒）
pub const LOCATION_TIMEOUT_MIN_MILLISECONDS: u64 = 1;
/// 現在位置の取得タイムアウトのデフォルト値（ミリ秒）
pub const LOCATION_TIMEOUT_DEFAULT_MILLISECONDS: u64 = 10_000;

/// 現在位置の取得タイムアウト（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DomainPrimitive, PrimitiveDisplay)]
pub struct LocationTimeout {
    #[value_getter(ret = "val")]
    value: u64,
}

impl LocationTimeout {
    /// 現在位置の取得タイムアウトを構築する。
    ///
    /// タイムアウトは1ミリ秒以上でなければならない。
    pub fn new(value: u64) -> DomainResult<Self> {
        if value < LOCATION_TIMEOUT_MIN_MILLISECONDS {
            return Err(DomainError::validation().with_message(format!(
                "現在位置の取得タイムアウトは{}ミリ秒以上を指定してください。",
                LOCATION_TIMEOUT_MIN_MILLISECONDS
            )));
        }

        Ok(Self { value })
    }

    /// タイムアウトを`std::time::Duration`に変換する。
    pub fn to_duration(self) -> std::time::Duration {
        std::time::Duration::from_millis(self.value)
    }
}

impl Default for LocationTimeout {
    fn default() -> Self {
        Self {
            value: LOCATION_TIMEOUT_DEFAULT_MILLISECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 範囲内の座標から位置情報を構築できることを確認
    #[test]
    fn location_can_be_constructed_from_coordinates_within_the_range() {
        let candidates = [
            (LATITUDE_MIN, LONGITUDE_MIN),
            (35.6895, 139.6917),
            (LATITUDE_MAX, LONGITUDE_MAX),
        ];
        for (latitude, longitude) in candidates {
            let location = Location::new(latitude, longitude).unwrap();
            assert_eq!(latitude, location.latitude.value());
            assert_eq!(longitude, location.longitude.value());
        }
    }

    /// 範囲外の座標から位置情報を構築できないことを確認
    #[test]
    fn location_can_not_be_constructed_from_coordinates_out_of_the_range() {
        let candidates = [
            (LATITUDE_MIN - 0.1, 0.0),
            (LATITUDE_MAX + 0.1, 0.0),
            (0.0, LONGITUDE_MIN - 0.1),
            (0.0, LONGITUDE_MAX + 0.1),
            (f64::NAN, 0.0),
        ];
        for (latitude, longitude) in candidates {
            assert!(Location::new(latitude, longitude).is_err());
        }
    }

    /// 1ミリ秒以上のタイムアウトを構築できることを確認
    #[test]
    fn location_timeout_can_be_constructed_from_one_millisecond_or_more() {
        for value in [1, 100, 10_000] {
            assert_eq!(value, LocationTimeout::new(value).unwrap().value());
        }
    }

    /// 1ミリ秒未満のタイムアウトを構築できないことを確認
    #[test]
    fn location_timeout_can_not_be_constructed_from_zero_milliseconds() {
        assert!(LocationTimeout::new(0).is_err());
    }

    /// タイムアウトのデフォルト値が10秒であることを確認
    #[test]
    fn location_timeout_defaults_to_ten_seconds() {
        assert_eq!(
            std::time::Duration::from_secs(10),
            LocationTimeout::default().to_duration()
        );
    }
}
