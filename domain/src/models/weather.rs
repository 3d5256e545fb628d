use enum_display::EnumDisplay;
use time::Date;

use macros::{DomainPrimitive, PrimitiveDisplay};

use crate::{DomainError, DomainResult};

/// 天気
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumDisplay)]
#[enum_display(case = "Lower")]
pub enum Weather {
    /// 晴れ
    Sunny,
    /// 曇り
    Cloudy,
    /// 雨
    Rainy,
    /// 雪
    Snowy,
    /// 雷雨
    Stormy,
}

impl Weather {
    /// 天気区分コードを返す。
    pub fn code(self) -> i16 {
        match self {
            Weather::Sunny => 1,
            Weather::Cloudy => 2,
            Weather::Rainy => 3,
            Weather::Snowy => 4,
            Weather::Stormy => 5,
        }
    }

    /// 天気区分コードから天気を構築する。
    ///
    /// # 引数
    ///
    /// * `code` - 天気区分コード
    ///
    /// # 戻り値
    ///
    /// 天気
    pub fn try_from_code(code: i16) -> DomainResult<Self> {
        match code {
            1 => Ok(Weather::Sunny),
            2 => Ok(Weather::Cloudy),
            3 => Ok(Weather::Rainy),
            4 => Ok(Weather::Snowy),
            5 => Ok(Weather::Stormy),
            _ => Err(DomainError::validation()
                .with_message(format!("天気区分コード({})が範囲外です。", code))),
        }
    }
}

/// 気温の範囲（摂氏）
pub const TEMPERATURE_MIN: f64 = -100.0;
pub const TEMPERATURE_MAX: f64 = 100.0;

/// 気温（摂氏）
#[derive(Debug, Clone, Copy, PartialEq, DomainPrimitive, PrimitiveDisplay)]
pub struct Temperature {
    #[value_getter(ret = "val")]
    value: f64,
}

impl Temperature {
    /// 気温を構築する。
    ///
    /// 気温は摂氏-100.0度以上、摂氏100.0度以下でなければならない。
    pub fn new(value: f64) -> DomainResult<Self> {
        if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&value) {
            return Err(DomainError::validation().with_message(format!(
                "気温は摂氏{}度以上、摂氏{}度以下を指定してください。",
                TEMPERATURE_MIN, TEMPERATURE_MAX
            )));
        }

        Ok(Self { value })
    }
}

/// 天気情報
///
/// 指定された日付と位置の天気と最高気温、最低気温を表現する。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherInfo {
    /// 日付
    pub date: Date,
    /// 天気
    pub weather: Weather,
    /// 最高気温
    pub max_temperature: Temperature,
    /// 最低気温
    pub min_temperature: Temperature,
}

impl WeatherInfo {
    /// 天気情報を構築する。
    ///
    /// 最高気温は最低気温以上でなければならない。
    pub fn new(
        date: Date,
        weather: Weather,
        max_temperature: Temperature,
        min_temperature: Temperature,
    ) -> DomainResult<Self> {
        if max_temperature.value() < min_temperature.value() {
            return Err(DomainError::validation()
                .with_message("最高気温は最低気温以上でなければなりません。"));
        }

        Ok(Self {
            date,
            weather,
            max_temperature,
            min_temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::DomainErrorKind;

    /// 天気区分コードと天気を相互に変換できることを確認
    #[test]
    fn weather_code_round_trips() {
        let candidates = [
            Weather::Sunny,
            Weather::Cloudy,
            Weather::Rainy,
            Weather::Snowy,
            Weather::Stormy,
        ];
        for weather in candidates {
            assert_eq!(weather, Weather::try_from_code(weather.code()).unwrap());
        }
    }

    /// 範囲外の天気区分コードから天気を構築できないことを確認
    #[test]
    fn weather_can_not_be_constructed_from_an_out_of_range_code() {
        for code in [0, 6, -1] {
            let result = Weather::try_from_code(code);
            assert!(result.is_err());
            assert_eq!(DomainErrorKind::Validation, result.err().unwrap().kind);
        }
    }

    /// 範囲内の気温を構築できることを確認
    #[test]
    fn temperature_can_be_constructed_from_values_within_the_range() {
        for value in [TEMPERATURE_MIN, -3.5, 0.0, 35.6, TEMPERATURE_MAX] {
            assert_eq!(value, Temperature::new(value).unwrap().value());
        }
    }

    /// 範囲外の気温を構築できないことを確認
    #[test]
    fn temperature_can_not_be_constructed_from_values_out_of_the_range() {
        for value in [TEMPERATURE_MIN - 0.1, TEMPERATURE_MAX + 0.1, f64::NAN] {
            assert!(Temperature::new(value).is_err());
        }
    }

    /// 最高気温が最低気温より低い天気情報を構築できないことを確認
    #[test]
    fn weather_info_can_not_be_constructed_when_max_is_less_than_min() {
        let result = WeatherInfo::new(
            date!(2024 - 04 - 01),
            Weather::Sunny,
            Temperature::new(5.0).unwrap(),
            Temperature::new(10.0).unwrap(),
        );

        assert!(result.is_err());
    }
}
