//! DTO から Domain Model への変換
//!
//! 検証はドメイン層の値オブジェクトの構築時に行われます。ここでは
//! デコード済みの DTO をドメイン型に渡すだけです。

use crate::domain::{Location, LocationError};

use super::websocket::LocationUpdateDto;

impl TryFrom<LocationUpdateDto> for Location {
    type Error = LocationError;

    fn try_from(dto: LocationUpdateDto) -> Result<Self, Self::Error> {
        Location::new(dto.name, dto.latitude, dto.longitude)
    }
}
