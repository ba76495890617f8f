/// Highest zoom level supported by the tile indexing. Chosen so that a packed [`crate::TileIndex`]
/// (zoom, x and y) fits in 64 bits.
pub const MAX_ZOOM: u8 = 29;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid zoom level")]
pub struct InvalidZoom;

/// Validate an integer zoom level.
pub fn check_zoom(zoom: u8) -> Result<u8, InvalidZoom> {
    if zoom > MAX_ZOOM {
        Err(InvalidZoom)
    } else {
        Ok(zoom)
    }
}

/// Continuous zoom level, between 0 and [`MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Zoom(f64);

impl TryFrom<f64> for Zoom {
    type Error = InvalidZoom;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // `contains` is false for NaN as well.
        if !(0. ..=MAX_ZOOM as f64).contains(&value) {
            Err(InvalidZoom)
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Zoom> for f64 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(16.)
    }
}

impl Zoom {
    /// Zoom at exactly the given integer level.
    pub fn from_level(level: u8) -> Result<Self, InvalidZoom> {
        Ok(Self(check_zoom(level)? as f64))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Integer zoom level closest to this one. That's the level of tiles to display.
    pub fn round(&self) -> u8 {
        self.0.round() as u8
    }

    pub fn floor(&self) -> u8 {
        self.0.floor() as u8
    }

    pub fn zoom_in(&mut self) -> Result<(), InvalidZoom> {
        *self = Self::try_from(self.0 + 1.)?;
        Ok(())
    }

    pub fn zoom_out(&mut self) -> Result<(), InvalidZoom> {
        *self = Self::try_from(self.0 - 1.)?;
        Ok(())
    }

    /// Zoom using a relative value.
    pub fn zoom_by(&mut self, value: f64) {
        if let Ok(new_self) = Self::try_from(self.0 + value) {
            *self = new_self;
        }
    }
}
