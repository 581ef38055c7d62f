//! Atmospheric sounding: temperature, wind and humidity versus altitude.

use serde::{Deserialize, Serialize};

use crate::data::feed::StochasticFeed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundingCategory {
    Temperature,
    XWind,
    YWind,
    Humidity,
}

impl SoundingCategory {
    pub const ALL: [SoundingCategory; 4] = [
        SoundingCategory::Temperature,
        SoundingCategory::XWind,
        SoundingCategory::YWind,
        SoundingCategory::Humidity,
    ];

    /// Recognise a block label token.
    pub fn from_label(token: &str) -> Option<Self> {
        match token {
            "Temperature" => Some(Self::Temperature),
            "X-Wind" => Some(Self::XWind),
            "Y-Wind" => Some(Self::YWind),
            "Relative" | "Humidity" => Some(Self::Humidity),
            _ => None,
        }
    }

    /// Legend text.
    pub fn legend(&self) -> &'static str {
        match self {
            Self::Temperature => "T [F]",
            Self::XWind => "Wind x-Velocity [m/s]",
            Self::YWind => "Wind y-Velocity [m/s]",
            Self::Humidity => "Relative Humidity [%]",
        }
    }
}

/// Random-walk step size per sounding array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereSigma {
    pub altitude: f64,
    pub temperature: f64,
    pub x_wind: f64,
    pub y_wind: f64,
    pub humidity: f64,
}

impl Default for AtmosphereSigma {
    fn default() -> Self {
        Self {
            altitude: 0.01,
            temperature: 0.01,
            x_wind: 0.01,
            y_wind: 0.01,
            humidity: 0.01,
        }
    }
}

/// Sounding arrays. Each is sized independently; plotting pairs values with
/// altitude levels up to the shorter of the two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtmosphereProfile {
    pub altitude: Vec<f64>,
    pub temperature: Vec<f64>,
    pub x_wind: Vec<f64>,
    pub y_wind: Vec<f64>,
    pub humidity: Vec<f64>,
}

impl AtmosphereProfile {
    pub fn values(&self, category: SoundingCategory) -> &[f64] {
        match category {
            SoundingCategory::Temperature => &self.temperature,
            SoundingCategory::XWind => &self.x_wind,
            SoundingCategory::YWind => &self.y_wind,
            SoundingCategory::Humidity => &self.humidity,
        }
    }

    pub fn values_mut(&mut self, category: SoundingCategory) -> &mut Vec<f64> {
        match category {
            SoundingCategory::Temperature => &mut self.temperature,
            SoundingCategory::XWind => &mut self.x_wind,
            SoundingCategory::YWind => &mut self.y_wind,
            SoundingCategory::Humidity => &mut self.humidity,
        }
    }

    /// `(value, altitude)` points for one category.
    pub fn curve(&self, category: SoundingCategory) -> Vec<[f64; 2]> {
        self.values(category)
            .iter()
            .zip(self.altitude.iter())
            .map(|(v, h)| [*v, *h])
            .collect()
    }

    /// One ambient random-walk step on every array.
    pub fn walk(&mut self, feed: &mut StochasticFeed, sigma: &AtmosphereSigma) {
        feed.walk(&mut self.altitude, sigma.altitude);
        feed.walk(&mut self.temperature, sigma.temperature);
        feed.walk(&mut self.x_wind, sigma.x_wind);
        feed.walk(&mut self.y_wind, sigma.y_wind);
        feed.walk(&mut self.humidity, sigma.humidity);
    }
}
