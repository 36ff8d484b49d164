//! Decoded measurement model for the PMS5003T.

use serde::{Deserialize, Serialize};

use crate::frame::FieldMap;
use crate::frame::layout::PMS5003T_WORDS;

/// One decoded air-quality reading.
///
/// Fields follow the frame's word order. Concentrations are in ug/m3
/// (CF=1 standard and atmospheric-environment variants); particle counts
/// are per 0.1 L of air, by minimum diameter. The reserved words at the
/// end of the frame are not surfaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    /// PM1.0 concentration, standard particle.
    pub pm10_standard: u16,
    /// PM2.5 concentration, standard particle.
    pub pm25_standard: u16,
    /// PM10 concentration, standard particle.
    pub pm100_standard: u16,
    /// PM1.0 concentration, atmospheric environment.
    pub pm10_env: u16,
    /// PM2.5 concentration, atmospheric environment.
    pub pm25_env: u16,
    /// PM10 concentration, atmospheric environment.
    pub pm100_env: u16,
    /// Particles with diameter > 0.3 um.
    pub particles_03um: u16,
    /// Particles with diameter > 0.5 um.
    pub particles_05um: u16,
    /// Particles with diameter > 1.0 um.
    pub particles_10um: u16,
    /// Particles with diameter > 2.5 um.
    pub particles_25um: u16,
    /// Temperature, 0.1 degC resolution, range (-20, 99).
    pub temperature: i16,
    /// Relative humidity, 0.1 % resolution, range (0, 99).
    pub humidity: u16,
}

impl std::fmt::Display for AirQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PM1.0 (std): {}", self.pm10_standard)?;
        writeln!(f, "PM2.5 (std): {}", self.pm25_standard)?;
        writeln!(f, "PM10 (std): {}", self.pm100_standard)?;
        writeln!(f, "PM1.0 (env): {}", self.pm10_env)?;
        writeln!(f, "PM2.5 (env): {}", self.pm25_env)?;
        writeln!(f, "PM10 (env): {}", self.pm100_env)?;
        writeln!(f, ">0.3um: {}", self.particles_03um)?;
        writeln!(f, ">0.5um: {}", self.particles_05um)?;
        writeln!(f, ">1.0um: {}", self.particles_10um)?;
        writeln!(f, ">2.5um: {}", self.particles_25um)?;
        writeln!(f, "Temp: {}", self.temperature)?;
        write!(f, "H%: {}", self.humidity)
    }
}

/// Positional field map for the PMS5003T's twelve measurement words.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pms5003t;

impl FieldMap for Pms5003t {
    type Output = AirQuality;
    const WORDS: usize = PMS5003T_WORDS;

    fn apply(&self, words: &[u16], dst: &mut AirQuality) {
        dst.pm10_standard = words[0];
        dst.pm25_standard = words[1];
        dst.pm100_standard = words[2];
        dst.pm10_env = words[3];
        dst.pm25_env = words[4];
        dst.pm100_env = words[5];
        dst.particles_03um = words[6];
        dst.particles_05um = words[7];
        dst.particles_10um = words[8];
        dst.particles_25um = words[9];
        dst.temperature = words[10] as i16;
        dst.humidity = words[11];
    }
}
