//! Loading simulation runs from configuration files.
//!
//! Pulse parameters enter the simulation through this module, and this module
//! alone validates them. The pulse evaluators perform no checks of their own,
//! so every parameter set that reaches the world must already be physical;
//! rejecting bad values here keeps non-finite arithmetic out of the field
//! state.

use serde::{Deserialize, Serialize};
use specs::prelude::*;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::Path;

use crate::clock::Timestep;
use crate::constant;
use crate::laser::plane_wave::{PlaneWave, Polarization};

/// Parameters of a single plane-wave pulse, as they appear in a configuration file.
#[derive(Deserialize, Serialize, Clone)]
pub struct PulseConfig {
    /// Peak electric field amplitude, SI units of V/m.
    pub amplitude: f64,

    /// Wavelength, SI units of m.
    pub wavelength: f64,

    /// Characteristic duration of the gaussian ramps, SI units of s.
    pub pulse_length: f64,

    /// Length of the up-ramp in units of half the pulse length.
    pub ramp_factor: f64,

    /// Duration of the full-amplitude plateau, SI units of s.
    #[serde(default)]
    pub plateau_length: f64,

    /// Phase offset of the oscillation, in rad.
    #[serde(default)]
    pub phase: f64,

    /// Propagation speed, SI units of m/s. Defaults to the vacuum speed of light.
    #[serde(default = "default_speed_of_light")]
    pub speed_of_light: f64,

    /// Polarization of the pulse.
    pub polarization: Polarization,
}

fn default_speed_of_light() -> f64 {
    constant::C
}

impl PulseConfig {
    /// Checks that every parameter lies in its physical domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.wavelength > 0.0) {
            return Err(ConfigError::invalid("wavelength must be positive"));
        }
        if !(self.pulse_length > 0.0) {
            return Err(ConfigError::invalid("pulse_length must be positive"));
        }
        if !(self.speed_of_light > 0.0) {
            return Err(ConfigError::invalid("speed_of_light must be positive"));
        }
        if !(self.ramp_factor >= 0.0) {
            return Err(ConfigError::invalid("ramp_factor must not be negative"));
        }
        if !(self.plateau_length >= 0.0) {
            return Err(ConfigError::invalid("plateau_length must not be negative"));
        }
        if !self.amplitude.is_finite() {
            return Err(ConfigError::invalid("amplitude must be finite"));
        }
        if !self.phase.is_finite() {
            return Err(ConfigError::invalid("phase must be finite"));
        }
        Ok(())
    }

    /// Converts the validated configuration into a pulse component.
    pub fn to_plane_wave(&self) -> Result<PlaneWave, ConfigError> {
        self.validate()?;
        Ok(PlaneWave {
            amplitude: self.amplitude,
            wavelength: self.wavelength,
            pulse_length: self.pulse_length,
            ramp_factor: self.ramp_factor,
            plateau_length: self.plateau_length,
            phase: self.phase,
            speed_of_light: self.speed_of_light,
            polarization: self.polarization,
        })
    }
}

/// A complete run description.
#[derive(Deserialize, Serialize, Clone)]
pub struct SimulationConfig {
    /// Duration of the integration timestep, SI units of s.
    pub timestep: f64,

    /// Number of steps to simulate.
    pub steps: u64,

    /// Pulses injected at the boundary.
    pub pulses: Vec<PulseConfig>,
}

/// Errors produced while turning a configuration file into a run.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
    /// The file extension does not map to a supported format.
    UnsupportedFormat(String),
    /// A parameter lies outside its physical domain.
    InvalidParameter(String),
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError::InvalidParameter(message.to_string())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "could not read configuration: {}", err),
            ConfigError::Yaml(err) => write!(f, "could not parse yaml configuration: {}", err),
            ConfigError::Json(err) => write!(f, "could not parse json configuration: {}", err),
            ConfigError::UnsupportedFormat(ext) => {
                write!(f, "unsupported configuration format: {}", ext)
            }
            ConfigError::InvalidParameter(message) => {
                write!(f, "invalid pulse parameter: {}", message)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Yaml(err) => Some(err),
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}
impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

/// Loads a run description from a `.yaml`/`.yml` or `.json` file.
pub fn load_file(file_name: &str) -> Result<SimulationConfig, ConfigError> {
    let path = Path::new(file_name);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => {
            let file = File::open(path)?;
            Ok(serde_yaml::from_reader(file)?)
        }
        "json" => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(file)?)
        }
        _ => Err(ConfigError::UnsupportedFormat(extension)),
    }
}

/// Creates the pulse entities described by a configuration and sets the
/// timestep resource.
///
/// Every pulse is validated before any entity is created, so a bad
/// configuration leaves the world untouched.
pub fn create_entities_from_config(
    config: &SimulationConfig,
    world: &mut World,
) -> Result<(), ConfigError> {
    let mut pulses = Vec::new();
    for pulse_config in config.pulses.iter() {
        pulses.push(pulse_config.to_plane_wave()?);
    }
    for pulse in pulses {
        world.create_entity().with(pulse).build();
    }
    world.insert(Timestep {
        delta: config.timestep,
    });
    Ok(())
}

#[cfg(test)]
pub mod tests {

    use super::*;
    use crate::ecs;

    fn valid_pulse_config() -> PulseConfig {
        PulseConfig {
            amplitude: 1.0e12,
            wavelength: 0.8e-6,
            pulse_length: 1.0e-14,
            ramp_factor: 16.0,
            plateau_length: 0.0,
            phase: 0.0,
            speed_of_light: constant::C,
            polarization: Polarization::LinearX,
        }
    }

    #[test]
    fn test_valid_config_is_accepted() {
        let config = valid_pulse_config();
        assert!(config.validate().is_ok());
        assert!(config.to_plane_wave().is_ok());
    }

    #[test]
    fn test_nonpositive_wavelength_is_rejected() {
        let mut config = valid_pulse_config();
        config.wavelength = 0.0;
        assert!(config.validate().is_err());
        config.wavelength = -0.8e-6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_plateau_is_rejected() {
        let mut config = valid_pulse_config();
        config.plateau_length = -1.0e-15;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_amplitude_is_rejected() {
        let mut config = valid_pulse_config();
        config.amplitude = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        match load_file("run.toml") {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "toml"),
            _ => panic!("expected an unsupported format error"),
        }
    }

    #[test]
    fn test_yaml_config_parses_with_defaults() {
        let yaml = "
timestep: 1.0e-16
steps: 1000
pulses:
  - amplitude: 1.0e12
    wavelength: 8.0e-7
    pulse_length: 1.0e-14
    ramp_factor: 16.0
    polarization: LinearZ
";
        let config: SimulationConfig = serde_yaml::from_str(yaml).expect("yaml did not parse");
        assert_eq!(config.steps, 1000);
        assert_eq!(config.pulses.len(), 1);
        let pulse = &config.pulses[0];
        assert_eq!(pulse.plateau_length, 0.0);
        assert_eq!(pulse.phase, 0.0);
        assert_eq!(pulse.speed_of_light, constant::C);
        assert_eq!(pulse.polarization, Polarization::LinearZ);
        assert!(pulse.validate().is_ok());
    }

    #[test]
    fn test_entities_are_created_from_config() {
        let mut world = World::new();
        ecs::register_components(&mut world);

        let config = SimulationConfig {
            timestep: 2.0e-16,
            steps: 10,
            pulses: vec![valid_pulse_config(), valid_pulse_config()],
        };
        create_entities_from_config(&config, &mut world).expect("configuration rejected");
        world.maintain();

        let pulses = world.read_storage::<PlaneWave>();
        assert_eq!((&pulses).join().count(), 2);
        assert_eq!(world.read_resource::<Timestep>().delta, 2.0e-16);
    }

    #[test]
    fn test_bad_pulse_leaves_world_untouched() {
        let mut world = World::new();
        ecs::register_components(&mut world);

        let mut bad = valid_pulse_config();
        bad.pulse_length = -1.0;
        let config = SimulationConfig {
            timestep: 2.0e-16,
            steps: 10,
            pulses: vec![valid_pulse_config(), bad],
        };
        assert!(create_entities_from_config(&config, &mut world).is_err());
        world.maintain();

        let pulses = world.read_storage::<PlaneWave>();
        assert_eq!((&pulses).join().count(), 0);
    }
}
