// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Annual energy estimates from a power curve and a Weibull wind distribution.

use serde::{Serialize, Deserialize};

use rotormath::special_functions::gamma;

use crate::error::Error;

use super::power_curve::PowerCurvePoint;

pub const HOURS_PER_YEAR: f64 = 8760.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// A two-parameter Weibull distribution for the long-term wind speed at a site, parameterised
/// by the shape factor and the mean wind speed.
pub struct WeibullDistribution {
    #[serde(default="WeibullDistribution::default_shape")]
    pub shape: f64,
    /// Mean wind speed of the distribution [m/s]
    pub mean_wind_speed: f64,
}

impl WeibullDistribution {
    pub fn default_shape() -> f64 {2.0}

    /// The scale parameter of the distribution, computed from the mean wind speed as
    /// `mean / gamma(1 + 1/shape)`.
    pub fn scale(&self) -> Result<f64, Error> {
        if self.mean_wind_speed <= 0.0 {
            return Err(Error::DomainError(
                format!("the mean wind speed must be positive, got {}", self.mean_wind_speed)
            ));
        }

        let scale = self.mean_wind_speed / gamma(1.0 + 1.0 / self.shape)?;

        Ok(scale)
    }

    /// The probability of the wind speed exceeding the input value
    pub fn survival(&self, wind_speed: f64, scale: f64) -> f64 {
        (-(wind_speed.max(0.0) / scale).powf(self.shape)).exp()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// An annual energy estimate for one wind climate
pub struct AnnualEnergyEstimate {
    /// Mean wind speed of the Weibull distribution the estimate was made for [m/s]
    pub mean_wind_speed: f64,
    /// Annual energy production [kWh]
    pub annual_energy_kwh: f64,
    /// Value of the annual energy production [currency]
    pub revenue: f64,
}

/// Integrates the annual energy production of a power curve against a Weibull distribution.
///
/// Each point of the power curve is weighted with the probability of a wind speed bin around
/// it, where the bin half-width is half the wind speed step of the sweep. Note that this
/// convention makes the bins overlap if the power curve is on an irregular grid; the behaviour
/// is kept for compatibility with established power curve tools, which use the same weighting.
///
/// # Arguments
/// * `power_curve` - The power curve points, sorted by wind speed.
/// * `weibull` - The wind distribution.
/// * `bin_half_width` - Half the wind speed step of the sweep [m/s].
/// * `price_per_kwh` - Price used for the revenue estimate.
pub fn annual_energy_production(
    power_curve: &[PowerCurvePoint],
    weibull: &WeibullDistribution,
    bin_half_width: f64,
    price_per_kwh: f64,
) -> Result<AnnualEnergyEstimate, Error> {
    let scale = weibull.scale()?;

    let mut mean_power = 0.0;

    for point in power_curve {
        let weight =
            weibull.survival(point.wind_speed - bin_half_width, scale) -
            weibull.survival(point.wind_speed + bin_half_width, scale);

        mean_power += weight * point.electrical_power;
    }

    let annual_energy_kwh = HOURS_PER_YEAR * mean_power / 1000.0;

    Ok(AnnualEnergyEstimate {
        mean_wind_speed: weibull.mean_wind_speed,
        annual_energy_kwh,
        revenue: annual_energy_kwh * price_per_kwh,
    })
}
