use super::NumericsError;
use super::ensemble::TrajectoryEnsemble;

/// Boltzmann constant in kJ/(mol·K).
pub const BOLTZMANN_KJ_MOL_K: f64 = 0.008314;
/// Temperature of the pulling simulations in K.
pub const DEFAULT_TEMPERATURE_K: f64 = 298.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermodynamics {
    pub boltzmann_constant: f64,
    pub temperature: f64,
}

impl Default for Thermodynamics {
    fn default() -> Self {
        Self {
            boltzmann_constant: BOLTZMANN_KJ_MOL_K,
            temperature: DEFAULT_TEMPERATURE_K,
        }
    }
}

impl Thermodynamics {
    pub fn new(boltzmann_constant: f64, temperature: f64) -> Self {
        Self {
            boltzmann_constant,
            temperature,
        }
    }

    /// Thermal energy `k_B T` in kJ/mol.
    pub fn kt(&self) -> f64 {
        self.boltzmann_constant * self.temperature
    }

    pub fn validated_kt(&self) -> Result<f64, NumericsError> {
        let kt = self.kt();
        if kt.is_finite() && kt > 0.0 {
            Ok(kt)
        } else {
            Err(NumericsError::InvalidThermalEnergy(kt))
        }
    }
}

/// Jarzynski free energy from a set of work values, `-kT ln <exp(-W/kT)>`.
///
/// The smallest work value is factored out before exponentiating, so the largest
/// exponent is exactly zero and the sum cannot overflow or underflow to zero even for
/// work values many hundreds of kT apart.
pub fn exponential_average(work: &[f64], kt: f64) -> Result<f64, NumericsError> {
    if !(kt.is_finite() && kt > 0.0) {
        return Err(NumericsError::InvalidThermalEnergy(kt));
    }
    if work.is_empty() {
        return Err(NumericsError::EmptyEnsemble);
    }

    let w_min = work.iter().copied().fold(f64::INFINITY, f64::min);
    let mean_boltzmann_factor =
        work.iter().map(|w| (-(w - w_min) / kt).exp()).sum::<f64>() / work.len() as f64;
    Ok(w_min - kt * mean_boltzmann_factor.ln())
}

/// Free-energy profile of an ensemble of cumulative work curves, one value per sample.
pub fn free_energy_profile(
    work: &TrajectoryEnsemble,
    thermodynamics: &Thermodynamics,
) -> Result<Vec<f64>, NumericsError> {
    let kt = thermodynamics.validated_kt()?;
    if work.n_trajectories() == 0 {
        return Err(NumericsError::EmptyEnsemble);
    }
    (0..work.len())
        .map(|i| exponential_average(&work.sample(i), kt))
        .collect()
}
