//! Filament command
//!
//! Converts voltages to filament temperatures with the Kykta fit, or back
//! with `--inverse`.

use crate::FilamentArgs;
use anyhow::{Result, ensure};
use kelvin_spectral::Filament;
use tracing::debug;

pub fn run(args: FilamentArgs) -> Result<()> {
    let filament = filament_from_args(&args)?;
    debug!(?filament, coefficient = filament.coefficient(), "Filament");

    for line in convert(&filament, &args.values, args.inverse) {
        println!("{line}");
    }
    Ok(())
}

fn filament_from_args(args: &FilamentArgs) -> Result<Filament> {
    let mut filament = Filament::GE47;
    if let Some(length) = args.length {
        filament.length_m = length;
    }
    if let Some(radius) = args.radius {
        filament.radius_m = radius;
    }
    if let Some(emissivity) = args.emissivity {
        filament.emissivity = emissivity;
    }
    ensure!(
        filament.length_m > 0.0 && filament.radius_m > 0.0,
        "Filament length and radius must be positive"
    );
    ensure!(
        filament.emissivity > 0.0 && filament.emissivity <= 1.0,
        "Emissivity must be in (0, 1], got {}",
        filament.emissivity
    );
    Ok(filament)
}

fn convert(filament: &Filament, values: &[f64], inverse: bool) -> Vec<String> {
    values
        .iter()
        .map(|&v| {
            if inverse {
                format!("{v} K -> {:.4} V", filament.voltage(v))
            } else {
                format!("{v} V -> {:.1} K", filament.temperature(v))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: Vec<f64>) -> FilamentArgs {
        FilamentArgs {
            values,
            length: None,
            radius: None,
            emissivity: None,
            inverse: false,
        }
    }

    #[test]
    fn test_default_is_ge47() {
        assert_eq!(filament_from_args(&args(vec![6.3])).unwrap(), Filament::GE47);
    }

    #[test]
    fn test_overrides() {
        let mut a = args(vec![1.0]);
        a.length = Some(0.05);
        a.emissivity = Some(0.35);
        let f = filament_from_args(&a).unwrap();
        assert_eq!(f.length_m, 0.05);
        assert_eq!(f.radius_m, Filament::GE47.radius_m);
        assert_eq!(f.emissivity, 0.35);

        a.emissivity = Some(1.5);
        assert!(filament_from_args(&a).is_err());
    }

    #[test]
    fn test_convert() {
        let lines = convert(&Filament::GE47, &[0.0, 6.3], false);
        assert_eq!(lines[0], "0 V -> 0.0 K");
        assert!(lines[1].starts_with("6.3 V -> "));

        let t = Filament::GE47.temperature(6.3);
        let lines = convert(&Filament::GE47, &[t], true);
        assert!(lines[0].ends_with("-> 6.3000 V"));
    }
}
