use approx::assert_relative_eq;

use hyperfit_calibration::{Calibration, Calibrator, ErrorMeasure};
use hyperfit_materials::{DeformationMode, Loading, Material, Volume};
use hyperfit_solvers::optimization::{Bounds, Status, nelder_mead as nm};
use integration_tests::{linspace, synthetic};
use tracing_subscriber::filter::LevelFilter;

fn calibrate() -> Calibration {
    let mode = DeformationMode::new(Loading::Planar, Volume::Incompressible);
    let test = synthetic(Material::EightChain, &[0.9, 4.0], mode, linspace(0.8, 17));

    Calibrator::new(Material::EightChain, vec![test])
        .unwrap()
        .measure(ErrorMeasure::Nrms)
        .local(
            Bounds::new(vec![0.1, 1.5], vec![10.0, 20.0]).unwrap(),
            &[1.5, 6.0],
            &nm::Config::scaled(2),
        )
        .unwrap()
}

#[test]
fn calibration_logs_through_an_installed_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();

    let calibration = calibrate();

    assert_relative_eq!(calibration.params[0], 0.9, max_relative = 1e-2);
    assert_relative_eq!(calibration.params[1], 4.0, max_relative = 1e-2);
}

#[test]
fn calibration_round_trips_through_json() {
    let calibration = calibrate();

    let json = serde_json::to_string(&calibration).unwrap();
    let restored: Calibration = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.status, calibration.status);
    assert_eq!(restored.evaluations, calibration.evaluations);
    assert_eq!(restored.predicted.len(), calibration.predicted.len());
    for (restored, original) in restored.params.iter().zip(&calibration.params) {
        assert_relative_eq!(*restored, *original, max_relative = 1e-15);
    }
}

#[test]
fn configuration_types_serialize_by_name() {
    let mode = DeformationMode::new(Loading::Biaxial, Volume::Compressible);

    assert_eq!(
        serde_json::to_string(&mode).unwrap(),
        r#"{"loading":"Biaxial","volume":"Compressible"}"#
    );
    assert_eq!(serde_json::to_string(&Material::OgdenMarc).unwrap(), r#""OgdenMarc""#);
    assert_eq!(serde_json::to_string(&Status::MaxIters).unwrap(), r#""MaxIters""#);
    assert_eq!(
        serde_json::from_str::<ErrorMeasure>(r#""Nmad""#).unwrap(),
        ErrorMeasure::Nmad
    );
}
