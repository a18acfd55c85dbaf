//! Algebraic properties checked over randomly generated productive economies.
use crate::compute::{type1_multipliers, type2_multipliers};
use crate::config::GdhiPolicy;
use crate::scenario::{project, DemandShock, ScenarioProjector};
use nalgebra::DMatrix;
use proptest::prelude::*;

/// An economy whose coefficient columns all sum below 0.9, so (I - C) is
/// invertible, with household data that keeps the extended columns below 1.
#[derive(Debug, Clone)]
struct Economy {
    io: DMatrix<f64>,
    output: Vec<f64>,
    household: Vec<f64>,
    labour: Vec<f64>,
    shock: Vec<f64>,
}

fn economy() -> impl Strategy<Value = Economy> {
    (2usize..7).prop_flat_map(|n| {
        let bound = 0.9 / n as f64;
        (
            prop::collection::vec(0.0..bound, n * n),
            prop::collection::vec(1.0..1000.0f64, n),
            prop::collection::vec(0.0..1.0f64, n),
            prop::collection::vec(0.0..0.09f64, n),
            prop::collection::vec(0.0..100.0f64, n),
        )
            .prop_filter("shock must be non-zero", |(_, _, _, _, shock)| shock.iter().any(|&v| v > 0.0))
            .prop_map(move |(coeffs, output, household, labour_share, shock)| {
                let io = DMatrix::from_fn(n, n, |i, j| coeffs[i * n + j] * output[j]);
                let labour = labour_share.iter().zip(&output).map(|(s, o)| s * o).collect();
                Economy { io, output, household, labour, shock }
            })
    })
}

fn gdhi(e: &Economy) -> GdhiPolicy {
    // Household coefficients then sum to at most 0.5.
    GdhiPolicy::Fixed(2.0 * e.household.len() as f64)
}

proptest! {
    #[test]
    fn prop_type1_multipliers_at_least_one(e in economy()) {
        let set = type1_multipliers(&e.io, &e.output).unwrap();
        for m in &set.multipliers {
            prop_assert!(*m >= 1.0 - 1e-12, "multiplier {} below 1", m);
        }
    }

    #[test]
    fn prop_unit_shock_reproduces_column(e in economy(), pick in any::<prop::sample::Index>()) {
        let set = type1_multipliers(&e.io, &e.output).unwrap();
        let n = e.output.len();
        let i = pick.index(n);
        let mut unit = vec![0.0; n];
        unit[i] = 1.0;
        let projected = project(&set.inverse, &DemandShock::new(unit)).unwrap();
        for r in 0..n {
            prop_assert_eq!(projected[r], set.matrix()[(r, i)]);
        }
    }

    #[test]
    fn prop_type2_components_add_up(e in economy()) {
        let t1 = type1_multipliers(&e.io, &e.output).unwrap();
        let t2 = type2_multipliers(&e.io, &e.output, &e.household, &e.labour, gdhi(&e)).unwrap();
        let projector = ScenarioProjector::new(&t1.inverse, Some(&t2.inverse), &e.output).unwrap();
        let result = projector.model(&DemandShock::new(e.shock.clone())).unwrap();

        let total = result.total();
        for i in 0..e.output.len() {
            let tolerance = 1e-9 * result.modelled[i].abs().max(1.0);
            prop_assert!((total[i] - result.modelled[i]).abs() <= tolerance);
            prop_assert!(result.induced.as_ref().unwrap()[i] >= -tolerance);
        }
    }
}
