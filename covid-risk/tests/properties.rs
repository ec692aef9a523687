use assert_approx_eq::assert_approx_eq;
use covid_risk::{predict_infection_probability, prelude::*, resolve, sim::simulate};

fn adult() -> RiskProfile {
    RiskProfile::new(30).unwrap()
}

fn fully_protected(age: Age) -> RiskProfile {
    RiskProfile::new(age)
        .unwrap()
        .with_vaccine(VaccineBrand::Moderna, 3)
        .with_prior_infections(2)
}

fn attack_rate_calculator() -> Calculator {
    Calculator::default().with_metric(OutputMetric::AttackRate)
}

#[test]
fn probabilities_are_bounded() {
    let calc = Calculator::default();
    let attack = attack_rate_calculator();
    let brands = [
        VaccineBrand::Pfizer,
        VaccineBrand::Moderna,
        VaccineBrand::AstraZeneca,
        VaccineBrand::Other,
    ];
    let mut profiles = vec![];
    for &age in [0u8, 18, 19, 59, 60, 100].iter() {
        for prior in 0..3 {
            profiles.push(RiskProfile::new(age).unwrap().with_prior_infections(prior));
            for &brand in brands.iter() {
                for doses in 0..4 {
                    profiles.push(
                        RiskProfile::new(age)
                            .unwrap()
                            .with_vaccine(brand, doses)
                            .with_prior_infections(prior),
                    );
                }
            }
        }
    }
    for res in calc.predict_many(&profiles).into_iter().chain(attack.predict_many(&profiles)) {
        let p = res.unwrap();
        assert!((0.0..=100.0).contains(&p), "{}", p);
    }
}

#[test]
fn predictions_are_deterministic() {
    let profile = RiskProfile::new(47)
        .unwrap()
        .with_vaccine(VaccineBrand::Pfizer, 1)
        .with_prior_infections(1);
    let a = predict_infection_probability(&profile).unwrap();
    let b = predict_infection_probability(&profile).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn baseline_scenario() {
    assert_eq!(resolve(&adult()).value(), 0.3);

    // The infectious share at t = 160 is past the peak of the outbreak...
    let final_infectious = predict_infection_probability(&adult()).unwrap();
    assert_approx_eq!(final_infectious, 1.008, 0.005);

    // ...while nearly everyone was infected at some point.
    let attack = attack_rate_calculator()
        .predict_infection_probability(&adult())
        .unwrap();
    assert!(attack > 90.0, "{}", attack);
}

#[test]
fn full_protection_scenario() {
    let beta = resolve(&fully_protected(30)).value();
    assert!(beta < 0.3 * 0.25);

    let calc = Calculator::default();
    let base = calc.predict_infection_probability(&adult()).unwrap();
    let protected = calc.predict_infection_probability(&fully_protected(30)).unwrap();
    assert!(protected < base);

    let attack = attack_rate_calculator();
    let base = attack.predict_infection_probability(&adult()).unwrap();
    let protected = attack
        .predict_infection_probability(&fully_protected(30))
        .unwrap();
    assert!(protected < base);
    assert!(protected < 1.0);
}

#[test]
fn elderly_vs_youth() {
    let elderly = RiskProfile::new(70).unwrap();
    let youth = RiskProfile::new(10).unwrap();
    assert!(resolve(&elderly).value() > resolve(&youth).value());

    let attack = attack_rate_calculator();
    let p_elderly = attack.predict_infection_probability(&elderly).unwrap();
    let p_youth = attack.predict_infection_probability(&youth).unwrap();
    assert!(p_elderly >= p_youth, "{} < {}", p_elderly, p_youth);
}

#[test]
fn attack_rate_grows_with_risk() {
    let attack = attack_rate_calculator();
    let probs: Vec<Real> = (0..4)
        .map(|n| {
            let profile = adult().with_vaccine(VaccineBrand::Pfizer, n);
            attack.predict_infection_probability(&profile).unwrap()
        })
        .collect();
    for pair in probs.windows(2) {
        assert!(pair[1] <= pair[0], "{:?}", probs);
    }
}

#[test]
fn saturation_is_clamped() {
    for &b in [5.0, 25.0, 1e3].iter() {
        let res = simulate(TransmissionRate::new(b).unwrap()).unwrap();
        assert_eq!(res.attack_rate(), 100.0, "beta={}", b);
        assert!(res.infection_probability() <= 100.0);
    }
}

#[test]
fn conservation_for_profiles() {
    let calc = Calculator::default();
    for profile in [adult(), fully_protected(80), RiskProfile::new(3).unwrap()].iter() {
        let res = calc.simulate_profile(profile).unwrap();
        assert!(res.conservation_error() < 1e-6);
    }
}
