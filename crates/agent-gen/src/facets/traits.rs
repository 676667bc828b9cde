//! Psychological traits
//!
//! Five broad traits blended from latents and social aptitudes, each with
//! its own noise draw from the `traits` stream.

use agent_model::{Aptitudes, Fixed01k, Latents, PsychTraits};

use crate::rng::FacetRng;

pub fn compute_traits(rng: &mut FacetRng, latents: &Latents, aptitudes: &Aptitudes) -> PsychTraits {
    let l = latents;
    let mut noise = || f64::from(rng.int(0, 1000));

    let risk_tolerance = 0.6 * l.risk_appetite.as_f64()
        + 0.15 * l.stress_reactivity.inverted().as_f64()
        + 0.25 * noise();
    let conscientiousness = 0.4 * l.planning_horizon.as_f64()
        + 0.3 * l.impulse_control.as_f64()
        + 0.1 * l.institutional_embeddedness.as_f64()
        + 0.2 * noise();
    let novelty_seeking = 0.45 * l.curiosity_bandwidth.as_f64()
        + 0.25 * l.cosmopolitanism.as_f64()
        + 0.1 * l.risk_appetite.as_f64()
        + 0.2 * noise();
    let agreeableness = 0.45 * aptitudes.empathy.as_f64()
        + 0.2 * l.social_battery.as_f64()
        + 0.15 * aptitudes.assertiveness.inverted().as_f64()
        + 0.2 * noise();
    let authoritarianism = 0.35 * l.institutional_embeddedness.as_f64()
        + 0.25 * l.cosmopolitanism.inverted().as_f64()
        + 0.15 * l.curiosity_bandwidth.inverted().as_f64()
        + 0.25 * noise();

    PsychTraits {
        risk_tolerance: Fixed01k::clamped(risk_tolerance),
        conscientiousness: Fixed01k::clamped(conscientiousness),
        novelty_seeking: Fixed01k::clamped(novelty_seeking),
        agreeableness: Fixed01k::clamped(agreeableness),
        authoritarianism: Fixed01k::clamped(authoritarianism),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Facet, Seed};

    #[test]
    fn test_traits_follow_latents() {
        let mut low = Latents::default();
        low.planning_horizon = Fixed01k::new(0);
        low.impulse_control = Fixed01k::new(0);
        let mut high = low;
        high.planning_horizon = Fixed01k::new(1000);
        high.impulse_control = Fixed01k::new(1000);

        let apt = Aptitudes::default();
        let seed = Seed::normalize("traits");
        let a = compute_traits(&mut seed.rng(Facet::Traits), &low, &apt);
        let b = compute_traits(&mut seed.rng(Facet::Traits), &high, &apt);
        assert_eq!(b.conscientiousness.get() - a.conscientiousness.get(), 700);
        assert_eq!(a.risk_tolerance, b.risk_tolerance);
    }
}
