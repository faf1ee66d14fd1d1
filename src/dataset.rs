use crate::config::DemoConfig;

/// A measured transient together with the curve fitted to it.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// photon counts per time bin
    pub trans: Box<[f32]>,
    /// fitted curve sampled at the same bins
    pub fit: Box<[f32]>,
    /// time step between two bins
    pub x_inc: f32,
}

impl Dataset {
    pub fn new(trans: Box<[f32]>, fit: Box<[f32]>, x_inc: f32) -> Self {
        debug_assert_eq!(trans.len(), fit.len());

        Self { trans, fit, x_inc }
    }

    /// A mono-exponential decay with some deterministic shot-like noise on top.
    pub fn demo(config: &DemoConfig) -> Self {
        let fit = (0..config.bins)
            .map(|i| {
                let t = i as f32 * config.x_inc;
                config.amplitude * (-t / config.lifetime).exp()
            })
            .collect::<Box<[_]>>();

        let trans = fit
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                let jitter = ((i as f32 * 12.9898).sin() * 43_758.547).fract();
                jitter.mul_add(2.0 * y.sqrt(), y).max(0.0)
            })
            .collect();

        Self::new(trans, fit, config.x_inc)
    }

    pub fn residuals(&self) -> impl Iterator<Item = f32> + '_ {
        self.trans.iter().zip(self.fit.iter()).map(|(y, fit)| y - fit)
    }
}
