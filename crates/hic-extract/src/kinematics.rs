use crate::reader::Particle;

/// Rapidity and transverse momentum of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Longitudinal rapidity `0.5 ln((E+pz)/(E-pz))`.
    pub rapidity: f64,
    /// Transverse momentum `sqrt(px^2 + py^2)`.
    pub pt: f64,
}

impl Kinematics {
    /// Computes the kinematics, or `None` when `(E-pz)(E+pz)` is not positive
    /// and the rapidity is undefined.
    pub fn from_particle(particle: &Particle) -> Option<Self> {
        let plus = particle.energy + particle.pz;
        let minus = particle.energy - particle.pz;
        let product = plus * minus;
        if product.is_nan() || product <= 0.0 {
            return None;
        }
        Some(Self {
            rapidity: 0.5 * (plus / minus).ln(),
            pt: particle.px.hypot(particle.py),
        })
    }

    /// Whether the particle lies strictly inside `|y| < cut`.
    pub fn within(&self, rapidity_cut: f64) -> bool {
        self.rapidity.abs() < rapidity_cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(energy: f64, px: f64, py: f64, pz: f64) -> Particle {
        Particle {
            energy,
            px,
            py,
            pz,
            type_code: 101,
            charge: 1,
        }
    }

    #[test]
    fn transverse_particle_sits_at_zero_rapidity() {
        let k = Kinematics::from_particle(&particle(0.5, 0.3, 0.4, 0.0)).unwrap();
        assert_eq!(k.rapidity, 0.0);
        assert!((k.pt - 0.5).abs() < 1e-12);
        assert!(k.within(0.5));
    }

    #[test]
    fn lightlike_or_spacelike_records_are_dropped() {
        assert!(Kinematics::from_particle(&particle(1.0, 0.0, 0.0, 1.0)).is_none());
        assert!(Kinematics::from_particle(&particle(1.0, 0.0, 0.0, -2.0)).is_none());
        assert!(Kinematics::from_particle(&particle(f64::NAN, 0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn window_is_open() {
        let k = Kinematics {
            rapidity: -0.5,
            pt: 1.0,
        };
        assert!(!k.within(0.5));
    }
}
