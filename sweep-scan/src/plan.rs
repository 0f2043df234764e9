use sweep_data::ScanTarget;

/// Inclusive stepped bounds of one full sweep, all in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanBounds {
    pub min_theta: i32,
    pub max_theta: i32,
    pub theta_step: i32,
    pub min_phi: i32,
    pub max_phi: i32,
    pub phi_step: i32,
}

impl Default for ScanBounds {
    fn default() -> Self {
        ScanBounds {
            min_theta: 90,
            max_theta: 160,
            theta_step: 5,
            min_phi: 0,
            max_phi: 160,
            phi_step: 5,
        }
    }
}

fn axis_values(min: i32, max: i32, step: i32) -> Vec<i32> {
    (min..=max).step_by(step as usize).collect()
}

fn axis_steps(min: i32, max: i32, step: i32) -> usize {
    let steps = (max - min).div_euclid(step) + 1;
    steps.max(0) as usize
}

impl ScanBounds {
    /// Number of targets one sweep visits.
    pub fn total(&self) -> usize {
        axis_steps(self.min_theta, self.max_theta, self.theta_step)
            * axis_steps(self.min_phi, self.max_phi, self.phi_step)
    }

    /// Generates the boustrophedon target sequence: theta rows in ascending
    /// order, with the phi direction alternating between rows so the head
    /// never makes a long return sweep. Pure function of the bounds; a fresh
    /// call reproduces the identical sequence.
    pub fn generate(&self) -> Vec<ScanTarget> {
        assert!(self.theta_step > 0 && self.phi_step > 0);

        let phis = axis_values(self.min_phi, self.max_phi, self.phi_step);
        let mut targets = Vec::with_capacity(self.total());

        for theta in axis_values(self.min_theta, self.max_theta, self.theta_step) {
            // Row parity counts steps from zero, not rows from min_theta
            let reversed = theta.div_euclid(self.theta_step) % 2 != 0;
            if reversed {
                for phi in phis.iter().rev() {
                    targets.push(ScanTarget {
                        theta: theta as f64,
                        phi: *phi as f64,
                    });
                }
            } else {
                for phi in phis.iter() {
                    targets.push(ScanTarget {
                        theta: theta as f64,
                        phi: *phi as f64,
                    });
                }
            }
        }
        targets
    }
}
