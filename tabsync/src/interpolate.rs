//! Piecewise-linear interpolation.
//!
//! A portable stand-in for a host animation primitive: a driving value is
//! mapped through input breakpoints onto output values. Outputs can be
//! replaced without rebuilding the breakpoints, which is what the header
//! carry-over needs whenever a pane offset changes.

use crate::error::SyncError;

/// What happens to inputs outside the breakpoint range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extrapolate {
    /// Hold the first/last output value.
    #[default]
    Clamp,
    /// Continue the slope of the outermost segment.
    Extend,
}

/// A piecewise-linear mapping from breakpoints to outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    input: Vec<f32>,
    output: Vec<f32>,
    extrapolate: Extrapolate,
}

impl Interpolation {
    /// Build a mapping. Breakpoints must be non-decreasing and match the
    /// outputs in length.
    pub fn new(input: Vec<f32>, output: Vec<f32>) -> Result<Self, SyncError> {
        validate(&input, &output)?;
        Ok(Self {
            input,
            output,
            extrapolate: Extrapolate::Clamp,
        })
    }

    /// Set the extrapolation policy.
    pub fn extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    /// Replace the output values, keeping the breakpoints.
    pub fn set_output(&mut self, output: Vec<f32>) -> Result<(), SyncError> {
        validate(&self.input, &output)?;
        self.output = output;
        Ok(())
    }

    pub fn input(&self) -> &[f32] {
        &self.input
    }

    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Evaluate the mapping at `x`.
    pub fn evaluate(&self, x: f32) -> f32 {
        let last = self.input.len() - 1;
        if last == 0 {
            return self.output[0];
        }

        // Segment whose right breakpoint is the first one >= x.
        let segment = if x <= self.input[0] {
            if self.extrapolate == Extrapolate::Clamp {
                return self.output[0];
            }
            1
        } else if x >= self.input[last] {
            if self.extrapolate == Extrapolate::Clamp {
                return self.output[last];
            }
            last
        } else {
            self.input.partition_point(|&b| b < x).max(1)
        };

        let (x0, x1) = (self.input[segment - 1], self.input[segment]);
        let (y0, y1) = (self.output[segment - 1], self.output[segment]);
        if x1 == x0 {
            return y1;
        }
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

fn validate(input: &[f32], output: &[f32]) -> Result<(), SyncError> {
    if input.is_empty() {
        return Err(SyncError::EmptyRange);
    }
    if input.len() != output.len() {
        return Err(SyncError::MismatchedRange {
            inputs: input.len(),
            outputs: output.len(),
        });
    }
    if let Some(pos) = input.windows(2).position(|w| w[1] < w[0] || w[1].is_nan()) {
        return Err(SyncError::UnorderedRange(pos + 1));
    }
    Ok(())
}

/// Clamped linear map of `x` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`.
pub fn map_clamped(x: f32, (in_lo, in_hi): (f32, f32), (out_lo, out_hi): (f32, f32)) -> f32 {
    if in_hi <= in_lo {
        return out_lo;
    }
    let t = ((x - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + (out_hi - out_lo) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluates_segments() {
        let i = Interpolation::new(vec![0.0, 10.0, 20.0], vec![0.0, 100.0, 0.0]).unwrap();
        assert_eq!(i.evaluate(0.0), 0.0);
        assert_eq!(i.evaluate(5.0), 50.0);
        assert_eq!(i.evaluate(10.0), 100.0);
        assert_eq!(i.evaluate(15.0), 50.0);
        assert_eq!(i.evaluate(20.0), 0.0);
    }

    #[test]
    fn test_clamps_outside_range() {
        let i = Interpolation::new(vec![0.0, 10.0], vec![0.0, -10.0]).unwrap();
        assert_eq!(i.evaluate(-5.0), 0.0);
        assert_eq!(i.evaluate(50.0), -10.0);
    }

    #[test]
    fn test_extends_outside_range() {
        let i = Interpolation::new(vec![0.0, 10.0], vec![0.0, -10.0])
            .unwrap()
            .extrapolate(Extrapolate::Extend);
        assert_eq!(i.evaluate(-5.0), 5.0);
        assert_eq!(i.evaluate(20.0), -20.0);
    }

    #[test]
    fn test_single_breakpoint_is_constant() {
        let i = Interpolation::new(vec![0.0], vec![7.0]).unwrap();
        assert_eq!(i.evaluate(-100.0), 7.0);
        assert_eq!(i.evaluate(100.0), 7.0);
    }

    #[test]
    fn test_rejects_bad_ranges() {
        assert_eq!(Interpolation::new(vec![], vec![]), Err(SyncError::EmptyRange));
        assert_eq!(
            Interpolation::new(vec![0.0, 1.0], vec![0.0]),
            Err(SyncError::MismatchedRange {
                inputs: 2,
                outputs: 1
            })
        );
        assert_eq!(
            Interpolation::new(vec![0.0, 2.0, 1.0], vec![0.0; 3]),
            Err(SyncError::UnorderedRange(2))
        );
    }

    #[test]
    fn test_set_output_keeps_breakpoints() {
        let mut i = Interpolation::new(vec![0.0, 10.0], vec![0.0, 0.0]).unwrap();
        i.set_output(vec![10.0, 20.0]).unwrap();
        assert_eq!(i.evaluate(5.0), 15.0);
        assert!(i.set_output(vec![1.0]).is_err());
    }

    #[test]
    fn test_map_clamped() {
        assert_eq!(map_clamped(125.0, (0.0, 250.0), (0.0, -250.0)), -125.0);
        assert_eq!(map_clamped(400.0, (0.0, 250.0), (0.0, -250.0)), -250.0);
        assert_eq!(map_clamped(5.0, (0.0, 0.0), (0.0, -250.0)), 0.0);
    }
}
