/// Closed measurement range `[min, max]` for one factor.
///
/// Construct domains in `const` items: `new` asserts `min < max`, so a
/// misconfigured pair stops the build instead of dividing by zero later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        assert!(min < max, "domain min must be strictly below max");
        Self { min, max }
    }

    pub const fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Fraction of the way `value` sits through `domain`, in `[0, 1]`.
///
/// Absent and NaN values score the neutral midpoint `0.5`. With `invert`
/// set the fraction is flipped so that larger raw values read as worse.
pub fn normalize(value: Option<f64>, domain: Domain, invert: bool) -> f64 {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return 0.5;
    };

    let clamped = value.clamp(domain.min, domain.max);
    let fraction = (clamped - domain.min) / domain.span();

    if invert { 1.0 - fraction } else { fraction }
}

/// `normalize` on the 0-100 scale, rounded to a whole sub-score.
pub fn percent_score(value: Option<f64>, domain: Domain, invert: bool) -> f64 {
    (normalize(value, domain, invert) * 100.0).round()
}
